use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::classify::HcRule;
use crate::data::model::{CLUSTER, POROSITY, VSHALE};

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_ENV: &str = "HARAZ_EXPLORER_CONFIG";

/// Picked up from the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "explorer.json";

// ---------------------------------------------------------------------------
// Track selection
// ---------------------------------------------------------------------------

/// Built-in track sets matching the two logging suites of the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackPreset {
    /// GR, RHOB, NPHI
    DensityNeutron,
    /// GR, DT, PE
    SonicPe,
}

impl TrackPreset {
    pub fn columns(self) -> Vec<String> {
        let curves: &[&str] = match self {
            TrackPreset::DensityNeutron => &["GR", "RHOB", "NPHI"],
            TrackPreset::SonicPe => &["GR", "DT", "PE"],
        };
        curves
            .iter()
            .chain(&[VSHALE, POROSITY])
            .map(|s| s.to_string())
            .collect()
    }
}

/// Either a preset name or an explicit, ordered list of column names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TrackSelection {
    Preset(TrackPreset),
    Columns(Vec<String>),
}

impl Default for TrackSelection {
    fn default() -> Self {
        TrackSelection::Preset(TrackPreset::DensityNeutron)
    }
}

impl TrackSelection {
    pub fn columns(&self) -> Vec<String> {
        match self {
            TrackSelection::Preset(p) => p.columns(),
            TrackSelection::Columns(c) => c.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ExplorerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Opened at startup when it exists.
    pub data_path: PathBuf,
    pub tracks: TrackSelection,
    pub delimiter: char,
    pub summary_columns: Vec<String>,
    pub preview_rows: usize,
    pub hc_rule: HcRule,
    pub title: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Haraz_5_clustered_with_Vshale_Porosity.csv"),
            tracks: TrackSelection::default(),
            delimiter: ',',
            summary_columns: vec![POROSITY.to_string(), VSHALE.to_string()],
            preview_rows: 10,
            hc_rule: HcRule::default(),
            title: "Haraz-5 Well Log Interactive Explorer".to_string(),
        }
    }
}

impl ExplorerConfig {
    /// Resolve the configuration: `$HARAZ_EXPLORER_CONFIG`, then
    /// `./explorer.json`, then built-in defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::var_os(CONFIG_ENV), Path::new("."))
    }

    /// Lookup with the environment value and working directory supplied.
    /// An explicit `env` path must exist.
    pub fn load_from(env: Option<OsString>, cwd: &Path) -> Result<Self> {
        if let Some(path) = env {
            return Self::from_file(Path::new(&path));
        }
        let local = cwd.join(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Self::from_file(&local)
        } else {
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        if self.preview_rows == 0 {
            bail!("preview_rows must be at least 1");
        }
        if !self.hc_rule.porosity_min.is_finite() || !self.hc_rule.vshale_max.is_finite() {
            bail!("hc_rule thresholds must be finite numbers");
        }
        let tracks = self.tracks.columns();
        if tracks.is_empty() {
            bail!("at least one track column is required");
        }
        if let Some(bad) = tracks.iter().find(|t| t.as_str() == CLUSTER || t.is_empty()) {
            bail!("'{bad}' cannot be plotted as a track");
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = tracks.iter().find(|t| !seen.insert(t.as_str())) {
            bail!("track '{dup}' is listed more than once");
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects. Only valid after
    /// [`validate`](Self::validate).
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}
