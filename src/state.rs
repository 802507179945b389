use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::ExplorerConfig;
use crate::data::classify::{label_table, preview, LabeledRow, ZoneCounts};
use crate::data::filter::{filter_table, FilterState};
use crate::data::loader::{LoadCache, Schema};
use crate::data::model::{ClusterLabel, LogTable};
use crate::data::stats::{summarize, ClusterSummary};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// Everything the presentation layer shows for one filter selection.
/// Rebuilt from scratch on every filter change.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub table: LogTable,
    pub summary: BTreeMap<ClusterLabel, ClusterSummary>,
    pub labeled: Vec<LabeledRow>,
    pub zone_counts: ZoneCounts,
}

impl View {
    pub fn build(source: &LogTable, filters: &FilterState, config: &ExplorerConfig) -> Self {
        let table = filter_table(source, filters);
        let summary = summarize(&table, &config.summary_columns);
        let labeled = label_table(&table, &config.hc_rule);
        let zone_counts = ZoneCounts::tally(&labeled);
        Self {
            table,
            summary,
            labeled,
            zone_counts,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// Loaded tables by path; owned here so each session has its own.
    pub cache: LoadCache,

    /// The table being explored (None until a file is loaded).
    pub table: Option<Arc<LogTable>>,

    /// Path of the table being explored.
    pub source_path: Option<PathBuf>,

    /// Current depth / cluster selection.
    pub filters: FilterState,

    /// Filtered table and its derived outputs (cached).
    pub view: View,

    /// One colour per configured track.
    pub track_colors: ColorMap<String>,

    /// One colour per cluster label of the loaded table.
    pub cluster_colors: ColorMap<ClusterLabel>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        let tracks = config.tracks.columns();
        let cache = LoadCache::new(Schema::new(tracks.clone()), config.delimiter_byte());
        Self {
            config,
            cache,
            table: None,
            source_path: None,
            filters: FilterState::default(),
            view: View::default(),
            track_colors: ColorMap::new(&tracks),
            cluster_colors: ColorMap::new(std::iter::empty()),
            status_message: None,
        }
    }

    /// Ordered track columns to plot.
    pub fn tracks(&self) -> &[String] {
        self.cache.schema().tracks()
    }

    /// Load (or fetch from cache) `path` and make it the active table.
    ///
    /// On failure the previous table stays active and the error is kept as
    /// the status message.
    pub fn open(&mut self, path: &Path) -> Result<(), DataLoadError> {
        match self.cache.get_or_load(path) {
            Ok(table) => {
                self.source_path = Some(path.to_path_buf());
                self.set_table(table);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded table, reset filters and colours.
    pub fn set_table(&mut self, table: Arc<LogTable>) {
        self.filters = FilterState::full(&table);
        self.cluster_colors = ColorMap::new(&table.clusters());
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Global DEPTH range of the active table.
    pub fn depth_bounds(&self) -> Option<(f64, f64)> {
        self.table.as_ref().and_then(|t| t.depth_range())
    }

    /// Cluster labels of the active table.
    pub fn all_clusters(&self) -> Vec<ClusterLabel> {
        self.table
            .as_ref()
            .map(|t| t.clusters().into_iter().collect())
            .unwrap_or_default()
    }

    /// Recompute the view after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            if let Some(bounds) = table.depth_range() {
                self.filters.clamp_to(bounds);
            }
            self.view = View::build(table, &self.filters, &self.config);
            log::debug!(
                "Filter [{}, {}] clusters {:?} → {} rows",
                self.filters.depth_min,
                self.filters.depth_max,
                self.filters.clusters,
                self.view.table.len()
            );
        }
    }

    pub fn set_depth_range(&mut self, depth_min: f64, depth_max: f64) {
        self.filters.depth_min = depth_min;
        self.filters.depth_max = depth_max;
        self.refilter();
    }

    /// Toggle a single cluster in the selection.
    pub fn toggle_cluster(&mut self, cluster: ClusterLabel) {
        if !self.filters.clusters.remove(&cluster) {
            self.filters.clusters.insert(cluster);
        }
        self.refilter();
    }

    /// Select every cluster.
    pub fn select_all(&mut self) {
        if let Some(table) = &self.table {
            self.filters.clusters = table.clusters();
            self.refilter();
        }
    }

    /// Clear the selection. An empty selection applies no cluster filter.
    pub fn select_none(&mut self) {
        self.filters.clusters.clear();
        self.refilter();
    }

    /// Rows shown in the hydrocarbon-zone preview.
    pub fn preview_rows(&self) -> &[LabeledRow] {
        preview(&self.view.labeled, self.config.preview_rows)
    }
}
