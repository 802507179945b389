use std::fmt;

use serde::Deserialize;

use super::model::{ClusterLabel, LogRecord, LogTable};

// ---------------------------------------------------------------------------
// Hydrocarbon zone label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HcZone {
    Hydrocarbon,
    NonHc,
}

impl HcZone {
    pub fn as_str(self) -> &'static str {
        match self {
            HcZone::Hydrocarbon => "Hydrocarbon",
            HcZone::NonHc => "Non-HC",
        }
    }
}

impl fmt::Display for HcZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Threshold rule
// ---------------------------------------------------------------------------

/// Porous, clean rock is flagged as a hydrocarbon zone:
/// `Porosity > porosity_min AND Vshale < vshale_max`, both strict.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HcRule {
    pub porosity_min: f64,
    pub vshale_max: f64,
}

impl Default for HcRule {
    fn default() -> Self {
        Self {
            porosity_min: 0.15,
            vshale_max: 0.4,
        }
    }
}

impl HcRule {
    /// Missing (NaN) porosity or shale volume always classifies as Non-HC.
    pub fn classify(&self, porosity: f64, vshale: f64) -> HcZone {
        if porosity.is_nan() || vshale.is_nan() {
            return HcZone::NonHc;
        }
        if porosity > self.porosity_min && vshale < self.vshale_max {
            HcZone::Hydrocarbon
        } else {
            HcZone::NonHc
        }
    }

    pub fn classify_record(&self, record: &LogRecord) -> HcZone {
        self.classify(record.porosity, record.vshale)
    }

    /// Recompute labels in place. Labels derive only from porosity and
    /// shale volume, so running this on already-labeled rows is a no-op.
    pub fn relabel(&self, rows: &mut [LabeledRow]) {
        for row in rows {
            row.zone = self.classify(row.porosity, row.vshale);
        }
    }
}

// ---------------------------------------------------------------------------
// Labeled rows
// ---------------------------------------------------------------------------

/// One row of the hydrocarbon-zone preview.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub depth: f64,
    pub porosity: f64,
    pub vshale: f64,
    pub cluster: ClusterLabel,
    pub zone: HcZone,
}

/// Label every row of the (filtered) table, preserving order.
pub fn label_table(table: &LogTable, rule: &HcRule) -> Vec<LabeledRow> {
    table
        .records
        .iter()
        .map(|r| LabeledRow {
            depth: r.depth,
            porosity: r.porosity,
            vshale: r.vshale,
            cluster: r.cluster,
            zone: rule.classify_record(r),
        })
        .collect()
}

/// First `n` rows.
pub fn preview(rows: &[LabeledRow], n: usize) -> &[LabeledRow] {
    &rows[..rows.len().min(n)]
}

/// Tally of labels over a labeled view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneCounts {
    pub hydrocarbon: usize,
    pub non_hc: usize,
}

impl ZoneCounts {
    pub fn tally(rows: &[LabeledRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, r| {
            match r.zone {
                HcZone::Hydrocarbon => acc.hydrocarbon += 1,
                HcZone::NonHc => acc.non_hc += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.hydrocarbon + self.non_hc
    }

    /// Fraction of rows flagged as hydrocarbon, `None` when there are no rows.
    pub fn hydrocarbon_fraction(&self) -> Option<f64> {
        (self.total() > 0).then(|| self.hydrocarbon as f64 / self.total() as f64)
    }
}
