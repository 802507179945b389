use std::collections::BTreeSet;

use super::model::{ClusterLabel, LogRecord, LogTable};

// ---------------------------------------------------------------------------
// Filter predicate: depth interval AND cluster membership
// ---------------------------------------------------------------------------

/// Current filter selection.
///
/// The depth interval is closed on both ends. An empty `clusters` set means
/// "no cluster filter" (show all), not "show nothing".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub depth_min: f64,
    pub depth_max: f64,
    pub clusters: BTreeSet<ClusterLabel>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            depth_min: f64::NEG_INFINITY,
            depth_max: f64::INFINITY,
            clusters: BTreeSet::new(),
        }
    }
}

impl FilterState {
    /// Whole depth range, every cluster selected (i.e., show everything).
    pub fn full(table: &LogTable) -> Self {
        let (depth_min, depth_max) = table
            .depth_range()
            .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        Self {
            depth_min,
            depth_max,
            clusters: table.clusters(),
        }
    }

    /// Clamp both bounds into `[lo, hi]`. The bounds are not reordered, so a
    /// crossed selection stays crossed and keeps filtering to nothing.
    pub fn clamp_to(&mut self, (lo, hi): (f64, f64)) {
        self.depth_min = self.depth_min.clamp(lo, hi);
        self.depth_max = self.depth_max.clamp(lo, hi);
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        let in_depth = record.depth >= self.depth_min && record.depth <= self.depth_max;
        let in_cluster = self.clusters.is_empty() || self.clusters.contains(&record.cluster);
        in_depth && in_cluster
    }
}

/// Return indices of rows that pass the filter, in table order.
pub fn filtered_indices(table: &LogTable, state: &FilterState) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| state.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Build the filtered view as a new table. `depth_min > depth_max` yields an
/// empty table rather than an error.
pub fn filter(
    table: &LogTable,
    depth_min: f64,
    depth_max: f64,
    clusters: &BTreeSet<ClusterLabel>,
) -> LogTable {
    let state = FilterState {
        depth_min,
        depth_max,
        clusters: clusters.clone(),
    };
    filter_table(table, &state)
}

pub fn filter_table(table: &LogTable, state: &FilterState) -> LogTable {
    let records = table
        .records
        .iter()
        .filter(|r| state.matches(r))
        .cloned()
        .collect();
    table.with_records(records)
}
