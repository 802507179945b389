use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const DEPTH: &str = "DEPTH";
pub const CLUSTER: &str = "Cluster";
pub const POROSITY: &str = "Porosity";
pub const VSHALE: &str = "Vshale";

/// Columns every log table must carry, whatever its track set.
pub const REQUIRED_COLUMNS: [&str; 4] = [DEPTH, CLUSTER, POROSITY, VSHALE];

// ---------------------------------------------------------------------------
// ClusterLabel – externally assigned lithofacies label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterLabel(pub i64);

impl ClusterLabel {
    /// Parse a cluster cell. Integral float text (`"2.0"`) is accepted since
    /// dataframe writers emit it for integer columns that once held NaN.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(i) = s.parse::<i64>() {
            return Some(ClusterLabel(i));
        }
        let f = s.parse::<f64>().ok()?;
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            Some(ClusterLabel(f as i64))
        } else {
            None
        }
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// LogRecord – one depth sample
// ---------------------------------------------------------------------------

/// One row of the log table.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub depth: f64,
    /// Fractional porosity; NaN when the source cell was empty.
    pub porosity: f64,
    /// Shale volume fraction; NaN when the source cell was empty.
    pub vshale: f64,
    pub cluster: ClusterLabel,
    /// Curve values aligned with [`LogTable::curve_names`].
    pub curves: Vec<f64>,
}

// ---------------------------------------------------------------------------
// LogTable – the loaded dataset
// ---------------------------------------------------------------------------

/// Ordered, depth-indexed log samples. Never mutated after load; filtering
/// builds a new table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogTable {
    /// Raw curve columns carried per record (excludes DEPTH, Cluster,
    /// Porosity, Vshale).
    pub curve_names: Vec<String>,
    pub records: Vec<LogRecord>,
}

impl LogTable {
    pub fn new(curve_names: Vec<String>, records: Vec<LogRecord>) -> Self {
        Self {
            curve_names,
            records,
        }
    }

    /// Same curve set, different rows.
    pub fn with_records(&self, records: Vec<LogRecord>) -> Self {
        Self {
            curve_names: self.curve_names.clone(),
            records,
        }
    }

    /// Number of depth samples.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` of DEPTH, or `None` for an empty table.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        self.records.iter().fold(None, |acc, r| match acc {
            None => Some((r.depth, r.depth)),
            Some((lo, hi)) => Some((lo.min(r.depth), hi.max(r.depth))),
        })
    }

    /// Distinct cluster labels in ascending order.
    pub fn clusters(&self) -> BTreeSet<ClusterLabel> {
        self.records.iter().map(|r| r.cluster).collect()
    }

    /// Resolve a numeric column by name.
    pub fn column(&self, name: &str) -> Option<ColumnRef> {
        match name {
            DEPTH => Some(ColumnRef::Depth),
            POROSITY => Some(ColumnRef::Porosity),
            VSHALE => Some(ColumnRef::Vshale),
            CLUSTER => None,
            other => self
                .curve_names
                .iter()
                .position(|c| c == other)
                .map(ColumnRef::Curve),
        }
    }

    /// Numeric cell of `record` in the column named `name`.
    pub fn value(&self, record: &LogRecord, name: &str) -> Option<f64> {
        self.column(name).map(|c| c.get(record))
    }
}

/// A resolved numeric column, so per-row lookups avoid string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    Depth,
    Porosity,
    Vshale,
    Curve(usize),
}

impl ColumnRef {
    pub fn get(self, record: &LogRecord) -> f64 {
        match self {
            ColumnRef::Depth => record.depth,
            ColumnRef::Porosity => record.porosity,
            ColumnRef::Vshale => record.vshale,
            ColumnRef::Curve(i) => record.curves.get(i).copied().unwrap_or(f64::NAN),
        }
    }
}
