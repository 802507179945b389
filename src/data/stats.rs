use std::collections::BTreeMap;

use super::model::{ClusterLabel, ColumnRef, LogTable};

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// count / mean / std / min / quartiles / max of one column within one group.
///
/// NaN cells are excluded, so `count` is the number of finite-or-infinite
/// values actually summarized. With `count == 0` every other field is NaN;
/// with `count < 2` the standard deviation is NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    fn from_sorted(sorted: &[f64]) -> Self {
        let count = sorted.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        // Summing in sorted order makes the result independent of row order.
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        };

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(sorted, 0.25),
            q50: quantile(sorted, 0.50),
            q75: quantile(sorted, 0.75),
            max: sorted[count - 1],
        }
    }
}

/// `q`-quantile (0.0..=1.0) of a **sorted** slice, linearly
/// interpolated between the closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

// ---------------------------------------------------------------------------
// Per-cluster summary
// ---------------------------------------------------------------------------

/// Column name → statistics, in the order the columns were requested.
pub type ClusterSummary = Vec<(String, DescriptiveStats)>;

/// Group rows by cluster and describe each requested column.
///
/// Only clusters that have rows appear in the result, so an empty table
/// yields an empty map. Unknown (or non-numeric) column names are skipped.
pub fn summarize(
    table: &LogTable,
    columns: &[String],
) -> BTreeMap<ClusterLabel, ClusterSummary> {
    let resolved: Vec<(&String, ColumnRef)> = columns
        .iter()
        .filter_map(|name| match table.column(name) {
            Some(col) => Some((name, col)),
            None => {
                log::warn!("Skipping unknown summary column '{name}'");
                None
            }
        })
        .collect();

    let mut groups: BTreeMap<ClusterLabel, Vec<Vec<f64>>> = BTreeMap::new();
    for record in &table.records {
        let values = groups
            .entry(record.cluster)
            .or_insert_with(|| vec![Vec::new(); resolved.len()]);
        for (slot, (_, col)) in values.iter_mut().zip(&resolved) {
            slot.push(col.get(record));
        }
    }

    groups
        .into_iter()
        .map(|(cluster, per_column)| {
            let summary = resolved
                .iter()
                .zip(per_column)
                .map(|((name, _), values)| {
                    ((*name).clone(), DescriptiveStats::from_values(&values))
                })
                .collect();
            (cluster, summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::tests::{record, scenario_table};
    use crate::data::model::{LogTable, POROSITY, VSHALE};
    use std::collections::BTreeSet;

    const EPS: f64 = 1e-12;

    fn columns() -> Vec<String> {
        vec![POROSITY.to_string(), VSHALE.to_string()]
    }

    fn stats_for<'a>(summary: &'a ClusterSummary, name: &str) -> &'a DescriptiveStats {
        &summary.iter().find(|(n, _)| n == name).unwrap().1
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&data, 0.5) - 2.5).abs() < EPS);
        assert!((quantile(&data, 0.25) - 1.75).abs() < EPS);
        assert!((quantile(&data, 0.75) - 3.25).abs() < EPS);
        assert_eq!(quantile(&data, 0.0), 1.0);
        assert_eq!(quantile(&data, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.25), 7.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_describe_matches_hand_computed_values() {
        let s = DescriptiveStats::from_values(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < EPS);
        // Sample variance of 1..4 = 5/3
        assert!((s.std - (5.0f64 / 3.0).sqrt()).abs() < EPS);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert!((s.q50 - 2.5).abs() < EPS);
    }

    #[test]
    fn test_single_value_has_nan_std() {
        let s = DescriptiveStats::from_values(&[0.16]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 0.16);
        assert!(s.std.is_nan());
        assert_eq!((s.min, s.q25, s.q50, s.q75, s.max), (0.16, 0.16, 0.16, 0.16, 0.16));
    }

    #[test]
    fn test_nan_values_are_excluded() {
        let s = DescriptiveStats::from_values(&[f64::NAN, 0.2, 0.4, f64::NAN]);
        assert_eq!(s.count, 2);
        assert!((s.mean - 0.3).abs() < EPS);

        let empty = DescriptiveStats::from_values(&[f64::NAN]);
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan() && empty.min.is_nan() && empty.max.is_nan());
    }

    #[test]
    fn test_summarize_groups_by_cluster() {
        let out = summarize(&scenario_table(), &columns());
        let clusters: Vec<ClusterLabel> = out.keys().copied().collect();
        assert_eq!(clusters, vec![ClusterLabel(1), ClusterLabel(2)]);

        let c1 = &out[&ClusterLabel(1)];
        let names: Vec<&str> = c1.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Porosity", "Vshale"]);
        let por = stats_for(c1, POROSITY);
        assert_eq!(por.count, 2);
        assert!((por.mean - 0.15).abs() < EPS);
        assert_eq!(por.min, 0.10);
        assert_eq!(por.max, 0.20);
    }

    #[test]
    fn test_summary_of_single_row_cluster() {
        let table = scenario_table();
        let view = filter(&table, 100.0, 200.0, &[ClusterLabel(2)].into_iter().collect());
        let out = summarize(&view, &columns());
        assert_eq!(out.len(), 1);
        let por = stats_for(&out[&ClusterLabel(2)], POROSITY);
        assert_eq!(por.count, 1);
        assert!(por.std.is_nan());
    }

    #[test]
    fn test_empty_table_yields_empty_summary() {
        let table = scenario_table();
        let view = filter(&table, 300.0, 100.0, &BTreeSet::new());
        assert!(summarize(&view, &columns()).is_empty());
    }

    #[test]
    fn test_unknown_column_is_skipped() {
        let out = summarize(
            &scenario_table(),
            &["Porosity".to_string(), "RHOB".to_string()],
        );
        assert_eq!(out[&ClusterLabel(1)].len(), 1);
    }

    #[test]
    fn test_summary_is_independent_of_row_order() {
        let rows = vec![
            record(1.0, 0.1, 0.7, 1),
            record(2.0, 0.3, 0.2, 1),
            record(3.0, 0.21, 0.05, 1),
            record(4.0, 0.17, 0.33, 1),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        let a = summarize(&LogTable::new(vec![], rows), &columns());
        let b = summarize(&LogTable::new(vec![], reversed), &columns());
        assert_eq!(a, b);
    }
}
