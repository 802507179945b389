use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;

use super::model::{
    ClusterLabel, LogRecord, LogTable, CLUSTER, DEPTH, POROSITY, REQUIRED_COLUMNS, VSHALE,
};
use crate::error::{DataLoadError, Result};

// ---------------------------------------------------------------------------
// Schema: which columns a file must provide
// ---------------------------------------------------------------------------

/// Required column set: the fixed core columns plus the configured tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    tracks: Vec<String>,
}

impl Schema {
    pub fn new(tracks: Vec<String>) -> Self {
        Self { tracks }
    }

    /// Ordered track list, as configured.
    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    /// Track columns that are raw curves, i.e. not one of the core columns.
    pub fn curve_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.tracks {
            if !REQUIRED_COLUMNS.contains(&t.as_str()) && !out.contains(t) {
                out.push(t.clone());
            }
        }
        out
    }

    /// Every column the header must contain, core columns first.
    pub fn required_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.curve_names())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Load a log table from a delimited file on disk.
pub fn load_csv(path: &Path, schema: &Schema, delimiter: u8) -> Result<LogTable> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DataLoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    read_table(file, schema, delimiter, path)
}

/// Parse a log table from any reader. `origin` only labels error messages.
///
/// Layout: a header row, then one depth sample per row. Columns not named by
/// the schema are ignored.
pub fn read_table<R: Read>(
    reader: R,
    schema: &Schema,
    delimiter: u8,
    origin: &Path,
) -> Result<LogTable> {
    let csv_err = |source: csv::Error| DataLoadError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let missing: Vec<String> = schema
        .required_columns()
        .into_iter()
        .filter(|c| !headers.contains(c))
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns {
            path: origin.to_path_buf(),
            missing,
        });
    }

    // Every required column is present past this point.
    let index_of = |name: &str| headers.iter().position(|h| h == name).unwrap_or(usize::MAX);
    let depth_idx = index_of(DEPTH);
    let cluster_idx = index_of(CLUSTER);
    let porosity_idx = index_of(POROSITY);
    let vshale_idx = index_of(VSHALE);
    let curve_names = schema.curve_names();
    let curve_idx: Vec<usize> = curve_names.iter().map(|c| index_of(c.as_str())).collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.map_err(csv_err)?;

        let at = CellPos { origin, row };

        let depth = required_f64(&record, depth_idx, at, DEPTH)?;
        let cluster_text = cell(&record, cluster_idx);
        let cluster = ClusterLabel::parse(cluster_text)
            .ok_or_else(|| at.invalid(CLUSTER, cluster_text))?;
        let porosity = optional_f64(&record, porosity_idx, at, POROSITY)?;
        let vshale = optional_f64(&record, vshale_idx, at, VSHALE)?;
        let curves = curve_idx
            .iter()
            .zip(&curve_names)
            .map(|(&idx, name)| optional_f64(&record, idx, at, name))
            .collect::<Result<Vec<f64>>>()?;

        records.push(LogRecord {
            depth,
            porosity,
            vshale,
            cluster,
            curves,
        });
    }

    Ok(LogTable::new(curve_names, records))
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// File and 1-based data row of the cell being parsed.
#[derive(Clone, Copy)]
struct CellPos<'a> {
    origin: &'a Path,
    row: usize,
}

impl CellPos<'_> {
    fn invalid(self, column: &str, value: &str) -> DataLoadError {
        DataLoadError::InvalidValue {
            path: self.origin.to_path_buf(),
            row: self.row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

fn required_f64(record: &StringRecord, idx: usize, at: CellPos<'_>, column: &str) -> Result<f64> {
    let text = cell(record, idx);
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(at.invalid(column, text)),
    }
}

/// Empty and NA-style cells become NaN; anything else must parse.
fn optional_f64(record: &StringRecord, idx: usize, at: CellPos<'_>, column: &str) -> Result<f64> {
    let text = cell(record, idx);
    if is_missing(text) {
        return Ok(f64::NAN);
    }
    text.parse::<f64>().map_err(|_| at.invalid(column, text))
}

/// Missing-value markers written by common dataframe and spreadsheet tools,
/// compared case-insensitively.
const MISSING_MARKERS: [&str; 14] = [
    "nan", "-nan", "na", "n/a", "#n/a", "#n/a n/a", "#na", "<na>", "null", "none", "1.#ind",
    "-1.#ind", "1.#qnan", "-1.#qnan",
];

fn is_missing(s: &str) -> bool {
    s.is_empty() || MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m))
}

// ---------------------------------------------------------------------------
// Load cache
// ---------------------------------------------------------------------------

/// Memoizes loaded tables by path for the lifetime of the session.
///
/// There is no invalidation: a path is read at most once until [`clear`]
/// is called. Failed loads are not cached.
///
/// [`clear`]: LoadCache::clear
#[derive(Debug)]
pub struct LoadCache {
    schema: Schema,
    delimiter: u8,
    tables: HashMap<PathBuf, Arc<LogTable>>,
    reads: usize,
}

impl LoadCache {
    pub fn new(schema: Schema, delimiter: u8) -> Self {
        Self {
            schema,
            delimiter,
            tables: HashMap::new(),
            reads: 0,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the cached table for `path`, reading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<LogTable>> {
        if let Some(table) = self.tables.get(path) {
            log::debug!("Load cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        self.reads += 1;
        let table = Arc::new(load_csv(path, &self.schema, self.delimiter)?);
        log::info!(
            "Loaded {} rows from {} ({} clusters, curves {:?})",
            table.len(),
            path.display(),
            table.clusters().len(),
            table.curve_names
        );
        self.tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// How many times storage was actually read.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Drop every cached table and reset the read counter.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.reads = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn density_neutron() -> Schema {
        Schema::new(
            ["GR", "RHOB", "NPHI", "Vshale", "Porosity"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    fn parse(text: &str) -> Result<LogTable> {
        read_table(text.as_bytes(), &density_neutron(), b',', Path::new("test.csv"))
    }

    const SAMPLE: &str = "\
,DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster
0,100.0,45.2,2.31,0.21,0.30,0.20,1
1,150.0,80.1,2.55,0.12,0.10,0.10,1
2,200.0,50.3,2.28,0.25,0.39,0.16,2
";

    #[test]
    fn test_schema_curve_names_skip_core_columns() {
        let schema = density_neutron();
        assert_eq!(schema.curve_names(), vec!["GR", "RHOB", "NPHI"]);
        assert_eq!(
            schema.required_columns(),
            vec!["DEPTH", "Cluster", "Porosity", "Vshale", "GR", "RHOB", "NPHI"]
        );
    }

    #[test]
    fn test_read_table_parses_rows_in_order() {
        let table = parse(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.curve_names, vec!["GR", "RHOB", "NPHI"]);
        let depths: Vec<f64> = table.records.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![100.0, 150.0, 200.0]);
        let r = &table.records[2];
        assert_eq!(r.cluster, ClusterLabel(2));
        assert_eq!(r.porosity, 0.16);
        assert_eq!(r.vshale, 0.39);
        assert_eq!(r.curves, vec![50.3, 2.28, 0.25]);
    }

    #[test]
    fn test_missing_columns_are_all_named() {
        let text = "DEPTH,GR,DT,PE,Vshale,Porosity,Cluster\n100,1,2,3,0.1,0.2,1\n";
        match parse(text) {
            Err(DataLoadError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["RHOB", "NPHI"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_core_column() {
        let text = "DEPTH,GR,RHOB,NPHI,Porosity\n100,1,2,3,0.2\n";
        match parse(text) {
            Err(DataLoadError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["Cluster", "Vshale"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_markers_read_as_nan() {
        for marker in ["NA", "na", "null", "NULL", "N/A", "#N/A", "<NA>", "None", "nan", "-NaN"] {
            let text = format!(
                "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n100,1,2,3,{marker},0.2,1\n"
            );
            let table = parse(&text).unwrap_or_else(|e| panic!("{marker}: {e}"));
            assert!(table.records[0].vshale.is_nan(), "{marker} should read as NaN");
        }
    }

    #[test]
    fn test_invalid_value_names_the_file() {
        let text = "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n100,1,2,3,high,0.2,1\n";
        let err = parse(text).unwrap_err();
        match &err {
            DataLoadError::InvalidValue { path, column, .. } => {
                assert_eq!(path, Path::new("test.csv"));
                assert_eq!(column, "Vshale");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        assert!(err.to_string().starts_with("test.csv row 1:"));
    }

    #[test]
    fn test_empty_cells_read_as_nan() {
        let text = "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n100,,2.3,NaN,,0.2,1\n";
        let table = parse(text).unwrap();
        let r = &table.records[0];
        assert!(r.vshale.is_nan());
        assert!(r.curves[0].is_nan());
        assert!(r.curves[2].is_nan());
        assert_eq!(r.curves[1], 2.3);
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        let text = "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n\
                    100,1,2,3,0.1,0.2,1\n\
                    ,1,2,3,0.1,0.2,1\n";
        match parse(text) {
            Err(DataLoadError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "DEPTH");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_cluster_and_garbage_curve_are_rejected() {
        let bad_cluster = "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n100,1,2,3,0.1,0.2,x\n";
        assert!(matches!(
            parse(bad_cluster),
            Err(DataLoadError::InvalidValue { ref column, .. }) if column == "Cluster"
        ));
        let bad_curve = "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n100,abc,2,3,0.1,0.2,1\n";
        assert!(matches!(
            parse(bad_curve),
            Err(DataLoadError::InvalidValue { ref column, .. }) if column == "GR"
        ));
    }

    #[test]
    fn test_header_only_file_is_an_empty_table() {
        let table = parse("DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let text = "DEPTH,GR,RHOB,NPHI,Vshale,Porosity,Cluster\n100,1,2\n";
        assert!(matches!(parse(text), Err(DataLoadError::Csv { .. })));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let text = "DEPTH;GR;RHOB;NPHI;Vshale;Porosity;Cluster\n100;1;2;3;0.1;0.2;4\n";
        let table = read_table(text.as_bytes(), &density_neutron(), b';', Path::new("t")).unwrap();
        assert_eq!(table.records[0].cluster, ClusterLabel(4));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(matches!(
            load_csv(&path, &density_neutron(), b','),
            Err(DataLoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_cache_reads_storage_once_per_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let mut cache = LoadCache::new(density_neutron(), b',');
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();

        assert_eq!(cache.reads(), 1);
        assert_eq!(*first, *second);
        assert!(Arc::ptr_eq(&first, &second));

        cache.clear();
        assert_eq!(cache.reads(), 0);
        let reloaded = cache.get_or_load(file.path()).unwrap();
        assert_eq!(cache.reads(), 1);
        assert!(!Arc::ptr_eq(&first, &reloaded));
    }

    #[test]
    fn test_cache_ignores_file_changes_within_session() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let mut cache = LoadCache::new(density_neutron(), b',');
        let before = cache.get_or_load(file.path()).unwrap();

        file.write_all(b"3,250.0,1,2,3,0.1,0.2,3\n").unwrap();
        let after = cache.get_or_load(file.path()).unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(cache.reads(), 1);
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let mut cache = LoadCache::new(density_neutron(), b',');
        assert!(cache.get_or_load(&path).is_err());
        assert_eq!(cache.reads(), 1);

        std::fs::write(&path, SAMPLE).unwrap();
        let table = cache.get_or_load(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(cache.reads(), 2);
    }
}
