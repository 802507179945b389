use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading a log table.
///
/// Load failures are fatal for the requested file: nothing is cached and the
/// caller decides how to surface the message.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The file does not exist.
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a well-formed delimited table.
    #[error("Malformed table in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row lacks one or more required columns.
    #[error("{} is missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// A strictly required cell (DEPTH, Cluster) could not be parsed.
    #[error("{} row {row}: invalid {column} value '{value}'", path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, DataLoadError>;
