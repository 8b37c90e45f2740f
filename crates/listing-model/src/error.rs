use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported encoding in {path}: {encoding} (expected UTF-8)")]
    UnsupportedEncoding { path: PathBuf, encoding: &'static str },
    #[error("failed to parse {path} as CSV: {message}")]
    CsvParse { path: PathBuf, message: String },
    #[error("{path} contains no data rows")]
    EmptyDataFrame { path: PathBuf },
    #[error("{path} has an empty column name in its header row")]
    EmptyColumnName { path: PathBuf },
    #[error("input is missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
