//! Error types for the ledgerline library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for table construction and row input.
#[derive(Debug, Error)]
pub enum TableError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error deserializing JSON row input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or empty row sequence.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A mandatory metadata column is absent from every row.
    #[error("Required column '{column}' is missing from every row")]
    MissingColumn { column: String },

    /// A facet query named a column no row carries.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Result type alias for ledgerline operations.
pub type Result<T> = std::result::Result<T, TableError>;
