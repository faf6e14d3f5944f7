//! Error types for report export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output path has no supported extension.
    #[error("unsupported output format: '{extension}' (expected csv or xlsx)")]
    UnsupportedFormat { extension: String },

    /// Failed to create or write the output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited text writer failure.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet writer failure.
    #[error("XLSX write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Failed DataFrame access.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
