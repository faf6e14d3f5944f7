//! Error types for source loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning raw input into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Format Errors ===
    /// Extension is neither delimited text nor a spreadsheet container.
    #[error("unsupported file format: '{extension}' (expected csv, tsv, txt, xlsx, xlsm or xls)")]
    UnsupportedFormat { extension: String },

    /// Input starts with a byte order mark for an encoding we do not read.
    #[error("unsupported text encoding: {encoding}")]
    UnsupportedEncoding { encoding: &'static str },

    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file too large: {size} bytes (limit {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    // === Parsing Errors ===
    /// Delimited text could not be parsed.
    #[error("failed to parse delimited text: {message}")]
    CsvParse { message: String },

    /// Spreadsheet container could not be opened or read.
    #[error("failed to read spreadsheet: {message}")]
    Spreadsheet { message: String },

    /// Workbook has no worksheets.
    #[error("spreadsheet contains no worksheets")]
    NoSheets,

    /// No header row could be found.
    #[error("could not detect a header row")]
    NoHeader,

    /// Header present but no data rows.
    #[error("table is empty: no data rows below the header")]
    EmptyTable,

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParse {
            message: err.to_string(),
        }
    }
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Spreadsheet {
            message: err.to_string(),
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            extension: "pdf".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format: 'pdf' (expected csv, tsv, txt, xlsx, xlsm or xls)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
