//! Export format selection.

use std::path::Path;

use crate::error::{OutputError, Result};

/// Supported report serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(OutputError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Xlsx => ".xlsx",
        }
    }
}
