//! Input format detection from file extensions.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Supported input containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    /// Comma, semicolon or tab separated text; delimiter is sniffed.
    Csv,
    /// Tab separated text.
    Tsv,
    /// Plain text export; delimiter is sniffed.
    Text,
    /// Excel workbook (`xlsx`, `xlsm`, `xls`); first worksheet is read.
    Spreadsheet,
}

impl TableFormat {
    /// Resolves a declared extension (`"csv"`, `".XLSX"`, ...).
    pub fn from_extension(extension: &str) -> Result<Self> {
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "tsv" => Ok(TableFormat::Tsv),
            "txt" => Ok(TableFormat::Text),
            "xlsx" | "xlsm" | "xls" => Ok(TableFormat::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Resolves the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn label(self) -> &'static str {
        match self {
            TableFormat::Csv => "CSV",
            TableFormat::Tsv => "TSV",
            TableFormat::Text => "TXT",
            TableFormat::Spreadsheet => "Excel",
        }
    }

    pub fn is_text(self) -> bool {
        !matches!(self, TableFormat::Spreadsheet)
    }

    /// Delimiter implied by the format, if any.
    pub fn fixed_delimiter(self) -> Option<u8> {
        match self {
            TableFormat::Tsv => Some(b'\t'),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_extensions() {
        assert_eq!(TableFormat::from_extension("csv").unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_extension(".CSV").unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_extension("tsv").unwrap(), TableFormat::Tsv);
        assert_eq!(
            TableFormat::from_extension("xls").unwrap(),
            TableFormat::Spreadsheet
        );
        assert_eq!(
            TableFormat::from_path(Path::new("dir/Estoque.xlsx")).unwrap(),
            TableFormat::Spreadsheet
        );
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = TableFormat::from_extension("pdf").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
        assert!(TableFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn only_tsv_fixes_the_delimiter() {
        assert_eq!(TableFormat::Tsv.fixed_delimiter(), Some(b'\t'));
        assert_eq!(TableFormat::Csv.fixed_delimiter(), None);
        assert!(!TableFormat::Spreadsheet.is_text());
    }
}
