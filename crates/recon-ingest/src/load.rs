//! Source loading entry points.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use recon_model::ColumnNormalizer;
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::format::TableFormat;
use crate::options::IngestOptions;
use crate::spreadsheet::read_workbook;
use crate::table::RawTable;
use crate::text::{decode_text, read_delimited, sniff_delimiter};

/// A table loaded from disk.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub format: TableFormat,
    /// Size of the source file in bytes.
    pub size: u64,
    pub frame: DataFrame,
}

/// Parses raw bytes into a string table with canonical headers.
///
/// `extension` is the declared file extension (`"csv"`, `".xlsx"`, ...).
/// Every cell is kept as nullable text; numeric coercion happens in the
/// pipeline stages.
pub fn load_table(bytes: &[u8], extension: &str, options: &IngestOptions) -> Result<DataFrame> {
    let mut normalizer = ColumnNormalizer::new();
    load_table_with(bytes, extension, options, &mut normalizer)
}

/// Same as [`load_table`], reusing a caller-owned normalizer.
pub fn load_table_with(
    bytes: &[u8],
    extension: &str,
    options: &IngestOptions,
    normalizer: &mut ColumnNormalizer,
) -> Result<DataFrame> {
    let format = TableFormat::from_extension(extension)?;
    let size = bytes.len() as u64;
    if size > options.max_file_size {
        return Err(IngestError::FileTooLarge {
            size,
            max_size: options.max_file_size,
        });
    }

    let raw = parse(bytes, format)?;
    let df = raw.into_dataframe(normalizer)?;

    if df.height() > options.row_warning_threshold {
        warn!(
            rows = df.height(),
            threshold = options.row_warning_threshold,
            "large input, consider splitting the file"
        );
    }
    Ok(df)
}

fn parse(bytes: &[u8], format: TableFormat) -> Result<RawTable> {
    if !format.is_text() {
        return read_workbook(bytes);
    }
    let content = decode_text(bytes)?;
    let delimiter = format
        .fixed_delimiter()
        .unwrap_or_else(|| sniff_delimiter(&content));
    tracing::debug!(delimiter = %char::from(delimiter).escape_default(), "parsing delimited text");
    read_delimited(&content, delimiter)
}

/// Loads a file after checking existence, extension and size.
pub fn load_path(path: &Path, options: &IngestOptions) -> Result<LoadedTable> {
    let mut normalizer = ColumnNormalizer::new();
    load_path_with(path, options, &mut normalizer)
}

/// Same as [`load_path`], reusing a caller-owned normalizer across files.
pub fn load_path_with(
    path: &Path,
    options: &IngestOptions,
    normalizer: &mut ColumnNormalizer,
) -> Result<LoadedTable> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let format = TableFormat::from_path(path)?;
    if metadata.len() > options.max_file_size {
        return Err(IngestError::FileTooLarge {
            size: metadata.len(),
            max_size: options.max_file_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let frame = load_table_with(&bytes, extension, options, normalizer)?;

    info!(
        path = %path.display(),
        size = metadata.len(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded file"
    );

    Ok(LoadedTable {
        path: path.to_path_buf(),
        format,
        size: metadata.len(),
        frame,
    })
}
