//! Report export for stock reconciliation.
//!
//! Serializes the final report table as delimited text or as an XLSX
//! workbook, keeping the column order and display headers of the table.

mod delimited;
mod error;
mod format;
mod naming;
mod xlsx;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

// === Error Types ===
pub use error::{OutputError, Result};

// === Writers ===
pub use delimited::write_csv;
pub use format::ExportFormat;
pub use xlsx::{REPORT_SHEET_NAME, write_xlsx, write_xlsx_buffer};

// === Naming ===
pub use naming::{DEFAULT_REPORT_BASENAME, output_name_at, unique_output_name, unique_output_path};

/// Writes the report to `path`, choosing the format from its extension.
///
/// Missing parent directories are created. CSV output is comma separated.
pub fn export_report(df: &DataFrame, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    ensure_parent_dir(path)?;

    match format {
        ExportFormat::Csv => {
            let file = File::create(path).map_err(|source| OutputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            write_csv(df, BufWriter::new(file), b',')?;
        }
        ExportFormat::Xlsx => write_xlsx(df, path)?,
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        format = ?format,
        "report written"
    );
    Ok(format)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
