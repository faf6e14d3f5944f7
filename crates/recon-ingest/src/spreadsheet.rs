//! Spreadsheet container reading (first worksheet only).

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use recon_common::format_numeric;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Reads the first worksheet of an `xlsx`/`xlsm`/`xls` buffer.
///
/// The first non-blank row is the header. Every cell is rendered as text.
pub fn read_workbook(bytes: &[u8]) -> Result<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names();
    let Some(first) = sheet_names.first() else {
        return Err(IngestError::NoSheets);
    };
    tracing::debug!(sheet = %first, sheets = sheet_names.len(), "reading worksheet");
    let range = workbook.worksheet_range(first)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .skip_while(|row| row.iter().all(Option::is_none));

    let Some(header) = rows.next() else {
        return Err(IngestError::NoHeader);
    };
    let headers = header
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();

    Ok(RawTable::new(headers, rows.collect()))
}

/// Renders one cell as text; blanks and error cells become `None`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(n) => {
            // Integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format_numeric(*n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format_numeric(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}
