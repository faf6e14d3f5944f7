//! XLSX export.

use std::path::Path;

use polars::prelude::{AnyValue, DataFrame};
use recon_common::{any_to_f64, any_to_string};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::Result;

/// Worksheet name of exported reports.
pub const REPORT_SHEET_NAME: &str = "Relatorio";

/// Serializes `df` into an in-memory XLSX workbook.
pub fn write_xlsx_buffer(df: &DataFrame) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(df)?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes `df` as an XLSX workbook at `path`.
pub fn write_xlsx(df: &DataFrame, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(df)?;
    workbook.save(path)?;
    Ok(())
}

fn build_workbook(df: &DataFrame) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_NAME)?;
    fill_worksheet(worksheet, df)?;
    Ok(workbook)
}

fn fill_worksheet(worksheet: &mut Worksheet, df: &DataFrame) -> Result<()> {
    let header_format = Format::new().set_bold();

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(col_idx).unwrap_or(u16::MAX);
        let name = column.name().as_str();
        worksheet.write_string_with_format(0, col, name, &header_format)?;

        let mut width = name.chars().count();
        for idx in 0..df.height() {
            let row = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            match column.get(idx)? {
                AnyValue::Null => {}
                value @ (AnyValue::String(_) | AnyValue::StringOwned(_) | AnyValue::Boolean(_)) => {
                    let text = any_to_string(value);
                    width = width.max(text.chars().count());
                    worksheet.write_string(row, col, &text)?;
                }
                value => match any_to_f64(value.clone()) {
                    Some(number) => {
                        worksheet.write_number(row, col, number)?;
                    }
                    None => {
                        let text = any_to_string(value);
                        width = width.max(text.chars().count());
                        worksheet.write_string(row, col, &text)?;
                    }
                },
            }
        }
        worksheet.set_column_width(col, (width.min(60) + 2) as f64)?;
    }
    Ok(())
}
