//! Delimited text export.

use std::io::Write;

use polars::prelude::DataFrame;
use recon_common::any_to_string;

use crate::error::Result;

/// Writes `df` as delimited text: header row, then one record per row.
///
/// Nulls become empty fields; numbers use their shortest form (`10`, `2.5`).
pub fn write_csv<W: Write>(df: &DataFrame, writer: W, delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let columns = df.get_columns();
    csv_writer.write_record(columns.iter().map(|column| column.name().as_str()))?;

    let mut record = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(idx)?));
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
