//! Source loaders for stock reconciliation.
//!
//! Turns the three ERP exports (order status, traceability, stock on hand)
//! into Polars DataFrames of nullable string cells with canonical headers.
//!
//! # Features
//!
//! - **Delimited text**: comma, semicolon or tab separated, delimiter sniffed
//! - **Spreadsheets**: `xlsx`, `xlsm` and `xls`, first worksheet
//! - **Encoding**: UTF-8 with or without BOM, Windows-1252 fallback
//! - **Header normalization**: every header mapped through the column vocabulary
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use recon_ingest::{IngestOptions, load_path, load_table};
//!
//! let status = load_path(Path::new("Status_da_Ordem.xlsx"), &IngestOptions::default())?;
//! let stock = load_table(b"Item;Endereco;Qtd Atual\nITEM001;A0001;5\n", "csv", &IngestOptions::default())?;
//! ```

mod error;
mod format;
mod load;
mod options;
mod spreadsheet;
mod table;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === Options ===
pub use options::{DEFAULT_MAX_FILE_SIZE, DEFAULT_ROW_WARNING_THRESHOLD, IngestOptions};

// === Loading ===
pub use format::TableFormat;
pub use load::{LoadedTable, load_path, load_path_with, load_table, load_table_with};

// === Parsing ===
pub use spreadsheet::read_workbook;
pub use table::RawTable;
pub use text::{decode_text, read_delimited, sniff_delimiter};
