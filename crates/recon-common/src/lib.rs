//! Shared utilities for the reconciliation crates.
//!
//! This crate provides the Polars helpers used by the loaders, the
//! reconciliation core and the exporters: cell-to-text coercion, lenient
//! numeric parsing and string column construction.

pub mod cells;

pub use cells::{
    any_to_f64, any_to_string, format_numeric, optional_string_column, parse_f64, string_cells,
};
