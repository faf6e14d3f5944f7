//! Stock traceability reconciliation.
//!
//! Reconciles open-order status against traceability and stock-on-hand
//! exports. For every item with unallocated quantity the report lists each
//! storage address with the configured prefix (`A0` by default) found in
//! either source, labelled with the on-hand quantity or `VIDA` when none is
//! known.
//!
//! # Example
//!
//! ```ignore
//! use recon_core::{PipelineInputs, run_pipeline};
//! use recon_model::ReconcileOptions;
//!
//! let inputs = PipelineInputs { status, traceability, stock };
//! let report = run_pipeline(&inputs, &ReconcileOptions::default())?;
//! let table = report.to_dataframe()?;
//! ```

mod addresses;
mod cache;
mod columns;
mod derive;
mod error;
mod merge;
mod pipeline;
mod report;
mod status;

// === Error Types ===
pub use error::{ErrorKind, ReconError, Result};

// === Column Validation ===
pub use columns::require_columns;

// === Stages ===
pub use addresses::{
    ItemAddresses, StockLevels, address_matches, extract_stock, extract_traceability_addresses,
    stock_records, traceability_records,
};
pub use derive::derive_quantity_label;
pub use merge::{ReconciledRow, reconcile};
pub use report::{Report, ReportSummary, assemble_report};
pub use status::{collapse_status, filter_status};

// === Orchestration ===
pub use cache::{CacheKey, ReportCache};
pub use pipeline::{
    PipelineInputs, SourceInput, SourceSet, run_from_sources, run_pipeline, validate_inputs,
};
