//! Data model for inventory traceability reconciliation.
//!
//! - [`columns`]: canonical column vocabulary and header normalization
//! - [`source`]: the three input sources and their required columns
//! - [`records`]: typed rows flowing through the pipeline
//! - [`options`]: reconciliation policies

pub mod columns;
pub mod options;
pub mod records;
pub mod source;

pub use columns::{CanonicalColumn, ColumnNormalizer, normalize_column_name, title_case};
pub use options::{DEFAULT_ADDRESS_PREFIX, NoAddressPolicy, QuantityFormat, ReconcileOptions};
pub use records::{
    QuantityLabel, ReportColumn, ReportRow, StatusRecord, StockRecord, TraceabilityRecord, VIDA,
};
pub use source::SourceKind;
