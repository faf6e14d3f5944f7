//! Typed rows flowing through the reconciliation pipeline.

use serde::{Deserialize, Serialize};

use crate::columns::CanonicalColumn;

/// Label shown when no positive stock is known at an item/address pair.
pub const VIDA: &str = "VIDA";

/// An open-order row that survived the status filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub item: String,
    pub description: Option<String>,
    /// Always strictly positive after filtering.
    pub unallocated_quantity: f64,
}

/// An (item, address) observation from the traceability export.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceabilityRecord {
    pub item: String,
    pub address: Option<String>,
}

/// A raw stock-on-hand row before per-address aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub item: String,
    pub address: Option<String>,
    /// Unparseable quantities are coerced to zero.
    pub quantity_on_hand: f64,
}

/// Display status of an item at an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityLabel {
    /// No positive stock found.
    Vida,
    /// Known quantity, already formatted for display.
    Quantity(String),
}

impl QuantityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            QuantityLabel::Vida => VIDA,
            QuantityLabel::Quantity(value) => value,
        }
    }

    pub fn is_vida(&self) -> bool {
        matches!(self, QuantityLabel::Vida)
    }
}

impl std::fmt::Display for QuantityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub item: String,
    pub description: Option<String>,
    pub unallocated_quantity: f64,
    /// `None` when the item has no address with the configured prefix.
    pub address: Option<String>,
    pub quantity_label: QuantityLabel,
}

/// Columns of the final report, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportColumn {
    Item,
    Description,
    UnallocatedQuantity,
    Address,
    QuantityLabel,
}

impl ReportColumn {
    pub const ALL: [ReportColumn; 5] = [
        ReportColumn::Item,
        ReportColumn::Description,
        ReportColumn::UnallocatedQuantity,
        ReportColumn::Address,
        ReportColumn::QuantityLabel,
    ];

    /// Display header; identical to the canonical header so exported reports
    /// load back through the same normalizer.
    pub fn header(self) -> &'static str {
        self.canonical().header()
    }

    pub fn canonical(self) -> CanonicalColumn {
        match self {
            ReportColumn::Item => CanonicalColumn::Item,
            ReportColumn::Description => CanonicalColumn::Description,
            ReportColumn::UnallocatedQuantity => CanonicalColumn::UnallocatedQuantity,
            ReportColumn::Address => CanonicalColumn::Address,
            ReportColumn::QuantityLabel => CanonicalColumn::QuantityLabel,
        }
    }
}
