//! The three input sources of a reconciliation run.

use serde::{Deserialize, Serialize};

use crate::columns::CanonicalColumn;

/// Identifies which input table a value or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Open-order status export (`Status da Ordem`).
    Status,
    /// Location traceability export (`Rastreabilidade`).
    Traceability,
    /// Stock-on-hand export (`Consulta de Estoque`).
    Stock,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [
        SourceKind::Status,
        SourceKind::Traceability,
        SourceKind::Stock,
    ];

    /// Short lowercase label used in logs and cache keys.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Status => "status",
            SourceKind::Traceability => "traceability",
            SourceKind::Stock => "stock",
        }
    }

    /// Columns that must be present after header normalization.
    ///
    /// Traceability additionally needs either `Endereço` or both
    /// `Endereço Origem` and `Endereço Destino`; that alternative is checked
    /// by the address extractor.
    pub fn required_columns(self) -> &'static [CanonicalColumn] {
        match self {
            SourceKind::Status => &[
                CanonicalColumn::Item,
                CanonicalColumn::Description,
                CanonicalColumn::UnallocatedQuantity,
            ],
            SourceKind::Traceability => &[CanonicalColumn::Item],
            SourceKind::Stock => &[
                CanonicalColumn::Item,
                CanonicalColumn::Address,
                CanonicalColumn::QuantityOnHand,
            ],
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
