//! Canonical column vocabulary and header normalization.
//!
//! Source spreadsheets come from different ERP screens and spell the same
//! column in many ways (`Descrição`, `DESCRICAO`, `Description`, ...). Every
//! header is trimmed, whitespace-collapsed and title-cased, then looked up in
//! a fixed synonym table. Unknown headers pass through in their title-cased
//! form so that required-column validation can report them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A column the reconciliation pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalColumn {
    /// Stock-keeping unit identifier.
    Item,
    /// Item description.
    Description,
    /// Open-order quantity not yet assigned to a location.
    UnallocatedQuantity,
    /// Single storage address.
    Address,
    /// Movement origin address (traceability exports).
    AddressOrigin,
    /// Movement destination address (traceability exports).
    AddressDestination,
    /// Quantity currently stored at an address.
    QuantityOnHand,
    /// Display label of the reconciled quantity ("VIDA" or a number).
    QuantityLabel,
}

impl CanonicalColumn {
    /// Every canonical column, in report-friendly order.
    pub const ALL: [CanonicalColumn; 8] = [
        CanonicalColumn::Item,
        CanonicalColumn::Description,
        CanonicalColumn::UnallocatedQuantity,
        CanonicalColumn::Address,
        CanonicalColumn::AddressOrigin,
        CanonicalColumn::AddressDestination,
        CanonicalColumn::QuantityOnHand,
        CanonicalColumn::QuantityLabel,
    ];

    /// The header string used for this column once normalized.
    pub fn header(self) -> &'static str {
        match self {
            CanonicalColumn::Item => "Item",
            CanonicalColumn::Description => "Descrição",
            CanonicalColumn::UnallocatedQuantity => "Quantidade Não Alocada",
            CanonicalColumn::Address => "Endereço",
            CanonicalColumn::AddressOrigin => "Endereço Origem",
            CanonicalColumn::AddressDestination => "Endereço Destino",
            CanonicalColumn::QuantityOnHand => "Qtd Atual",
            CanonicalColumn::QuantityLabel => "Qnt Endereço",
        }
    }

    /// Accepted spellings, in title-cased form.
    ///
    /// The canonical header is always the first entry.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::Item => &[
                "Item",
                "Itens",
                "Código Do Item",
                "Codigo Do Item",
                "Código Item",
                "Codigo Item",
                "Cod Item",
                "Item Code",
                "Sku",
            ],
            CanonicalColumn::Description => &[
                "Descrição",
                "Descricao",
                "Description",
                "Descrição Do Item",
                "Descricao Do Item",
                "Item Description",
                "Desc",
            ],
            CanonicalColumn::UnallocatedQuantity => &[
                "Quantidade Não Alocada",
                "Quantidade Nao Alocada",
                "Qtd Não Alocada",
                "Qtd Nao Alocada",
                "Qtde Não Alocada",
                "Qtde Nao Alocada",
                "Não Alocado",
                "Nao Alocado",
                "Unallocated Quantity",
                "Unallocated Qty",
            ],
            CanonicalColumn::Address => &[
                "Endereço",
                "Endereco",
                "Endereço A0",
                "Endereco A0",
                "Address",
                "Location",
                "Localização",
                "Localizacao",
            ],
            CanonicalColumn::AddressOrigin => &[
                "Endereço Origem",
                "Endereco Origem",
                "Endereço De Origem",
                "Endereco De Origem",
                "Address Origin",
                "Origin Address",
            ],
            CanonicalColumn::AddressDestination => &[
                "Endereço Destino",
                "Endereco Destino",
                "Endereço De Destino",
                "Endereco De Destino",
                "Address Destination",
                "Destination Address",
            ],
            CanonicalColumn::QuantityOnHand => &[
                "Qtd Atual",
                "Qtd. Atual",
                "Qtde Atual",
                "Quantidade Atual",
                "Current Qty",
                "Current Quantity",
                "Quantity On Hand",
                "Qty On Hand",
                "On Hand",
            ],
            CanonicalColumn::QuantityLabel => &[
                "Qnt Endereço",
                "Qnt Endereco",
                "Qtd Endereço",
                "Qtd Endereco",
                "Quantity Label",
            ],
        }
    }

    /// Resolves a title-cased header to its canonical column.
    pub fn from_title(title: &str) -> Option<CanonicalColumn> {
        Self::ALL
            .into_iter()
            .find(|column| column.synonyms().contains(&title))
    }
}

impl std::fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// Title-cases a header the way spreadsheet users expect.
///
/// Every run of letters starts with an uppercase letter and continues in
/// lowercase; digits and punctuation start a new run (`"a0b"` → `"A0B"`).
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

fn collapse_whitespace(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a raw header to its canonical name.
///
/// Total function: headers outside the synonym table come back title-cased.
///
/// # Examples
///
/// ```
/// use recon_model::normalize_column_name;
///
/// assert_eq!(normalize_column_name("  DESCRICAO "), "Descrição");
/// assert_eq!(normalize_column_name("current qty"), "Qtd Atual");
/// assert_eq!(normalize_column_name("lote"), "Lote");
/// ```
pub fn normalize_column_name(raw: &str) -> String {
    let title = title_case(&collapse_whitespace(raw));
    match CanonicalColumn::from_title(&title) {
        Some(column) => column.header().to_string(),
        None => title,
    }
}

/// Memoizing front-end for [`normalize_column_name`].
///
/// Wide exports repeat the same header spellings across files; one
/// normalizer is kept per run.
#[derive(Debug, Default, Clone)]
pub struct ColumnNormalizer {
    cache: HashMap<String, String>,
}

impl ColumnNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `raw`, reusing the cached result for repeated inputs.
    pub fn normalize(&mut self, raw: &str) -> String {
        if let Some(hit) = self.cache.get(raw) {
            return hit.clone();
        }
        let normalized = normalize_column_name(raw);
        self.cache.insert(raw.to_string(), normalized.clone());
        normalized
    }

    /// Number of distinct raw headers seen so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
