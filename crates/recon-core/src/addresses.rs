//! Per-item address extraction from traceability and stock sources.
//!
//! Both paths reduce to the same shape: for each item, the sorted set of
//! addresses starting with the configured prefix. The stock path also keeps
//! the on-hand quantity summed per (item, address).

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;
use recon_model::{CanonicalColumn, SourceKind, StockRecord, TraceabilityRecord};
use tracing::debug;

use crate::columns::{has_column, numeric_column, present_columns, require_columns, text_column};
use crate::error::{ReconError, Result};

/// Null-safe, case-sensitive prefix test.
///
/// ```
/// use recon_core::address_matches;
///
/// assert!(address_matches(Some("A0123"), "A0"));
/// assert!(!address_matches(Some("a0123"), "A0"));
/// assert!(!address_matches(None, "A0"));
/// ```
pub fn address_matches(address: Option<&str>, prefix: &str) -> bool {
    address.is_some_and(|value| value.starts_with(prefix))
}

/// Sorted, deduplicated addresses per item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAddresses {
    by_item: BTreeMap<String, BTreeSet<String>>,
}

impl ItemAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups traceability records, keeping addresses that match `prefix`.
    pub fn from_records<'a, I>(records: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = &'a TraceabilityRecord>,
    {
        let mut addresses = Self::new();
        for record in records {
            if let Some(address) = record.address.as_deref()
                && address_matches(Some(address), prefix)
            {
                addresses.insert(&record.item, address);
            }
        }
        addresses
    }

    pub fn insert(&mut self, item: &str, address: &str) {
        self.by_item
            .entry(item.to_string())
            .or_default()
            .insert(address.to_string());
    }

    /// Addresses for `item`, empty when the item is unknown.
    pub fn addresses_for(&self, item: &str) -> impl Iterator<Item = &str> {
        self.by_item
            .get(item)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.by_item.contains_key(item)
    }

    /// Per-item union of both address sets; commutative and idempotent.
    #[must_use]
    pub fn union(&self, other: &ItemAddresses) -> ItemAddresses {
        let mut merged = self.clone();
        for (item, addresses) in &other.by_item {
            merged
                .by_item
                .entry(item.clone())
                .or_default()
                .extend(addresses.iter().cloned());
        }
        merged
    }

    pub fn item_count(&self) -> usize {
        self.by_item.len()
    }

    /// Number of distinct (item, address) pairs.
    pub fn pair_count(&self) -> usize {
        self.by_item.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.by_item
            .iter()
            .map(|(item, addresses)| (item.as_str(), addresses))
    }
}

/// Reads (item, address) pairs from a traceability table.
///
/// Uses `Endereço` when present. Otherwise `Endereço Origem` and
/// `Endereço Destino` are unpivoted: each input row yields one record per
/// column, origin first. Rows without an item are skipped.
pub fn traceability_records(df: &DataFrame) -> Result<Vec<TraceabilityRecord>> {
    require_columns(
        df,
        SourceKind::Traceability,
        SourceKind::Traceability.required_columns(),
    )?;
    let items = text_column(df, CanonicalColumn::Item)?;

    if has_column(df, CanonicalColumn::Address) {
        let addresses = text_column(df, CanonicalColumn::Address)?;
        return Ok(items
            .into_iter()
            .zip(addresses)
            .filter_map(|(item, address)| Some(TraceabilityRecord { item: item?, address }))
            .collect());
    }

    if has_column(df, CanonicalColumn::AddressOrigin)
        && has_column(df, CanonicalColumn::AddressDestination)
    {
        let origins = text_column(df, CanonicalColumn::AddressOrigin)?;
        let destinations = text_column(df, CanonicalColumn::AddressDestination)?;
        let mut records = Vec::with_capacity(items.len() * 2);
        for ((item, origin), destination) in items.into_iter().zip(origins).zip(destinations) {
            let Some(item) = item else {
                continue;
            };
            records.push(TraceabilityRecord {
                item: item.clone(),
                address: origin,
            });
            records.push(TraceabilityRecord {
                item,
                address: destination,
            });
        }
        return Ok(records);
    }

    Err(ReconError::NoAddressColumn {
        present: present_columns(df),
    })
}

/// Per-item addresses from the traceability table, restricted to `prefix`.
pub fn extract_traceability_addresses(df: &DataFrame, prefix: &str) -> Result<ItemAddresses> {
    let records = traceability_records(df)?;
    let addresses = ItemAddresses::from_records(&records, prefix);
    debug!(
        records = records.len(),
        items = addresses.item_count(),
        pairs = addresses.pair_count(),
        "traceability addresses extracted"
    );
    Ok(addresses)
}

/// On-hand quantity per (item, address), summed over raw rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLevels {
    quantities: BTreeMap<(String, String), f64>,
}

impl StockLevels {
    /// Aggregates raw stock rows whose address matches `prefix`.
    pub fn from_records<I>(records: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = StockRecord>,
    {
        let mut quantities: BTreeMap<(String, String), f64> = BTreeMap::new();
        for record in records {
            let StockRecord {
                item,
                address,
                quantity_on_hand,
            } = record;
            let Some(address) = address.filter(|a| address_matches(Some(a.as_str()), prefix)) else {
                continue;
            };
            *quantities.entry((item, address)).or_insert(0.0) += quantity_on_hand;
        }
        Self { quantities }
    }

    /// Summed quantity at a pair; zero when the pair is unknown.
    pub fn quantity(&self, item: &str, address: &str) -> f64 {
        self.quantities
            .get(&(item.to_string(), address.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Addresses per item (every aggregated pair, whatever its quantity).
    pub fn addresses(&self) -> ItemAddresses {
        let mut addresses = ItemAddresses::new();
        for (item, address) in self.quantities.keys() {
            addresses.insert(item, address);
        }
        addresses
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.quantities
            .iter()
            .map(|((item, address), quantity)| (item.as_str(), address.as_str(), *quantity))
    }
}

/// Reads raw stock rows. Requires `Item`, `Endereço` and `Qtd Atual`.
pub fn stock_records(df: &DataFrame) -> Result<Vec<StockRecord>> {
    require_columns(df, SourceKind::Stock, SourceKind::Stock.required_columns())?;
    let items = text_column(df, CanonicalColumn::Item)?;
    let addresses = text_column(df, CanonicalColumn::Address)?;
    let quantities = numeric_column(df, CanonicalColumn::QuantityOnHand)?;

    Ok(items
        .into_iter()
        .zip(addresses)
        .zip(quantities)
        .filter_map(|((item, address), quantity_on_hand)| {
            Some(StockRecord {
                item: item?,
                address,
                quantity_on_hand,
            })
        })
        .collect())
}

/// Aggregated stock levels for addresses matching `prefix`.
pub fn extract_stock(df: &DataFrame, prefix: &str) -> Result<StockLevels> {
    let records = stock_records(df)?;
    let raw_rows = records.len();
    let levels = StockLevels::from_records(records, prefix);
    debug!(
        raw_rows,
        pairs = levels.len(),
        "stock levels aggregated"
    );
    Ok(levels)
}
