//! Open-order status filtering.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use recon_model::{CanonicalColumn, SourceKind, StatusRecord};
use tracing::{debug, trace};

use crate::columns::{numeric_column, require_columns, text_column};
use crate::error::Result;

/// Keeps status rows whose unallocated quantity is strictly positive.
///
/// Requires `Item`, `Descrição` and `Quantidade Não Alocada`. Unparseable and
/// blank quantities count as zero and are dropped, as are rows without an
/// item. Input order is preserved.
pub fn filter_status(df: &DataFrame) -> Result<Vec<StatusRecord>> {
    require_columns(df, SourceKind::Status, SourceKind::Status.required_columns())?;

    let items = text_column(df, CanonicalColumn::Item)?;
    let descriptions = text_column(df, CanonicalColumn::Description)?;
    let quantities = numeric_column(df, CanonicalColumn::UnallocatedQuantity)?;

    let records: Vec<StatusRecord> = items
        .into_iter()
        .zip(descriptions)
        .zip(quantities)
        .filter_map(|((item, description), quantity)| {
            let item = item?;
            if quantity > 0.0 {
                Some(StatusRecord {
                    item,
                    description,
                    unallocated_quantity: quantity,
                })
            } else {
                trace!(item = %item, quantity, "status row filtered out");
                None
            }
        })
        .collect();

    debug!(
        input_rows = df.height(),
        kept = records.len(),
        "status filter applied"
    );
    Ok(records)
}

/// Collapses repeated items into one record per item, sorted by item.
///
/// Quantities are summed and the first non-empty description wins.
pub fn collapse_status(records: &[StatusRecord]) -> Vec<StatusRecord> {
    let mut by_item: BTreeMap<&str, StatusRecord> = BTreeMap::new();
    for record in records {
        by_item
            .entry(record.item.as_str())
            .and_modify(|existing| {
                existing.unallocated_quantity += record.unallocated_quantity;
                if existing.description.is_none() {
                    existing.description.clone_from(&record.description);
                }
            })
            .or_insert_with(|| record.clone());
    }
    by_item.into_values().collect()
}
