//! Reconciliation merge: status universe joined with both address sources.

use recon_model::{NoAddressPolicy, ReconcileOptions, StatusRecord};
use tracing::{debug, trace};

use crate::addresses::{ItemAddresses, StockLevels};
use crate::status::collapse_status;

/// One expanded (item, address) row with its on-hand quantity attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRow {
    pub item: String,
    pub description: Option<String>,
    pub unallocated_quantity: f64,
    /// `None` for the placeholder row of an item without addresses.
    pub address: Option<String>,
    /// Summed stock at the pair; zero when unknown.
    pub quantity_on_hand: f64,
}

/// Joins filtered status rows with traceability and stock addresses.
///
/// Status drives the join: items absent from status never appear, and
/// status items without any address either get one placeholder row or are
/// dropped, according to `options.no_address_policy`. Each item expands to
/// one row per address in the sorted union of both sources. Rows are ordered
/// by item, then address.
pub fn reconcile(
    status: &[StatusRecord],
    traceability: &ItemAddresses,
    stock: &StockLevels,
    options: &ReconcileOptions,
) -> Vec<ReconciledRow> {
    let addresses = traceability.union(&stock.addresses());
    let items = collapse_status(status);

    let mut rows = Vec::with_capacity(items.len().max(addresses.pair_count()));
    let mut unaddressed = 0usize;
    for record in items {
        let mut expanded = addresses.addresses_for(&record.item).peekable();
        if expanded.peek().is_none() {
            unaddressed += 1;
            match options.no_address_policy {
                NoAddressPolicy::Placeholder => rows.push(ReconciledRow {
                    item: record.item.clone(),
                    description: record.description.clone(),
                    unallocated_quantity: record.unallocated_quantity,
                    address: None,
                    quantity_on_hand: 0.0,
                }),
                NoAddressPolicy::Drop => {
                    trace!(item = %record.item, "dropping item without address");
                }
            }
            continue;
        }
        for address in expanded {
            rows.push(ReconciledRow {
                item: record.item.clone(),
                description: record.description.clone(),
                unallocated_quantity: record.unallocated_quantity,
                address: Some(address.to_string()),
                quantity_on_hand: stock.quantity(&record.item, address),
            });
        }
    }

    debug!(
        rows = rows.len(),
        unaddressed,
        policy = ?options.no_address_policy,
        "reconciliation merge complete"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_model::StockRecord;

    fn status(item: &str, quantity: f64) -> StatusRecord {
        StatusRecord {
            item: item.to_string(),
            description: Some(format!("{item} desc")),
            unallocated_quantity: quantity,
        }
    }

    fn stock(rows: &[(&str, &str, f64)]) -> StockLevels {
        StockLevels::from_records(
            rows.iter().map(|(item, address, quantity)| StockRecord {
                item: (*item).to_string(),
                address: Some((*address).to_string()),
                quantity_on_hand: *quantity,
            }),
            "A0",
        )
    }

    #[test]
    fn expands_union_and_attaches_quantities() {
        let mut traceability = ItemAddresses::new();
        traceability.insert("ITEM001", "A0003");
        let levels = stock(&[("ITEM001", "A0001", 5.0)]);

        let rows = reconcile(
            &[status("ITEM001", 10.0)],
            &traceability,
            &levels,
            &ReconcileOptions::default(),
        );
        let pairs: Vec<(Option<&str>, f64)> = rows
            .iter()
            .map(|row| (row.address.as_deref(), row.quantity_on_hand))
            .collect();
        assert_eq!(pairs, vec![(Some("A0001"), 5.0), (Some("A0003"), 0.0)]);
    }

    #[test]
    fn items_outside_status_are_ignored() {
        let levels = stock(&[("ITEM009", "A0001", 5.0)]);
        let rows = reconcile(
            &[status("ITEM001", 1.0)],
            &ItemAddresses::new(),
            &levels,
            &ReconcileOptions::default(),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item, "ITEM001");
        assert_eq!(rows[0].address, None);
    }

    #[test]
    fn drop_policy_removes_unaddressed_items() {
        let options = ReconcileOptions::default().with_no_address_policy(NoAddressPolicy::Drop);
        let rows = reconcile(
            &[status("ITEM001", 1.0)],
            &ItemAddresses::new(),
            &StockLevels::default(),
            &options,
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn duplicate_status_rows_do_not_duplicate_pairs() {
        let mut traceability = ItemAddresses::new();
        traceability.insert("ITEM001", "A0001");
        let rows = reconcile(
            &[status("ITEM001", 1.0), status("ITEM001", 2.0)],
            &traceability,
            &StockLevels::default(),
            &ReconcileOptions::default(),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unallocated_quantity, 3.0);
    }
}
