//! Final report assembly and summary counts.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use recon_common::optional_string_column;
use recon_model::{QuantityFormat, ReportColumn, ReportRow};
use serde::{Deserialize, Serialize};

use crate::derive::derive_quantity_label;
use crate::error::Result;
use crate::merge::ReconciledRow;

/// The reconciled report: one row per (item, address).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

/// Bulk counts over a report, for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub rows: usize,
    pub distinct_items: usize,
    pub distinct_addresses: usize,
    pub vida_rows: usize,
    pub quantity_rows: usize,
    pub unaddressed_rows: usize,
}

/// Derives the quantity label of every merged row.
pub fn assemble_report(rows: Vec<ReconciledRow>, format: QuantityFormat) -> Report {
    let rows = rows
        .into_iter()
        .map(|row| ReportRow {
            quantity_label: derive_quantity_label(row.quantity_on_hand, format),
            item: row.item,
            description: row.description,
            unallocated_quantity: row.unallocated_quantity,
            address: row.address,
        })
        .collect();
    Report { rows }
}

impl Report {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Report table with display headers in [`ReportColumn::ALL`] order.
    ///
    /// Unallocated quantity is numeric; every other column is text, with
    /// missing descriptions and placeholder addresses as nulls.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = ReportColumn::ALL
            .iter()
            .map(|column| self.column(*column))
            .collect();
        Ok(DataFrame::new(columns)?)
    }

    fn column(&self, column: ReportColumn) -> Column {
        let name = column.header();
        match column {
            ReportColumn::Item => optional_string_column(
                name,
                self.rows.iter().map(|row| Some(row.item.clone())).collect(),
            ),
            ReportColumn::Description => optional_string_column(
                name,
                self.rows.iter().map(|row| row.description.clone()).collect(),
            ),
            ReportColumn::UnallocatedQuantity => {
                let values: Vec<f64> = self.rows.iter().map(|row| row.unallocated_quantity).collect();
                Series::new(name.into(), values).into()
            }
            ReportColumn::Address => optional_string_column(
                name,
                self.rows.iter().map(|row| row.address.clone()).collect(),
            ),
            ReportColumn::QuantityLabel => optional_string_column(
                name,
                self.rows
                    .iter()
                    .map(|row| Some(row.quantity_label.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn summary(&self) -> ReportSummary {
        let items: BTreeSet<&str> = self.rows.iter().map(|row| row.item.as_str()).collect();
        let addresses: BTreeSet<&str> = self
            .rows
            .iter()
            .filter_map(|row| row.address.as_deref())
            .collect();
        let vida_rows = self
            .rows
            .iter()
            .filter(|row| row.quantity_label.is_vida())
            .count();
        ReportSummary {
            rows: self.rows.len(),
            distinct_items: items.len(),
            distinct_addresses: addresses.len(),
            vida_rows,
            quantity_rows: self.rows.len() - vida_rows,
            unaddressed_rows: self.rows.iter().filter(|row| row.address.is_none()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_common::string_cells;

    fn merged(item: &str, address: Option<&str>, quantity: f64) -> ReconciledRow {
        ReconciledRow {
            item: item.to_string(),
            description: Some("Parafuso".to_string()),
            unallocated_quantity: 10.0,
            address: address.map(str::to_string),
            quantity_on_hand: quantity,
        }
    }

    #[test]
    fn dataframe_has_display_headers_in_order() {
        let report = assemble_report(
            vec![
                merged("ITEM001", Some("A0001"), 5.0),
                merged("ITEM003", None, 0.0),
            ],
            QuantityFormat::Truncate,
        );
        let df = report.to_dataframe().unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "Item",
                "Descrição",
                "Quantidade Não Alocada",
                "Endereço",
                "Qnt Endereço"
            ]
        );
        assert_eq!(
            string_cells(&df, "Qnt Endereço").unwrap(),
            vec![Some("5".to_string()), Some("VIDA".to_string())]
        );
        assert_eq!(df.column("Endereço").unwrap().null_count(), 1);
    }

    #[test]
    fn summary_counts() {
        let report = assemble_report(
            vec![
                merged("ITEM001", Some("A0001"), 5.0),
                merged("ITEM001", Some("A0003"), 0.0),
                merged("ITEM002", Some("A0001"), 1.0),
                merged("ITEM003", None, 0.0),
            ],
            QuantityFormat::Truncate,
        );
        assert_eq!(
            report.summary(),
            ReportSummary {
                rows: 4,
                distinct_items: 3,
                distinct_addresses: 2,
                vida_rows: 2,
                quantity_rows: 2,
                unaddressed_rows: 1,
            }
        );
    }

    #[test]
    fn empty_report_still_has_columns() {
        let df = Report::default().to_dataframe().unwrap();
        assert_eq!(df.width(), 5);
        assert_eq!(df.height(), 0);
    }
}
