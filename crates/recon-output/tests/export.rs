//! Export contract and round-trip through the loaders.

use polars::prelude::DataFrame;
use recon_common::string_cells;
use recon_core::{ReconciledRow, assemble_report};
use recon_ingest::{IngestOptions, load_path, load_table};
use recon_model::{QuantityFormat, ReportColumn};
use recon_output::{ExportFormat, export_report, write_csv, write_xlsx_buffer};
use tempfile::TempDir;

fn merged(item: &str, description: &str, unallocated: f64, address: Option<&str>, stock: f64) -> ReconciledRow {
    ReconciledRow {
        item: item.to_string(),
        description: Some(description.to_string()),
        unallocated_quantity: unallocated,
        address: address.map(str::to_string),
        quantity_on_hand: stock,
    }
}

fn report_df() -> DataFrame {
    assemble_report(
        vec![
            merged("ITEM001", "Parafuso", 10.0, Some("A0001"), 5.0),
            merged("ITEM001", "Parafuso", 10.0, Some("A0003"), 0.0),
            merged("ITEM003", "Arruela", 4.5, None, 0.0),
        ],
        QuantityFormat::Truncate,
    )
    .to_dataframe()
    .unwrap()
}

/// (Item, Address, QuantityLabel) triples of a table.
fn key_columns(df: &DataFrame) -> Vec<(Option<String>, Option<String>, Option<String>)> {
    let items = string_cells(df, ReportColumn::Item.header()).unwrap();
    let addresses = string_cells(df, ReportColumn::Address.header()).unwrap();
    let labels = string_cells(df, ReportColumn::QuantityLabel.header()).unwrap();
    items
        .into_iter()
        .zip(addresses)
        .zip(labels)
        .map(|((item, address), label)| (item, address, label))
        .collect()
}

#[test]
fn csv_layout() {
    let mut buffer = Vec::new();
    write_csv(&report_df(), &mut buffer, b',').unwrap();
    let text = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!(text, @r"
    Item,Descrição,Quantidade Não Alocada,Endereço,Qnt Endereço
    ITEM001,Parafuso,10,A0001,5
    ITEM001,Parafuso,10,A0003,VIDA
    ITEM003,Arruela,4.5,,VIDA
    ");
}

#[test]
fn csv_round_trip_preserves_keys_and_labels() {
    let df = report_df();
    let mut buffer = Vec::new();
    write_csv(&df, &mut buffer, b';').unwrap();

    let reloaded = load_table(&buffer, "csv", &IngestOptions::default()).unwrap();
    assert_eq!(key_columns(&reloaded), key_columns(&df));
    assert_eq!(
        string_cells(&reloaded, ReportColumn::UnallocatedQuantity.header()).unwrap(),
        vec![
            Some("10".to_string()),
            Some("10".to_string()),
            Some("4.5".to_string())
        ]
    );
}

#[test]
fn xlsx_round_trip_preserves_keys_and_labels() {
    let df = report_df();
    let bytes = write_xlsx_buffer(&df).unwrap();

    let reloaded = load_table(&bytes, "xlsx", &IngestOptions::default()).unwrap();
    assert_eq!(key_columns(&reloaded), key_columns(&df));
    assert_eq!(reloaded.width(), 5);
}

#[test]
fn export_report_picks_format_and_creates_directories() {
    let dir = TempDir::new().unwrap();
    let df = report_df();

    let xlsx_path = dir.path().join("nested").join("Relatorio.xlsx");
    assert_eq!(export_report(&df, &xlsx_path).unwrap(), ExportFormat::Xlsx);
    let loaded = load_path(&xlsx_path, &IngestOptions::default()).unwrap();
    assert_eq!(loaded.frame.height(), 3);

    let csv_path = dir.path().join("Relatorio.csv");
    assert_eq!(export_report(&df, &csv_path).unwrap(), ExportFormat::Csv);
    let loaded = load_path(&csv_path, &IngestOptions::default()).unwrap();
    assert_eq!(key_columns(&loaded.frame), key_columns(&df));

    assert!(export_report(&df, &dir.path().join("Relatorio.pdf")).is_err());
}
