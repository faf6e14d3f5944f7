//! Integration tests for the reconciliation data model.

use recon_model::{
    CanonicalColumn, NoAddressPolicy, QuantityFormat, QuantityLabel, ReconcileOptions, ReportRow,
    SourceKind,
};

#[test]
fn status_requires_item_description_and_unallocated_quantity() {
    assert_eq!(
        SourceKind::Status.required_columns(),
        &[
            CanonicalColumn::Item,
            CanonicalColumn::Description,
            CanonicalColumn::UnallocatedQuantity
        ]
    );
}

#[test]
fn stock_requires_address_and_quantity() {
    let required = SourceKind::Stock.required_columns();
    assert!(required.contains(&CanonicalColumn::Address));
    assert!(required.contains(&CanonicalColumn::QuantityOnHand));
}

#[test]
fn options_deserialize_from_partial_toml() {
    let options: ReconcileOptions = toml::from_str(
        r#"
        no_address_policy = "drop"
        "#,
    )
    .unwrap();
    assert_eq!(options.address_prefix, "A0");
    assert_eq!(options.no_address_policy, NoAddressPolicy::Drop);
    assert_eq!(options.quantity_format, QuantityFormat::Truncate);
}

#[test]
fn report_row_serializes() {
    let row = ReportRow {
        item: "ITEM001".to_string(),
        description: Some("Parafuso".to_string()),
        unallocated_quantity: 10.0,
        address: Some("A0001".to_string()),
        quantity_label: QuantityLabel::Quantity("5".to_string()),
    };
    let json = serde_json::to_string(&row).expect("serialize row");
    let round: ReportRow = serde_json::from_str(&json).expect("deserialize row");
    assert_eq!(round, row);
}
