//! Config file loading.

use std::fs;

use recon_cli::config::{FileConfig, Overrides, load_config, resolve_config};
use recon_model::{NoAddressPolicy, QuantityFormat};
use tempfile::TempDir;

#[test]
fn partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recon.toml");
    fs::write(
        &path,
        "[reconcile]\nno_address_policy = \"drop\"\n\n[ingest]\nmax_file_size = 1024\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.reconcile.address_prefix, "A0");
    assert_eq!(config.reconcile.no_address_policy, NoAddressPolicy::Drop);
    assert_eq!(config.reconcile.quantity_format, QuantityFormat::Truncate);
    assert_eq!(config.ingest.max_file_size, 1024);
    assert_eq!(config.ingest.row_warning_threshold, 1_000_000);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let error = resolve_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(format!("{error:#}").contains("absent.toml"));
    assert_eq!(resolve_config(None).unwrap(), FileConfig::default());
}

#[test]
fn invalid_policy_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recon.toml");
    fs::write(&path, "[reconcile]\nno_address_policy = \"skip\"\n").unwrap();
    assert!(load_config(&path).is_err());
}

#[test]
fn flags_win_over_file() {
    let config = FileConfig::parse("[reconcile]\naddress_prefix = \"B1\"\nquantity_format = \"exact\"\n")
        .unwrap();
    let options = Overrides {
        address_prefix: Some("A0".to_string()),
        drop_unaddressed: false,
        exact_quantities: false,
    }
    .apply(config.reconcile);

    insta::assert_json_snapshot!(options, @r#"
    {
      "address_prefix": "A0",
      "no_address_policy": "placeholder",
      "quantity_format": "exact"
    }
    "#);
}
