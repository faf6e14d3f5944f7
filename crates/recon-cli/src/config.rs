//! TOML configuration file and command-line overrides.
//!
//! Precedence: built-in defaults, then the file, then flags.

use std::path::Path;

use anyhow::{Context, Result};
use recon_ingest::IngestOptions;
use recon_model::{NoAddressPolicy, QuantityFormat, ReconcileOptions};
use serde::{Deserialize, Serialize};

/// Contents of a `recon.toml` file.
///
/// ```toml
/// [reconcile]
/// address_prefix = "A0"
/// no_address_policy = "drop"
/// quantity_format = "exact"
///
/// [ingest]
/// max_file_size = 104857600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub reconcile: ReconcileOptions,
    pub ingest: IngestOptions,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config")
    }
}

/// Reads a config file; an explicitly named file must exist.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    FileConfig::parse(&text).with_context(|| format!("in {}", path.display()))
}

/// Loads the file when given, defaults otherwise.
pub fn resolve_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(FileConfig::default()),
    }
}

/// Option flags that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub address_prefix: Option<String>,
    pub drop_unaddressed: bool,
    pub exact_quantities: bool,
}

impl Overrides {
    pub fn apply(&self, mut options: ReconcileOptions) -> ReconcileOptions {
        if let Some(prefix) = &self.address_prefix {
            options.address_prefix = prefix.clone();
        }
        if self.drop_unaddressed {
            options.no_address_policy = NoAddressPolicy::Drop;
        }
        if self.exact_quantities {
            options.quantity_format = QuantityFormat::Exact;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_table_is_rejected() {
        assert!(FileConfig::parse("[output]\npath = \"x\"\n").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = ReconcileOptions::new().with_address_prefix("B1");
        let overrides = Overrides {
            address_prefix: None,
            drop_unaddressed: true,
            exact_quantities: false,
        };
        let options = overrides.apply(file);
        assert_eq!(options.address_prefix, "B1");
        assert_eq!(options.no_address_policy, NoAddressPolicy::Drop);
        assert_eq!(options.quantity_format, QuantityFormat::Truncate);

        let options = Overrides {
            address_prefix: Some("A0".to_string()),
            ..Overrides::default()
        }
        .apply(options);
        assert_eq!(options.address_prefix, "A0");
        assert_eq!(options.no_address_policy, NoAddressPolicy::Drop);
    }
}
