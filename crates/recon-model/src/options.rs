//! Configuration options for reconciliation.

use serde::{Deserialize, Serialize};

/// Address prefix of the storage locations under reconciliation.
pub const DEFAULT_ADDRESS_PREFIX: &str = "A0";

/// What to do with an item that has no address matching the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoAddressPolicy {
    /// Emit one row with an empty address labelled VIDA.
    #[default]
    Placeholder,
    /// Leave the item out of the report.
    Drop,
}

/// How on-hand quantities are rendered in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityFormat {
    /// Integer cast, fractional part discarded (`2.7` → `"2"`).
    #[default]
    Truncate,
    /// Shortest exact decimal (`2.7` → `"2.7"`, `5.0` → `"5"`).
    Exact,
}

/// Options controlling a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Case-sensitive prefix an address must start with.
    pub address_prefix: String,

    pub no_address_policy: NoAddressPolicy,

    pub quantity_format: QuantityFormat,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            no_address_policy: NoAddressPolicy::default(),
            quantity_format: QuantityFormat::default(),
        }
    }
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_no_address_policy(mut self, policy: NoAddressPolicy) -> Self {
        self.no_address_policy = policy;
        self
    }

    #[must_use]
    pub fn with_quantity_format(mut self, format: QuantityFormat) -> Self {
        self.quantity_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_a0_addresses() {
        let options = ReconcileOptions::default();
        assert_eq!(options.address_prefix, "A0");
        assert_eq!(options.no_address_policy, NoAddressPolicy::Placeholder);
        assert_eq!(options.quantity_format, QuantityFormat::Truncate);
    }

    #[test]
    fn builder_overrides_defaults() {
        let options = ReconcileOptions::new()
            .with_address_prefix("B1")
            .with_no_address_policy(NoAddressPolicy::Drop)
            .with_quantity_format(QuantityFormat::Exact);
        assert_eq!(options.address_prefix, "B1");
        assert_eq!(options.no_address_policy, NoAddressPolicy::Drop);
        assert_eq!(options.quantity_format, QuantityFormat::Exact);
    }
}
