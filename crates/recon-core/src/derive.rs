//! Quantity label derivation.

use recon_common::format_numeric;
use recon_model::{QuantityFormat, QuantityLabel};

/// Label for an on-hand quantity: `VIDA` unless it is strictly positive.
///
/// # Examples
///
/// ```
/// use recon_core::derive_quantity_label;
/// use recon_model::{QuantityFormat, QuantityLabel};
///
/// assert_eq!(derive_quantity_label(0.0, QuantityFormat::Truncate), QuantityLabel::Vida);
/// assert_eq!(derive_quantity_label(5.0, QuantityFormat::Truncate).as_str(), "5");
/// assert_eq!(derive_quantity_label(2.7, QuantityFormat::Truncate).as_str(), "2");
/// assert_eq!(derive_quantity_label(2.7, QuantityFormat::Exact).as_str(), "2.7");
/// ```
pub fn derive_quantity_label(quantity: f64, format: QuantityFormat) -> QuantityLabel {
    if quantity.is_nan() || quantity <= 0.0 {
        return QuantityLabel::Vida;
    }
    let text = match format {
        QuantityFormat::Truncate => format!("{}", quantity.trunc() as i64),
        QuantityFormat::Exact => format_numeric(quantity),
    };
    QuantityLabel::Quantity(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_is_vida() {
        assert!(derive_quantity_label(0.0, QuantityFormat::Truncate).is_vida());
        assert!(derive_quantity_label(-4.0, QuantityFormat::Exact).is_vida());
        assert!(derive_quantity_label(f64::NAN, QuantityFormat::Truncate).is_vida());
    }

    #[test]
    fn truncation_is_not_rounding() {
        assert_eq!(derive_quantity_label(3.99, QuantityFormat::Truncate).as_str(), "3");
        // Positive but below one unit keeps its integer cast
        assert_eq!(derive_quantity_label(0.4, QuantityFormat::Truncate).as_str(), "0");
        assert_eq!(derive_quantity_label(0.4, QuantityFormat::Exact).as_str(), "0.4");
    }

    #[test]
    fn whole_numbers_have_no_decimals() {
        assert_eq!(derive_quantity_label(12.0, QuantityFormat::Exact).as_str(), "12");
        assert_eq!(derive_quantity_label(12.0, QuantityFormat::Truncate).as_str(), "12");
    }
}
