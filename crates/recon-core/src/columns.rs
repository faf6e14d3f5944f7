//! Required-column checks and typed column access.

use polars::prelude::DataFrame;
use recon_common::{parse_f64, string_cells};
use recon_model::{CanonicalColumn, SourceKind};

use crate::error::{ReconError, Result};

/// Column names present in `df`, in order.
pub fn present_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub fn has_column(df: &DataFrame, column: CanonicalColumn) -> bool {
    df.get_column_names()
        .iter()
        .any(|name| name.as_str() == column.header())
}

/// Fails with `MissingColumns` unless every column in `required` exists.
pub fn require_columns(
    df: &DataFrame,
    source_kind: SourceKind,
    required: &[CanonicalColumn],
) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !has_column(df, **column))
        .map(|column| column.header().to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ReconError::MissingColumns {
        source_kind,
        missing,
        present: present_columns(df),
    })
}

/// Trimmed text cells of a canonical column.
pub fn text_column(df: &DataFrame, column: CanonicalColumn) -> Result<Vec<Option<String>>> {
    Ok(string_cells(df, column.header())?)
}

/// Numeric cells of a canonical column; unparseable or blank cells are `0.0`.
pub fn numeric_column(df: &DataFrame, column: CanonicalColumn) -> Result<Vec<f64>> {
    Ok(text_column(df, column)?
        .into_iter()
        .map(|cell| cell.as_deref().and_then(parse_f64).unwrap_or(0.0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Item".into(), vec!["ITEM001", "ITEM002", "ITEM003"]).into(),
            Series::new("Qtd Atual".into(), vec![Some("2.5"), Some("abc"), None]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn numeric_column_coerces_garbage_to_zero() {
        let values = numeric_column(&frame(), CanonicalColumn::QuantityOnHand).unwrap();
        assert_eq!(values, vec![2.5, 0.0, 0.0]);
    }

    #[test]
    fn require_columns_reports_missing_and_present() {
        let err = require_columns(
            &frame(),
            SourceKind::Stock,
            SourceKind::Stock.required_columns(),
        )
        .unwrap_err();
        match err {
            ReconError::MissingColumns {
                missing, present, ..
            } => {
                assert_eq!(missing, vec!["Endereço".to_string()]);
                assert_eq!(present, vec!["Item".to_string(), "Qtd Atual".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
