//! Conversion of parsed rows into a normalized string DataFrame.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame};
use recon_common::optional_string_column;
use recon_model::ColumnNormalizer;

use crate::error::{IngestError, Result};

/// Header plus text rows, as produced by either parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Builds a DataFrame of nullable string columns with canonical headers.
    ///
    /// - Fully blank rows are skipped.
    /// - Blank headers become `Unnamed: <index>`.
    /// - When two headers normalize to the same name the first one wins and
    ///   later ones are dropped with a warning.
    /// - Short rows are padded with nulls; cells beyond the header are ignored.
    pub fn into_dataframe(self, normalizer: &mut ColumnNormalizer) -> Result<DataFrame> {
        let data_rows: Vec<Vec<Option<String>>> = self
            .rows
            .into_iter()
            .filter(|row| row.iter().any(Option::is_some))
            .collect();
        if data_rows.is_empty() {
            return Err(IngestError::EmptyTable);
        }

        let mut seen = HashSet::new();
        let mut columns: Vec<Column> = Vec::with_capacity(self.headers.len());
        for (idx, raw) in self.headers.iter().enumerate() {
            let name = if raw.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                normalizer.normalize(raw)
            };
            if !seen.insert(name.clone()) {
                tracing::warn!(
                    column = %name,
                    raw = %raw,
                    "duplicate column after normalization, keeping the first"
                );
                continue;
            }
            let values: Vec<Option<String>> = data_rows
                .iter()
                .map(|row| row.get(idx).cloned().flatten())
                .collect();
            columns.push(optional_string_column(&name, values));
        }

        Ok(DataFrame::new(columns)?)
    }
}
