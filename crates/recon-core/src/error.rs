//! Error types for the reconciliation pipeline.

use recon_ingest::IngestError;
use recon_model::SourceKind;
use thiserror::Error;

/// Coarse classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unsupported or corrupt input.
    Format,
    /// Required canonical column absent after normalization.
    Validation,
    /// Unexpected failure while merging or deriving.
    Computation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::Format => "format",
            ErrorKind::Validation => "validation",
            ErrorKind::Computation => "computation",
        })
    }
}

/// Errors that abort a reconciliation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReconError {
    // === Format Errors ===
    /// A source could not be loaded.
    #[error("failed to load {source_kind} source: {error}")]
    Ingest {
        source_kind: SourceKind,
        #[source]
        error: IngestError,
    },

    // === Validation Errors ===
    /// Required columns missing from a source.
    #[error(
        "{source_kind} source is missing required columns: {} (present: {})",
        missing.join(", "),
        present.join(", ")
    )]
    MissingColumns {
        source_kind: SourceKind,
        missing: Vec<String>,
        present: Vec<String>,
    },

    /// Traceability has neither a single address column nor an origin/destination pair.
    #[error(
        "traceability source has no usable address column: expected 'Endereço' or both 'Endereço Origem' and 'Endereço Destino' (present: {})",
        present.join(", ")
    )]
    NoAddressColumn { present: Vec<String> },

    // === Computation Errors ===
    /// Unexpected failure inside a stage.
    #[error("computation failed: {message}")]
    Computation { message: String },
}

impl ReconError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconError::Ingest { .. } => ErrorKind::Format,
            ReconError::MissingColumns { .. } | ReconError::NoAddressColumn { .. } => {
                ErrorKind::Validation
            }
            ReconError::Computation { .. } => ErrorKind::Computation,
        }
    }

    pub fn ingest(source_kind: SourceKind, error: IngestError) -> Self {
        Self::Ingest { source_kind, error }
    }
}

impl From<polars::prelude::PolarsError> for ReconError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Computation {
            message: err.to_string(),
        }
    }
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_missing_and_present() {
        let err = ReconError::MissingColumns {
            source_kind: SourceKind::Status,
            missing: vec!["Quantidade Não Alocada".to_string()],
            present: vec!["Item".to_string(), "Descrição".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "status source is missing required columns: Quantidade Não Alocada (present: Item, Descrição)"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn kinds() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("x".into());
        let err: ReconError = polars_err.into();
        assert_eq!(err.kind(), ErrorKind::Computation);

        let err = ReconError::ingest(SourceKind::Stock, IngestError::EmptyTable);
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(
            err.to_string(),
            "failed to load stock source: table is empty: no data rows below the header"
        );
    }
}
