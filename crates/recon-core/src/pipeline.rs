//! Reconciliation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: parse the three sources (byte-level callers only)
//! 2. **Status filter**: keep items with unallocated quantity
//! 3. **Extract**: per-item addresses from traceability and stock
//! 4. **Merge**: union, expand and attach stock quantities
//! 5. **Assemble**: derive labels and build the report
//!
//! The first failing stage aborts the run; there is no partial report.

use std::path::Path;

use polars::prelude::DataFrame;
use recon_ingest::{IngestError, IngestOptions, load_table_with};
use recon_model::{CanonicalColumn, ColumnNormalizer, ReconcileOptions, SourceKind};
use tracing::{info, info_span};

use crate::addresses::{extract_stock, extract_traceability_addresses};
use crate::columns::{has_column, present_columns, require_columns};
use crate::error::{ReconError, Result};
use crate::merge::reconcile;
use crate::report::{Report, assemble_report};
use crate::status::filter_status;

/// The three loaded source tables.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub status: DataFrame,
    pub traceability: DataFrame,
    pub stock: DataFrame,
}

impl PipelineInputs {
    pub fn frame(&self, kind: SourceKind) -> &DataFrame {
        match kind {
            SourceKind::Status => &self.status,
            SourceKind::Traceability => &self.traceability,
            SourceKind::Stock => &self.stock,
        }
    }
}

/// Raw content of one source with its declared extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub bytes: Vec<u8>,
    pub extension: String,
}

impl SourceInput {
    pub fn new(bytes: impl Into<Vec<u8>>, extension: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            extension: extension.into(),
        }
    }

    /// Reads a file, taking the extension from its name.
    pub fn read(path: &Path) -> std::result::Result<Self, IngestError> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self { bytes, extension })
    }
}

/// Raw content of all three sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub status: SourceInput,
    pub traceability: SourceInput,
    pub stock: SourceInput,
}

impl SourceSet {
    pub fn source(&self, kind: SourceKind) -> &SourceInput {
        match kind {
            SourceKind::Status => &self.status,
            SourceKind::Traceability => &self.traceability,
            SourceKind::Stock => &self.stock,
        }
    }

    /// Parses every source; the first failure aborts.
    pub fn load(&self, ingest: &IngestOptions) -> Result<PipelineInputs> {
        let mut normalizer = ColumnNormalizer::new();
        self.load_with(ingest, &mut normalizer)
    }

    /// Same as [`SourceSet::load`], normalizing headers through `normalizer`.
    pub fn load_with(
        &self,
        ingest: &IngestOptions,
        normalizer: &mut ColumnNormalizer,
    ) -> Result<PipelineInputs> {
        let mut load = |kind: SourceKind| -> Result<DataFrame> {
            let input = self.source(kind);
            load_table_with(&input.bytes, &input.extension, ingest, normalizer)
                .map_err(|error| ReconError::ingest(kind, error))
        };
        Ok(PipelineInputs {
            status: load(SourceKind::Status)?,
            traceability: load(SourceKind::Traceability)?,
            stock: load(SourceKind::Stock)?,
        })
    }
}

/// Checks every source for the columns its stage needs, without running it.
pub fn validate_inputs(inputs: &PipelineInputs) -> Result<()> {
    for kind in SourceKind::ALL {
        let df = inputs.frame(kind);
        require_columns(df, kind, kind.required_columns())?;
    }
    let traceability = &inputs.traceability;
    let has_single = has_column(traceability, CanonicalColumn::Address);
    let has_pair = has_column(traceability, CanonicalColumn::AddressOrigin)
        && has_column(traceability, CanonicalColumn::AddressDestination);
    if !has_single && !has_pair {
        return Err(ReconError::NoAddressColumn {
            present: present_columns(traceability),
        });
    }
    Ok(())
}

/// Runs every stage over already-loaded tables.
pub fn run_pipeline(inputs: &PipelineInputs, options: &ReconcileOptions) -> Result<Report> {
    let prefix = options.address_prefix.as_str();

    let status = info_span!("status_filter").in_scope(|| filter_status(&inputs.status))?;
    let traceability = info_span!("extract_traceability")
        .in_scope(|| extract_traceability_addresses(&inputs.traceability, prefix))?;
    let stock = info_span!("extract_stock").in_scope(|| extract_stock(&inputs.stock, prefix))?;
    let merged =
        info_span!("merge").in_scope(|| reconcile(&status, &traceability, &stock, options));
    let report =
        info_span!("assemble").in_scope(|| assemble_report(merged, options.quantity_format));

    let summary = report.summary();
    info!(
        status_items = status.len(),
        rows = summary.rows,
        items = summary.distinct_items,
        addresses = summary.distinct_addresses,
        vida = summary.vida_rows,
        "reconciliation complete"
    );
    Ok(report)
}

/// Loads raw sources and runs the pipeline.
pub fn run_from_sources(
    sources: &SourceSet,
    options: &ReconcileOptions,
    ingest: &IngestOptions,
) -> Result<Report> {
    let inputs = info_span!("load").in_scope(|| sources.load(ingest))?;
    run_pipeline(&inputs, options)
}
