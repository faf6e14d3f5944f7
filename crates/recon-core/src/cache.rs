//! Content-addressed cache for reconciled reports.
//!
//! The key is a SHA-256 digest over all three source contents, their
//! extensions and the processing options, so a result is never served for a
//! different input combination.

use std::collections::HashMap;

use recon_ingest::IngestOptions;
use recon_model::{NoAddressPolicy, QuantityFormat, ReconcileOptions, SourceKind};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::pipeline::{SourceSet, run_from_sources};
use crate::report::Report;

/// Hex-encoded SHA-256 key of one input combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn compute(
        sources: &SourceSet,
        options: &ReconcileOptions,
        ingest: &IngestOptions,
    ) -> Self {
        let mut hasher = Sha256::new();
        for kind in SourceKind::ALL {
            let source = sources.source(kind);
            hasher.update(kind.label().as_bytes());
            hasher.update(source.extension.to_ascii_lowercase().as_bytes());
            hasher.update((source.bytes.len() as u64).to_le_bytes());
            hasher.update(&source.bytes);
        }
        hasher.update((options.address_prefix.len() as u64).to_le_bytes());
        hasher.update(options.address_prefix.as_bytes());
        hasher.update([
            match options.no_address_policy {
                NoAddressPolicy::Placeholder => 0u8,
                NoAddressPolicy::Drop => 1,
            },
            match options.quantity_format {
                QuantityFormat::Truncate => 0u8,
                QuantityFormat::Exact => 1,
            },
        ]);
        hasher.update(ingest.max_file_size.to_le_bytes());
        CacheKey(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run-scoped store of computed reports.
#[derive(Debug, Default)]
pub struct ReportCache {
    entries: HashMap<CacheKey, Report>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached report for these inputs, computing it on a miss.
    ///
    /// Failed runs are not cached.
    pub fn get_or_compute(
        &mut self,
        sources: &SourceSet,
        options: &ReconcileOptions,
        ingest: &IngestOptions,
    ) -> Result<&Report> {
        let key = CacheKey::compute(sources, options, ingest);
        if self.entries.contains_key(&key) {
            debug!(key = %key, "report cache hit");
        } else {
            debug!(key = %key, "report cache miss");
            let report = run_from_sources(sources, options, ingest)?;
            self.entries.insert(key.clone(), report);
        }
        Ok(&self.entries[&key])
    }

    pub fn contains(
        &self,
        sources: &SourceSet,
        options: &ReconcileOptions,
        ingest: &IngestOptions,
    ) -> bool {
        self.entries
            .contains_key(&CacheKey::compute(sources, options, ingest))
    }

    /// Drops every cached report.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SourceInput;

    fn sources(stock_quantity: &str) -> SourceSet {
        SourceSet {
            status: SourceInput::new(
                "Item,Descrição,Quantidade Não Alocada\nITEM001,Parafuso,10\n",
                "csv",
            ),
            traceability: SourceInput::new(
                "Item,Endereço Origem,Endereço Destino\nITEM001,A0001,A0003\n",
                "csv",
            ),
            stock: SourceInput::new(
                format!("Item,Endereço,Qtd Atual\nITEM001,A0001,{stock_quantity}\n"),
                "csv",
            ),
        }
    }

    #[test]
    fn key_depends_on_every_source_and_options() {
        let options = ReconcileOptions::default();
        let ingest = IngestOptions::default();
        let base = CacheKey::compute(&sources("5"), &options, &ingest);
        assert_eq!(base, CacheKey::compute(&sources("5"), &options, &ingest));
        assert_ne!(base, CacheKey::compute(&sources("6"), &options, &ingest));

        let mut other_status = sources("5");
        other_status.status.extension = "tsv".to_string();
        assert_ne!(base, CacheKey::compute(&other_status, &options, &ingest));

        let mut other_traceability = sources("5");
        other_traceability.traceability = SourceInput::new(
            "Item,Endereço Origem,Endereço Destino\nITEM001,A0001,A0004\n",
            "csv",
        );
        assert_ne!(base, CacheKey::compute(&other_traceability, &options, &ingest));

        let mut traceability_as_text = sources("5");
        traceability_as_text.traceability.extension = "txt".to_string();
        assert_ne!(base, CacheKey::compute(&traceability_as_text, &options, &ingest));

        let exact = options.clone().with_quantity_format(QuantityFormat::Exact);
        assert_ne!(base, CacheKey::compute(&sources("5"), &exact, &ingest));

        let other_prefix = options.clone().with_address_prefix("B1");
        assert_ne!(base, CacheKey::compute(&sources("5"), &other_prefix, &ingest));

        let drop = options.clone().with_no_address_policy(NoAddressPolicy::Drop);
        assert_ne!(base, CacheKey::compute(&sources("5"), &drop, &ingest));

        let smaller = ingest.with_max_file_size(1024);
        assert_ne!(base, CacheKey::compute(&sources("5"), &options, &smaller));
        assert_eq!(base.as_str().len(), 64);
    }

    #[test]
    fn computes_once_per_input_combination() {
        let mut cache = ReportCache::new();
        let options = ReconcileOptions::default();
        let ingest = IngestOptions::default();

        let first = cache
            .get_or_compute(&sources("5"), &options, &ingest)
            .unwrap()
            .clone();
        assert!(cache.contains(&sources("5"), &options, &ingest));
        assert!(!cache.contains(&sources("0"), &options, &ingest));

        let changed = cache
            .get_or_compute(&sources("0"), &options, &ingest)
            .unwrap()
            .clone();
        assert_ne!(first, changed);
        assert_eq!(cache.len(), 2);

        cache.invalidate();
        assert!(cache.is_empty());
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = ReportCache::new();
        let mut broken = sources("5");
        broken.stock = SourceInput::new("Item\nITEM001\n", "csv");
        let options = ReconcileOptions::default();
        let ingest = IngestOptions::default();
        assert!(cache.get_or_compute(&broken, &options, &ingest).is_err());
        assert!(cache.is_empty());
    }
}
