use std::path::PathBuf;

use recon_core::{Report, ReportSummary};
use recon_ingest::TableFormat;
use recon_model::{ReconcileOptions, SourceKind};

#[derive(Debug)]
pub struct RunResult {
    pub output: PathBuf,
    pub sources: Vec<SourceSummary>,
    pub options: ReconcileOptions,
    pub report: Report,
    pub summary: ReportSummary,
    pub summary_json: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub format: TableFormat,
    /// File size in bytes.
    pub size: u64,
    pub rows: usize,
    pub columns: Vec<String>,
}
