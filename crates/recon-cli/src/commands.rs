use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use polars::prelude::DataFrame;
use recon_cli::config::{Overrides, resolve_config};
use recon_core::{PipelineInputs, ReportSummary, run_pipeline, validate_inputs};
use recon_ingest::{IngestOptions, load_path_with};
use recon_model::{CanonicalColumn, ColumnNormalizer, SourceKind};
use recon_output::{DEFAULT_REPORT_BASENAME, ExportFormat, export_report, unique_output_path};
use tracing::{debug, info, info_span};

use crate::cli::{RunArgs, SourceArgs};
use crate::summary::apply_table_style;
use crate::types::{RunResult, SourceSummary};

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Accepted headers"]);
    apply_table_style(&mut table);
    for column in CanonicalColumn::ALL {
        table.add_row(vec![
            column.header().to_string(),
            column.synonyms().join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &SourceArgs) -> Result<Vec<SourceSummary>> {
    let config = resolve_config(args.config.as_deref())?;
    let (inputs, sources) = load_sources(args, &config.ingest)?;
    validate_inputs(&inputs).context("validate sources")?;
    info!("sources are valid");
    Ok(sources)
}

pub fn run_reconcile(args: &RunArgs) -> Result<RunResult> {
    let config = resolve_config(args.sources.config.as_deref())?;
    let overrides = Overrides {
        address_prefix: args.address_prefix.clone(),
        drop_unaddressed: args.drop_unaddressed,
        exact_quantities: args.exact_quantities,
    };
    let options = overrides.apply(config.reconcile);
    debug!(
        prefix = %options.address_prefix,
        policy = ?options.no_address_policy,
        format = ?options.quantity_format,
        "reconcile options"
    );

    let (inputs, sources) = load_sources(&args.sources, &config.ingest)?;
    let report = run_pipeline(&inputs, &options).context("reconcile")?;
    let summary = report.summary();

    let output = match &args.output {
        Some(path) => path.clone(),
        None => unique_output_path(
            Path::new("."),
            DEFAULT_REPORT_BASENAME,
            ExportFormat::Xlsx.extension(),
        ),
    };
    let frame = report.to_dataframe().context("build report table")?;
    info_span!("export", path = %output.display())
        .in_scope(|| export_report(&frame, &output))
        .with_context(|| format!("write report {}", output.display()))?;

    if let Some(path) = &args.summary_json {
        write_summary_json(path, &summary)?;
    }

    Ok(RunResult {
        output,
        sources,
        options,
        report,
        summary,
        summary_json: args.summary_json.clone(),
    })
}

fn load_sources(
    args: &SourceArgs,
    ingest: &IngestOptions,
) -> Result<(PipelineInputs, Vec<SourceSummary>)> {
    let _guard = info_span!("load").entered();
    let mut sources = Vec::with_capacity(SourceKind::ALL.len());
    let mut normalizer = ColumnNormalizer::new();
    let mut load = |kind: SourceKind, path: &Path| -> Result<DataFrame> {
        let loaded = load_path_with(path, ingest, &mut normalizer)
            .with_context(|| format!("load {kind} source {}", path.display()))?;
        sources.push(SourceSummary {
            kind,
            path: loaded.path.clone(),
            format: loaded.format,
            size: loaded.size,
            rows: loaded.frame.height(),
            columns: loaded
                .frame
                .get_column_names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        });
        Ok(loaded.frame)
    };
    let inputs = PipelineInputs {
        status: load(SourceKind::Status, args.status.as_path())?,
        traceability: load(SourceKind::Traceability, args.traceability.as_path())?,
        stock: load(SourceKind::Stock, args.stock.as_path())?,
    };
    debug!(headers = normalizer.cached_len(), "source headers normalized");
    Ok((inputs, sources))
}

fn write_summary_json(path: &Path, summary: &ReportSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("create summary {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("write summary {}", path.display()))?;
    Ok(())
}
