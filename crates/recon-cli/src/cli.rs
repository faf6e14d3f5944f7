//! CLI argument definitions for the reconciliation tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recon",
    version,
    about = "Stock traceability reconciliation",
    long_about = "Reconcile open-order status against traceability and stock exports.\n\n\
                  Lists every A0 storage address of each item with unallocated quantity,\n\
                  labelled with the quantity on hand or VIDA. Reads CSV, TSV, TXT and\n\
                  Excel workbooks; writes XLSX or CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile the three sources and write the report.
    Run(RunArgs),

    /// Load the sources and check their columns without writing a report.
    Validate(SourceArgs),

    /// List the canonical columns and the header spellings they accept.
    Columns,
}

/// The three input files plus an optional config file.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Traceability export (movements with addresses).
    #[arg(short = 'r', long = "traceability", value_name = "FILE")]
    pub traceability: PathBuf,

    /// Order status export (items with unallocated quantity).
    #[arg(short = 's', long = "status", value_name = "FILE")]
    pub status: PathBuf,

    /// Stock-on-hand export (quantity per item and address).
    #[arg(short = 'e', long = "stock", value_name = "FILE")]
    pub stock: PathBuf,

    /// TOML file with `[reconcile]` and `[ingest]` tables.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Report path; `.xlsx` or `.csv` (default: timestamped XLSX in the current directory).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Leave items without any matching address out of the report.
    #[arg(long = "drop-unaddressed")]
    pub drop_unaddressed: bool,

    /// Render fractional on-hand quantities exactly instead of truncating.
    #[arg(long = "exact-quantities")]
    pub exact_quantities: bool,

    /// Address prefix to reconcile (default: A0).
    #[arg(long = "address-prefix", value_name = "PREFIX")]
    pub address_prefix: Option<String>,

    /// Print the first N report rows.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    /// Write the summary counts as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
