//! Command-line parsing for the delivery SLA evaluator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! evaluation code. Validation that needs domain knowledge (the `D+n` label)
//! happens in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Bucket;
use crate::io::xlsx::DEFAULT_WORKBOOK_NAME;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sla", version, about = "Delivery SLA evaluation and workbook report")]
pub struct Cli {
    /// Log level used when `RUST_LOG` is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a delivery log, print a summary and write the styled workbook.
    Report(ReportArgs),
    /// Evaluate a delivery log and print each table's rows.
    Show(ShowArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Pipe-delimited input file (`-` for standard input).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// SLA window as `D+<days>`.
    #[arg(long, env = "SLA_POLICY", default_value = "D+1")]
    pub sla: String,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Workbook path.
    #[arg(short, long, default_value = DEFAULT_WORKBOOK_NAME)]
    pub output: PathBuf,

    /// Skip writing the workbook (exports and summary only).
    #[arg(long)]
    pub no_workbook: bool,

    /// Export per-record results to CSV.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Export the bucketed report to JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Do not print the summary.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show one bucket.
    #[arg(long, value_enum)]
    pub bucket: Option<Bucket>,

    /// Only show records with a NOT MET verdict.
    #[arg(long)]
    pub not_met: bool,
}
