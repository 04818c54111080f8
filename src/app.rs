//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the evaluation pipeline
//! - prints summaries/listings
//! - writes the workbook and optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, InputArgs, ReportArgs, ShowArgs};
use crate::domain::{Bucket, ReportConfig, SlaPolicy};
use crate::error::{AppError, EXIT_INPUT};

pub mod pipeline;

/// Entry point for the `sla` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may provide SLA_POLICY / RUST_LOG; a missing file is fine.
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();
    crate::logging::init_logging(&cli.log_level);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args)?;
    let run = pipeline::run_evaluation(&config.input, config.sla)?;

    if config.print_summary {
        println!(
            "{}",
            crate::report::format_run_summary(&run.source, &run.stats, &run.report)
        );
    }

    if let Some(path) = &config.output {
        crate::io::xlsx::write_workbook(path, &run.report)?;
        if config.print_summary {
            println!("Workbook: {}", path.display());
        }
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_records_csv(path, &run.report)?;
        info!(path = %path.display(), "csv export written");
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_report_json(path, &run.report, &run.stats)?;
        info!(path = %path.display(), "json export written");
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let sla = sla_from_args(&args.input)?;
    let run = pipeline::run_evaluation(&args.input.input, sla)?;

    let buckets: Vec<Bucket> = match args.bucket {
        Some(bucket) => vec![bucket],
        None => Bucket::ALL.to_vec(),
    };
    print!(
        "{}",
        crate::report::format_tables(&run.report, &buckets, args.not_met)
    );
    Ok(())
}

/// Resolve the `--sla` label (flag, then `SLA_POLICY`, then `D+1`).
pub fn sla_from_args(args: &InputArgs) -> Result<SlaPolicy, AppError> {
    SlaPolicy::parse(&args.sla).ok_or_else(|| {
        AppError::new(
            EXIT_INPUT,
            format!("Invalid SLA '{}': expected D+<days>, e.g. D+1.", args.sla),
        )
    })
}

pub fn report_config_from_args(args: &ReportArgs) -> Result<ReportConfig, AppError> {
    Ok(ReportConfig {
        input: args.input.input.clone(),
        sla: sla_from_args(&args.input)?,
        output: (!args.no_workbook).then(|| args.output.clone()),
        export_csv: args.csv.clone(),
        export_json: args.json.clone(),
        print_summary: !args.quiet,
    })
}
