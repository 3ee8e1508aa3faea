//! Merge command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, validate_config, CliOverrides};
use crate::domain::{Config, DistinctOrder, HeaderPolicy};
use crate::pipeline::run_pipeline;
use crate::render::write_report;
use crate::utils::{format_with_commas, normalize_path};

#[derive(Args, Default)]
pub struct MergeArgs {
    /// Directory containing the .dat input files [default: input_data]
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory to write output.csv into [default: output_data]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Config file (TOML or YAML); auto-discovered in the working directory if omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Column to compute statistics over [default: basic_salary]
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// What to do when input headers differ: first-seen, strict
    #[arg(long, value_name = "POLICY")]
    pub header_policy: Option<String>,

    /// Ordering for nth-distinct statistics: descending, encountered
    #[arg(long, value_name = "ORDER")]
    pub distinct_order: Option<String>,

    /// Read input files in file-name order
    #[arg(long)]
    pub sort_files: bool,

    /// Also write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Omit the timestamp from the run report
    #[arg(long)]
    pub no_timestamp: bool,
}

pub(super) fn resolve_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    load_config(&cwd, config_path)
}

pub fn run(args: MergeArgs) -> Result<()> {
    let header_policy = match args.header_policy.as_deref() {
        Some(value) => Some(
            HeaderPolicy::parse(value)
                .with_context(|| format!("Invalid header policy: {value}"))?,
        ),
        None => None,
    };
    let distinct_order = match args.distinct_order.as_deref() {
        Some(value) => Some(
            DistinctOrder::parse(value)
                .with_context(|| format!("Invalid distinct order: {value}"))?,
        ),
        None => None,
    };

    let config = resolve_config(args.config.as_deref())?;
    let config = merge_cli_with_config(
        config,
        CliOverrides {
            input_dir: args.input,
            output_dir: args.output,
            column: args.column,
            header_policy,
            distinct_order,
            sort_files: args.sort_files,
        },
    );
    validate_config(&config)?;

    tracing::info!(
        "merging {} → {}",
        config.input_dir.display(),
        config.output_path().display()
    );
    let summary = run_pipeline(&config).with_context(|| {
        format!("Failed to merge files from {}", config.input_dir.display())
    })?;

    if let Some(report_path) = &args.report {
        write_report(report_path, &summary, !args.no_timestamp)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    }

    println!(
        "Merged {} files: {} rows read, {} unique ({} duplicates removed)",
        summary.files.len(),
        format_with_commas(summary.rows_read),
        format_with_commas(summary.rows_unique),
        format_with_commas(summary.duplicates_removed)
    );
    for stat in &summary.statistics {
        println!("{} {}", stat.label, stat.value);
    }
    println!("Wrote {}", normalize_path(&summary.output_path));
    if let Some(report_path) = &args.report {
        println!("Report: {}", normalize_path(report_path));
    }

    Ok(())
}
