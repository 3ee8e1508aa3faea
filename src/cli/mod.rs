//! Command-line interface for dat-merge
//!
//! Provides `merge` (the default when no subcommand is given) and `info`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod info;
mod merge;

/// Merge and deduplicate .dat files into a single CSV with summary statistics
#[derive(Parser)]
#[command(name = "dat-merge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge input files into output.csv and append statistics (default)
    Merge(merge::MergeArgs),

    /// Show what would be merged without writing anything
    Info(info::InfoArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(build_filter(cli.verbose))
        .try_init();

    match cli.command {
        Some(Commands::Merge(args)) => merge::run(args),
        Some(Commands::Info(args)) => info::run(args),
        None => merge::run(merge::MergeArgs::default()),
    }
}

/// Log filter for the CLI. `RUST_LOG` always takes precedence; without it the
/// level is DEBUG with `--verbose` and WARN otherwise.
fn build_filter(verbose: bool) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    filter_from(verbose, &env)
}

fn filter_from(verbose: bool, env: &str) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::builder().with_default_directive(level.into()).parse_lossy(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_level_survives() {
        assert_eq!(filter_from(false, "info").to_string(), "info");
        assert_eq!(filter_from(true, "info").to_string(), "info");
    }

    #[test]
    fn test_rust_log_target_directive_survives() {
        let filter = filter_from(false, "dat_merge=trace").to_string();
        assert!(filter.contains("dat_merge=trace"), "got {filter}");
    }

    #[test]
    fn test_default_level_without_rust_log() {
        assert_eq!(filter_from(false, "").to_string(), "warn");
        assert_eq!(filter_from(true, "").to_string(), "debug");
    }
}
