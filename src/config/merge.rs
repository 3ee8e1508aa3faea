//! CLI overrides layered on top of a loaded config

use crate::domain::{Config, DistinctOrder, HeaderPolicy};
use std::path::PathBuf;

/// Values given on the command line. `None`/`false` leaves the config as is.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub column: Option<String>,
    pub header_policy: Option<HeaderPolicy>,
    pub distinct_order: Option<DistinctOrder>,
    pub sort_files: bool,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(column) = cli.column {
        config.summary.column = column;
    }
    if let Some(policy) = cli.header_policy {
        config.header_policy = policy;
    }
    if let Some(order) = cli.distinct_order {
        config.summary.set_distinct_order(order);
    }
    if cli.sort_files {
        config.sort_files = true;
    }
    config
}
