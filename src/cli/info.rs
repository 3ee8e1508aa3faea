//! Info command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::merge::resolve_config;
use crate::config::validate_config;
use crate::merge::MergedData;
use crate::pipeline::load_inputs;
use crate::utils::{format_with_commas, normalize_path};

#[derive(Args)]
pub struct InfoArgs {
    /// Directory containing the input files [default: input_data]
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Config file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File-name suffix to match [default: .dat]
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(path) = args.path {
        config.input_dir = path;
    }
    if let Some(extension) = args.extension {
        config.extension = extension;
    }
    validate_config(&config)?;

    let (files, scan) = load_inputs(&config)
        .with_context(|| format!("Failed to read {}", config.input_dir.display()))?;

    println!("Input directory: {}", normalize_path(&config.input_dir));
    println!("Files ({}):", files.len());
    for file in &files {
        println!("  {} ({} lines)", normalize_path(&file.path), file.lines.len());
    }
    if scan.files_skipped_extension > 0 {
        println!(
            "  ({} skipped, not matching `{}`)",
            format_with_commas(scan.files_skipped_extension),
            config.extension
        );
    }

    let merged = MergedData::from_files(&files)?;
    let headers = merged.headers();
    println!("Headers ({}):", merged.header_count());
    for header in &headers {
        println!("  {}", header.split(config.delimiter).collect::<Vec<_>>().join(", "));
    }

    println!("Statistics:");
    println!("  Files merged: {}", format_with_commas(merged.files_merged()));
    println!("  Lines read: {}", format_with_commas(scan.lines_read));
    println!("  Rows read: {}", format_with_commas(merged.rows_read()));
    println!("  Unique rows: {}", format_with_commas(merged.row_count()));
    println!("  Duplicates removed: {}", format_with_commas(merged.duplicates_removed()));

    Ok(())
}
