//! read → merge → write+summarize

use crate::domain::{Config, RawFile};
use crate::error::{MergeError, MergeResult};
use crate::merge::MergedData;
use crate::render::{select_header, write_output, OutputTable};
use crate::scan::{DatScanner, ScanStats};
use crate::stats::{summarize, SummaryValue};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub lines: usize,
}

/// What a completed run read and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub files: Vec<FileSummary>,
    pub scan: ScanStats,
    pub headers: Vec<String>,
    pub header_used: String,
    pub rows_read: usize,
    pub rows_unique: usize,
    pub duplicates_removed: usize,
    pub statistics: Vec<SummaryValue>,
}

/// Read every input file named by the config, with the scanner's counters.
pub fn load_inputs(config: &Config) -> MergeResult<(Vec<RawFile>, ScanStats)> {
    let mut scanner = DatScanner::new(config.input_dir.clone())
        .extension(config.extension.clone())
        .sort_by_name(config.sort_files);
    let files = scanner.scan()?;
    tracing::info!(
        "read {} `{}` files from {}",
        files.len(),
        config.extension,
        config.input_dir.display()
    );
    Ok((files, scanner.stats().clone()))
}

/// Build the output table, compute the statistics, and write the CSV.
///
/// The output directory is created first. Statistics are computed before the
/// file is written, so a failing statistic leaves no `output.csv` behind.
pub fn write_and_summarize(
    merged: &MergedData,
    config: &Config,
) -> MergeResult<(PathBuf, String, Vec<SummaryValue>)> {
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|source| MergeError::Write { path: config.output_dir.clone(), source })?;

    let headers = merged.headers();
    let header = select_header(&headers, config.header_policy)?;
    let table = OutputTable::new(header, merged.rows(config.row_order), config.delimiter)?;
    let statistics = summarize(&table, &config.summary)?;

    let written =
        write_output(&config.output_path(), &table, &statistics, config.line_terminator)?;
    Ok((written, header.to_string(), statistics))
}

pub fn run_pipeline(config: &Config) -> MergeResult<RunSummary> {
    let (files, scan) = load_inputs(config)?;
    let merged = MergedData::from_files(&files)?;
    let (output_path, header_used, statistics) = write_and_summarize(&merged, config)?;

    Ok(RunSummary {
        input_dir: config.input_dir.clone(),
        output_path,
        files: files
            .iter()
            .map(|f| FileSummary { path: f.path.clone(), lines: f.lines.len() })
            .collect(),
        scan,
        headers: merged.headers(),
        header_used,
        rows_read: merged.rows_read(),
        rows_unique: merged.row_count(),
        duplicates_removed: merged.duplicates_removed(),
        statistics,
    })
}
