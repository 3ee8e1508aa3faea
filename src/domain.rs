//! Core data types: run configuration, input files, and policy enums.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "input_data";
pub const DEFAULT_OUTPUT_DIR: &str = "output_data";
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";
pub const DEFAULT_EXTENSION: &str = ".dat";
pub const DEFAULT_SUMMARY_COLUMN: &str = "basic_salary";
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One input file as read from disk. The first line is the header, the
/// rest are data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl RawFile {
    pub fn new(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self { path: path.into(), lines }
    }

    pub fn header(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Data rows with their 1-based line numbers in the file.
    pub fn body(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().skip(1).map(|(idx, line)| (idx + 1, line.as_str()))
    }
}

/// What to do when input files declare different header lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// Use the first header seen and warn about the others.
    #[default]
    FirstSeen,
    /// Refuse to merge files whose headers differ.
    Strict,
}

impl HeaderPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first-seen" | "first" => Some(Self::FirstSeen),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Iteration order of the deduplicated rows in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    /// Order of first occurrence across the input files.
    #[default]
    Insertion,
    /// Lexicographic order of the trimmed row strings.
    Sorted,
}

/// How distinct values are ordered before picking the n-th one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistinctOrder {
    /// Largest value first.
    #[default]
    Descending,
    /// Order in which values are first met while iterating the rows.
    Encountered,
}

impl DistinctOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "descending" | "desc" => Some(Self::Descending),
            "encountered" | "first-seen" => Some(Self::Encountered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineTerminator {
    #[default]
    Crlf,
    Lf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatisticKind {
    NthDistinct,
    Mean,
    Min,
    Max,
    Sum,
    Count,
}

/// A single summary row appended after the data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatisticSpec {
    pub kind: StatisticKind,
    pub label: String,
    /// 1-based position for `nth-distinct`.
    #[serde(default = "default_rank")]
    pub rank: usize,
    #[serde(default)]
    pub order: DistinctOrder,
}

fn default_rank() -> usize {
    2
}

impl StatisticSpec {
    pub fn new(kind: StatisticKind, label: impl Into<String>) -> Self {
        Self { kind, label: label.into(), rank: default_rank(), order: DistinctOrder::default() }
    }

    pub fn nth_distinct(rank: usize, order: DistinctOrder, label: impl Into<String>) -> Self {
        Self { kind: StatisticKind::NthDistinct, label: label.into(), rank, order }
    }
}

/// Which column is aggregated and which statistics are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    pub column: String,
    pub statistics: Vec<StatisticSpec>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_SUMMARY_COLUMN.to_string(),
            statistics: vec![
                StatisticSpec::nth_distinct(2, DistinctOrder::Descending, "Second Highest Salary:"),
                StatisticSpec::new(StatisticKind::Mean, "Average Salary:"),
            ],
        }
    }
}

impl SummaryConfig {
    /// Switch the ordering of every `nth-distinct` statistic.
    pub fn set_distinct_order(&mut self, order: DistinctOrder) {
        for stat in &mut self.statistics {
            if stat.kind == StatisticKind::NthDistinct {
                stat.order = order;
            }
        }
    }
}

/// Full configuration for a merge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub extension: String,
    pub delimiter: char,
    pub sort_files: bool,
    pub row_order: RowOrder,
    pub header_policy: HeaderPolicy,
    pub line_terminator: LineTerminator,
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            delimiter: '\t',
            sort_files: false,
            row_order: RowOrder::default(),
            header_policy: HeaderPolicy::default(),
            line_terminator: LineTerminator::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}
