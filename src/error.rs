//! Error taxonomy for the read → merge → write pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type MergeResult<T> = Result<T, MergeError>;

/// Where a data row first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOrigin {
    pub path: PathBuf,
    /// 1-based line number inside `path`.
    pub line: usize,
}

impl std::fmt::Display for RowOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

#[derive(Debug, Error)]
pub enum MergeError {
    // ── Loading ───────────────────────────────────────────────────────────────
    #[error("cannot read input directory {}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read input file {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Merging ───────────────────────────────────────────────────────────────
    #[error("input file {} is empty (no header line)", .path.display())]
    EmptyInputFile { path: PathBuf },

    #[error("no header line found: no input files were read")]
    NoHeaders,

    #[error("input files declare {} different header lines", .headers.len())]
    HeaderMismatch { headers: Vec<String> },

    #[error("row at {origin} has {found} fields but the header has {expected}")]
    RaggedRow { origin: RowOrigin, expected: usize, found: usize },

    // ── Statistics ────────────────────────────────────────────────────────────
    #[error("column `{column}` not found in header [{}]", .available.join(", "))]
    MissingColumn { column: String, available: Vec<String> },

    #[error("non-numeric value `{value}` in column `{column}` at {origin}")]
    NonNumericCell { column: String, value: String, origin: RowOrigin },

    #[error("column `{column}` has {found} distinct values, cannot take value #{rank}")]
    InsufficientDistinctValues { column: String, rank: usize, found: usize },

    #[error("column `{column}` has no values")]
    EmptyColumn { column: String },

    // ── Output ────────────────────────────────────────────────────────────────
    #[error("cannot write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write failed")]
    Csv(#[from] csv::Error),

    #[error("cannot serialize run report")]
    Report(#[from] serde_json::Error),
}
