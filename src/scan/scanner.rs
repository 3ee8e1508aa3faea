//! Flat directory scanner for delimited data files

use crate::domain::{RawFile, DEFAULT_EXTENSION};
use crate::error::{MergeError, MergeResult};
use crate::utils::read_lines;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub entries_seen: usize,
    pub files_matched: usize,
    pub files_skipped_extension: usize,
    pub lines_read: usize,
}

/// Reads every file directly inside a directory whose name ends with the
/// configured extension. Subdirectories are not descended into.
pub struct DatScanner {
    root_path: PathBuf,
    extension: String,
    sort_by_name: bool,
    stats: ScanStats,
}

impl DatScanner {
    /// Create a new DatScanner with default settings.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            extension: DEFAULT_EXTENSION.to_string(),
            sort_by_name: false,
            stats: ScanStats::default(),
        }
    }

    /// Set the file-name suffix to match (e.g. ".dat", ".tsv")
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Read files in file-name order instead of directory-listing order
    pub fn sort_by_name(mut self, sort: bool) -> Self {
        self.sort_by_name = sort;
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    fn matches(&self, name: &str) -> bool {
        name.ends_with(&self.extension)
    }

    /// Scan the directory and read each matching file in full.
    pub fn scan(&mut self) -> MergeResult<Vec<RawFile>> {
        self.stats = ScanStats::default();

        let metadata = std::fs::metadata(&self.root_path)
            .map_err(|source| MergeError::InputDir { path: self.root_path.clone(), source })?;
        if !metadata.is_dir() {
            return Err(MergeError::InputDir {
                path: self.root_path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            });
        }

        let mut walker = WalkDir::new(&self.root_path).min_depth(1).max_depth(1).follow_links(true);
        if self.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry_result in walker {
            let entry = entry_result.map_err(|err| MergeError::InputDir {
                path: self.root_path.clone(),
                source: err.into(),
            })?;
            self.stats.entries_seen += 1;

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.matches(&entry.file_name().to_string_lossy()) {
                self.stats.files_skipped_extension += 1;
                continue;
            }

            let path = entry.into_path();
            let lines = read_lines(&path)
                .map_err(|source| MergeError::ReadFile { path: path.clone(), source })?;
            tracing::debug!("read {} ({} lines)", path.display(), lines.len());

            self.stats.files_matched += 1;
            self.stats.lines_read += lines.len();
            files.push(RawFile::new(path, lines));
        }

        Ok(files)
    }
}
