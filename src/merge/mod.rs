//! Cross-file row deduplication.
//!
//! Every input file contributes its first line to the header set and its
//! remaining lines, trimmed, to the row set. Both sets collapse duplicates by
//! exact string equality and remember insertion order.

use crate::domain::{RawFile, RowOrder};
use crate::error::{MergeError, MergeResult, RowOrigin};
use indexmap::{IndexMap, IndexSet};

/// Deduplicated rows and headers gathered from a set of input files.
#[derive(Debug, Clone, Default)]
pub struct MergedData {
    rows: IndexMap<String, RowOrigin>,
    headers: IndexSet<String>,
    files_merged: usize,
    rows_read: usize,
}

impl MergedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a whole batch of files, failing on the first empty one.
    pub fn from_files(files: &[RawFile]) -> MergeResult<Self> {
        let mut merged = Self::new();
        for file in files {
            merged.absorb(file)?;
        }
        tracing::info!(
            "merged {} files: {} rows read, {} unique, {} header(s)",
            merged.files_merged,
            merged.rows_read,
            merged.rows.len(),
            merged.headers.len()
        );
        Ok(merged)
    }

    /// Add one file's header and body rows.
    pub fn absorb(&mut self, file: &RawFile) -> MergeResult<()> {
        let header =
            file.header().ok_or_else(|| MergeError::EmptyInputFile { path: file.path.clone() })?;
        self.headers.insert(header.to_string());

        for (line_no, line) in file.body() {
            self.rows_read += 1;
            let row = line.trim();
            if !self.rows.contains_key(row) {
                self.rows
                    .insert(row.to_string(), RowOrigin { path: file.path.clone(), line: line_no });
            }
        }
        self.files_merged += 1;
        Ok(())
    }

    /// Distinct header lines; index 0 is the first one seen.
    pub fn headers(&self) -> Vec<String> {
        self.headers.iter().cloned().collect()
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn files_merged(&self) -> usize {
        self.files_merged
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn duplicates_removed(&self) -> usize {
        self.rows_read - self.rows.len()
    }

    /// Unique rows with the location they were first seen at.
    pub fn rows(&self, order: RowOrder) -> Vec<(&str, &RowOrigin)> {
        let mut rows: Vec<(&str, &RowOrigin)> =
            self.rows.iter().map(|(row, origin)| (row.as_str(), origin)).collect();
        if order == RowOrder::Sorted {
            rows.sort_by(|a, b| a.0.cmp(b.0));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn file(name: &str, lines: &[&str]) -> RawFile {
        RawFile::new(name, lines.iter().map(|l| l.to_string()).collect())
    }

    fn row_set(merged: &MergedData) -> BTreeSet<String> {
        merged.rows(RowOrder::Insertion).into_iter().map(|(r, _)| r.to_string()).collect()
    }

    #[test]
    fn test_two_files_with_overlap() {
        let files = vec![
            file("a.dat", &["id\tbasic_salary", "1\t100", "2\t200"]),
            file("b.dat", &["id\tbasic_salary", "2\t200", "3\t300"]),
        ];
        let merged = MergedData::from_files(&files).unwrap();

        let expected: BTreeSet<String> =
            ["1\t100", "2\t200", "3\t300"].iter().map(|s| s.to_string()).collect();
        assert_eq!(row_set(&merged), expected);
        assert_eq!(merged.headers(), vec!["id\tbasic_salary"]);
        assert_eq!(merged.rows_read(), 4);
        assert_eq!(merged.duplicates_removed(), 1);
        assert_eq!(merged.files_merged(), 2);
    }

    #[test]
    fn test_absorbing_twice_is_idempotent() {
        let a = file("a.dat", &["h", "x", "y", "x"]);
        let mut once = MergedData::new();
        once.absorb(&a).unwrap();
        let mut twice = once.clone();
        twice.absorb(&a).unwrap();

        assert_eq!(row_set(&once), row_set(&twice));
        assert_eq!(once.headers(), twice.headers());
    }

    #[test]
    fn test_whitespace_variants_collapse() {
        let merged =
            MergedData::from_files(&[file("a.dat", &["h", "  1\t100", "1\t100   ", "\t1\t100 "])])
                .unwrap();
        // a leading tab is whitespace too, so all three trim to the same row
        assert_eq!(merged.row_count(), 1);
        assert_eq!(merged.rows(RowOrder::Insertion)[0].0, "1\t100");
    }

    #[test]
    fn test_header_kept_verbatim() {
        let merged = MergedData::from_files(&[
            file("a.dat", &["id\tbasic_salary "]),
            file("b.dat", &["id\tbasic_salary"]),
        ])
        .unwrap();
        assert_eq!(merged.header_count(), 2);
        assert_eq!(merged.headers()[0], "id\tbasic_salary ");
    }

    #[test]
    fn test_identical_headers_collapse() {
        let merged = MergedData::from_files(&[
            file("a.dat", &["id\tname"]),
            file("b.dat", &["id\tname"]),
            file("c.dat", &["name\tid"]),
        ])
        .unwrap();
        assert_eq!(merged.headers(), vec!["id\tname", "name\tid"]);
    }

    #[test]
    fn test_empty_file_fails_whole_merge() {
        let files = vec![file("good.dat", &["h", "1"]), file("empty.dat", &[])];
        let err = MergedData::from_files(&files).unwrap_err();
        match err {
            MergeError::EmptyInputFile { path } => assert_eq!(path.to_str(), Some("empty.dat")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_row_origin_is_first_occurrence() {
        let merged = MergedData::from_files(&[
            file("a.dat", &["h", "x"]),
            file("b.dat", &["h", "y", "x"]),
        ])
        .unwrap();
        let rows = merged.rows(RowOrder::Insertion);
        assert_eq!(rows[0].0, "x");
        assert_eq!(rows[0].1.path.to_str(), Some("a.dat"));
        assert_eq!(rows[0].1.line, 2);
        assert_eq!(rows[1].0, "y");
        assert_eq!(rows[1].1.line, 2);
    }

    #[test]
    fn test_sorted_row_order() {
        let merged = MergedData::from_files(&[file("a.dat", &["h", "c", "a", "b"])]).unwrap();
        let sorted: Vec<&str> = merged.rows(RowOrder::Sorted).into_iter().map(|(r, _)| r).collect();
        assert_eq!(sorted, vec!["a", "b", "c"]);
        let inserted: Vec<&str> =
            merged.rows(RowOrder::Insertion).into_iter().map(|(r, _)| r).collect();
        assert_eq!(inserted, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_no_files_yields_empty_sets() {
        let merged = MergedData::from_files(&[]).unwrap();
        assert_eq!(merged.row_count(), 0);
        assert!(merged.headers().is_empty());
    }
}
