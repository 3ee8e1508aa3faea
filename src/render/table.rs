//! Header selection and the in-memory output table.

use crate::domain::HeaderPolicy;
use crate::error::{MergeError, MergeResult, RowOrigin};

/// Pick the header line that names the output columns.
pub fn select_header(headers: &[String], policy: HeaderPolicy) -> MergeResult<&str> {
    let first = headers.first().ok_or(MergeError::NoHeaders)?;
    if headers.len() > 1 {
        match policy {
            HeaderPolicy::Strict => {
                return Err(MergeError::HeaderMismatch { headers: headers.to_vec() });
            }
            HeaderPolicy::FirstSeen => {
                tracing::warn!(
                    "{} different header lines found; using the first one: {:?}",
                    headers.len(),
                    first
                );
            }
        }
    }
    Ok(first)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub fields: Vec<String>,
    pub origin: RowOrigin,
}

/// Header columns plus every unique row split into fields.
///
/// Construction fails if any row's field count differs from the header's.
#[derive(Debug, Clone)]
pub struct OutputTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl OutputTable {
    pub fn new<'a, I>(header: &str, rows: I, delimiter: char) -> MergeResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a RowOrigin)>,
    {
        let columns: Vec<String> = header.split(delimiter).map(str::to_string).collect();
        let mut table_rows = Vec::new();
        for (row, origin) in rows {
            let fields: Vec<String> = row.split(delimiter).map(str::to_string).collect();
            if fields.len() != columns.len() {
                return Err(MergeError::RaggedRow {
                    origin: origin.clone(),
                    expected: columns.len(),
                    found: fields.len(),
                });
            }
            table_rows.push(TableRow { fields, origin: origin.clone() });
        }
        Ok(Self { columns, rows: table_rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> MergeResult<usize> {
        self.columns.iter().position(|c| c == name).ok_or_else(|| MergeError::MissingColumn {
            column: name.to_string(),
            available: self.columns.clone(),
        })
    }

    /// Cells of one column, each paired with the row's origin.
    pub fn column(&self, name: &str) -> MergeResult<Vec<(&str, &RowOrigin)>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| (row.fields[idx].as_str(), &row.origin)).collect())
    }
}
