//! Atomic CSV output.
//!
//! The table is written to a temporary file next to the destination and
//! persisted over `output.csv` only once every row has been written. A run
//! that fails midway never leaves a truncated output file behind.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::{Terminator, Writer, WriterBuilder};
use tempfile::NamedTempFile;

use crate::domain::LineTerminator;
use crate::error::{MergeError, MergeResult};
use crate::render::OutputTable;
use crate::stats::SummaryValue;

/// A CSV writer that only replaces its destination on [`finish`](Self::finish).
///
/// Records may have differing widths so the two-field summary rows can follow
/// the data rows.
pub struct AtomicCsvWriter {
    writer: Writer<BufWriter<NamedTempFile>>,
    final_path: PathBuf,
}

impl AtomicCsvWriter {
    pub fn new(final_path: impl AsRef<Path>, terminator: LineTerminator) -> MergeResult<Self> {
        let final_path = final_path.as_ref().to_path_buf();

        let parent_dir = match final_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let temp_file = NamedTempFile::new_in(&parent_dir)
            .map_err(|source| MergeError::Write { path: final_path.clone(), source })?;

        let terminator = match terminator {
            LineTerminator::Crlf => Terminator::CRLF,
            LineTerminator::Lf => Terminator::Any(b'\n'),
        };
        let writer = WriterBuilder::new()
            .flexible(true)
            .terminator(terminator)
            .from_writer(BufWriter::new(temp_file));

        Ok(Self { writer, final_path })
    }

    pub fn write_record<I, T>(&mut self, record: I) -> MergeResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(record)?;
        Ok(())
    }

    /// Flush everything and move the temporary file over the destination.
    pub fn finish(self) -> MergeResult<PathBuf> {
        let final_path = self.final_path;

        let buf_writer = self.writer.into_inner().map_err(|e| MergeError::Write {
            path: final_path.clone(),
            source: std::io::Error::new(e.error().kind(), e.error().to_string()),
        })?;

        let named_temp = buf_writer
            .into_inner()
            .map_err(|e| MergeError::Write { path: final_path.clone(), source: e.into_error() })?;

        named_temp
            .persist(&final_path)
            .map_err(|e| MergeError::Write { path: final_path.clone(), source: e.error })?;

        Ok(final_path)
    }
}

/// Write the header, the data rows, and one `[label, value]` row per statistic.
pub fn write_output(
    path: &Path,
    table: &OutputTable,
    summary: &[SummaryValue],
    terminator: LineTerminator,
) -> MergeResult<PathBuf> {
    let mut writer = AtomicCsvWriter::new(path, terminator)?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(&row.fields)?;
    }
    for stat in summary {
        writer.write_record([stat.label.clone(), stat.value.to_string()])?;
    }

    let written = writer.finish()?;
    tracing::info!("wrote {} data rows to {}", table.rows().len(), written.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowOrigin;
    use crate::stats::StatValue;
    use std::fs;
    use tempfile::TempDir;

    fn sample_table() -> OutputTable {
        let origin = RowOrigin { path: PathBuf::from("a.dat"), line: 2 };
        OutputTable::new(
            "id\tname\tbasic_salary",
            vec![("1\tAda\t100", &origin), ("2\tLin, Bo\t200", &origin)],
            '\t',
        )
        .unwrap()
    }

    fn sample_summary() -> Vec<SummaryValue> {
        vec![
            SummaryValue { label: "Second Highest Salary:".into(), value: StatValue::Int(100) },
            SummaryValue { label: "Average Salary:".into(), value: StatValue::Float(150.0) },
        ]
    }

    #[test]
    fn test_write_output_crlf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output.csv");

        write_output(&path, &sample_table(), &sample_summary(), LineTerminator::Crlf).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "id,name,basic_salary\r\n1,Ada,100\r\n2,\"Lin, Bo\",200\r\n\
             Second Highest Salary:,100\r\nAverage Salary:,150.0\r\n"
        );
    }

    #[test]
    fn test_write_output_lf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output.csv");

        write_output(&path, &sample_table(), &[], LineTerminator::Lf).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(!content.contains('\r'));
    }

    #[test]
    fn test_overwrites_existing_output() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output.csv");
        fs::write(&path, "stale content that is much longer than the new file\n".repeat(50))
            .unwrap();

        write_output(&path, &sample_table(), &[], LineTerminator::Lf).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_dropped_writer_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output.csv");

        {
            let mut writer = AtomicCsvWriter::new(&path, LineTerminator::Crlf).unwrap();
            writer.write_record(["id", "basic_salary"]).unwrap();
        }

        assert!(!path.exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
