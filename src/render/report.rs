//! Run report JSON generation.

use crate::domain::REPORT_SCHEMA_VERSION;
use crate::error::{MergeError, MergeResult};
use crate::pipeline::RunSummary;
use crate::utils::normalize_path;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn build_report(summary: &RunSummary, include_timestamp: bool) -> MergeResult<Value> {
    let mut files: Vec<Value> = summary
        .files
        .iter()
        .map(|f| json!({ "path": normalize_path(&f.path), "lines": f.lines }))
        .collect();
    files.sort_by(|a, b| a["path"].as_str().cmp(&b["path"].as_str()));

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("input_dir".to_string(), Value::String(normalize_path(&summary.input_dir)));
    report.insert("output_file".to_string(), Value::String(normalize_path(&summary.output_path)));
    report.insert("files".to_string(), Value::Array(files));
    report.insert(
        "scan".to_string(),
        json!({
            "entries_seen": summary.scan.entries_seen,
            "files_matched": summary.scan.files_matched,
            "files_skipped_extension": summary.scan.files_skipped_extension,
            "lines_read": summary.scan.lines_read,
        }),
    );
    report.insert("headers".to_string(), serde_json::to_value(&summary.headers)?);
    report.insert("header_used".to_string(), Value::String(summary.header_used.clone()));
    report.insert(
        "rows".to_string(),
        json!({
            "read": summary.rows_read,
            "unique": summary.rows_unique,
            "duplicates_removed": summary.duplicates_removed,
        }),
    );
    report.insert("statistics".to_string(), serde_json::to_value(&summary.statistics)?);

    Ok(Value::Object(report))
}

pub fn write_report(
    report_path: &Path,
    summary: &RunSummary,
    include_timestamp: bool,
) -> MergeResult<()> {
    let report = build_report(summary, include_timestamp)?;

    if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|source| MergeError::Write { path: parent.to_path_buf(), source })?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&report)?)
        .map_err(|source| MergeError::Write { path: report_path.to_path_buf(), source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FileSummary;
    use crate::scan::ScanStats;
    use crate::stats::{StatValue, SummaryValue};
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn summary() -> RunSummary {
        RunSummary {
            input_dir: PathBuf::from("input_data"),
            output_path: PathBuf::from("output_data/output.csv"),
            files: vec![
                FileSummary { path: PathBuf::from("input_data/b.dat"), lines: 3 },
                FileSummary { path: PathBuf::from("input_data/a.dat"), lines: 3 },
            ],
            scan: ScanStats {
                entries_seen: 3,
                files_matched: 2,
                files_skipped_extension: 1,
                lines_read: 6,
            },
            headers: vec!["id\tbasic_salary".to_string()],
            header_used: "id\tbasic_salary".to_string(),
            rows_read: 4,
            rows_unique: 3,
            duplicates_removed: 1,
            statistics: vec![
                SummaryValue { label: "Second Highest Salary:".into(), value: StatValue::Int(200) },
                SummaryValue { label: "Average Salary:".into(), value: StatValue::Float(200.0) },
            ],
        }
    }

    #[test]
    fn report_omits_timestamp_when_disabled() {
        let tmp = TempDir::new().expect("tmp");
        let report_path = tmp.path().join("nested").join("report.json");

        write_report(&report_path, &summary(), false).expect("write report");

        let content = fs::read_to_string(report_path).expect("read report");
        let parsed: serde_json::Value = serde_json::from_str(&content).expect("json");
        assert!(parsed.get("generated_at").is_none());
        assert_eq!(parsed["schema_version"], json!(REPORT_SCHEMA_VERSION));
        assert_eq!(parsed["rows"]["duplicates_removed"], json!(1));
        assert_eq!(parsed["files"][0]["path"], json!("input_data/a.dat"));
        assert_eq!(parsed["scan"]["files_skipped_extension"], json!(1));
        assert_eq!(parsed["scan"]["lines_read"], json!(6));
        assert_eq!(parsed["statistics"][0]["value"], json!(200));
        assert_eq!(parsed["statistics"][1]["label"], json!("Average Salary:"));
    }

    #[test]
    fn report_includes_timestamp_when_enabled() {
        let report = build_report(&summary(), true).expect("report");
        assert!(report["generated_at"].as_str().is_some_and(|s| s.ends_with("+00:00")));
    }
}
