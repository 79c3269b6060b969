//! CSV report export.
//!
//! One row per variance record; column order and header names come from the
//! export config, since the CSV is the compatibility surface with downstream
//! spreadsheet consumers. The summary is appended as a trailing block,
//! written to a sibling `<stem>-summary.csv`, or omitted, per config.

use std::path::{Path, PathBuf};

use dockcheck_recon::config::{ExportConfig, ExportField, SummaryPlacement};
use dockcheck_recon::model::{ReconciliationReport, VarianceRecord};

/// Render the per-record rows (with header) as CSV text.
pub fn render_records(
    report: &ReconciliationReport,
    export: &ExportConfig,
) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let headers: Vec<&str> = export.columns.iter().map(|c| c.header()).collect();
    writer.write_record(&headers).map_err(|e| e.to_string())?;

    for record in &report.records {
        let row: Vec<String> = export
            .columns
            .iter()
            .map(|c| field_value(record, c.field))
            .collect();
        writer.write_record(&row).map_err(|e| e.to_string())?;
    }

    finish(writer)
}

/// Render the summary block as metric,value rows.
pub fn render_summary(report: &ReconciliationReport) -> Result<String, String> {
    let s = &report.summary;
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["metric", "value"])
        .map_err(|e| e.to_string())?;

    let rows: [(&str, usize); 9] = [
        ("total_challan_lines", s.total_challan_lines),
        ("total_sticker_lines", s.total_sticker_lines),
        ("matched", s.matched_count),
        ("quantity_mismatch", s.mismatch_count),
        ("missing_from_sticker", s.missing_count),
        ("extra_in_sticker", s.extra_count),
        ("unidentified", s.unidentified_count),
        ("challan_anomalies", s.challan_anomalies),
        ("sticker_anomalies", s.sticker_anomalies),
    ];
    for (metric, value) in rows {
        let value = value.to_string();
        writer
            .write_record([metric, value.as_str()])
            .map_err(|e| e.to_string())?;
    }

    finish(writer)
}

/// Write the report to `path`, honoring the configured summary placement.
/// Returns any extra file written (the separate summary file).
pub fn write_report(
    report: &ReconciliationReport,
    export: &ExportConfig,
    path: &Path,
) -> Result<Option<PathBuf>, String> {
    let mut body = render_records(report, export)?;

    match export.summary {
        SummaryPlacement::Trailing => {
            body.push('\n');
            body.push_str(&render_summary(report)?);
            std::fs::write(path, body).map_err(|e| e.to_string())?;
            Ok(None)
        }
        SummaryPlacement::SeparateFile => {
            std::fs::write(path, body).map_err(|e| e.to_string())?;
            let summary_path = summary_sibling(path);
            std::fs::write(&summary_path, render_summary(report)?).map_err(|e| e.to_string())?;
            Ok(Some(summary_path))
        }
        SummaryPlacement::Omit => {
            std::fs::write(path, body).map_err(|e| e.to_string())?;
            Ok(None)
        }
    }
}

fn summary_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".into());
    path.with_file_name(format!("{stem}-summary.csv"))
}

fn field_value(record: &VarianceRecord, field: ExportField) -> String {
    match field {
        ExportField::Identifier => record.identifier.clone(),
        ExportField::Description => record.description.clone(),
        ExportField::Unit => record.unit.clone().unwrap_or_default(),
        ExportField::ExpectedQty => opt_qty(record.expected_qty),
        ExportField::ActualQty => opt_qty(record.actual_qty),
        ExportField::Delta => record.delta.to_string(),
        ExportField::Category => record.category.to_string(),
        ExportField::Confidence => record.confidence.to_string(),
        ExportField::Similarity => record
            .similarity
            .map(|s| format!("{s:.4}"))
            .unwrap_or_default(),
    }
}

fn opt_qty(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, String> {
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockcheck_recon::config::{ColumnSpec, ReconConfig};
    use dockcheck_recon::engine::{load_input, run};

    fn sample_report() -> ReconciliationReport {
        let challan = r#"{
            "challan_number": "DC-1",
            "lines": [
                { "sku": "A1", "description": "Cotton Tee", "size": "M", "qty": 10 },
                { "sku": "B2", "description": "Linen Shirt", "size": "L", "qty": 4 }
            ]
        }"#;
        let stickers = r#"{
            "scans": [ { "sku": "A1", "style": "Cotton Tee", "size": "M", "qty": 8 } ]
        }"#;
        let input = load_input(challan, stickers).unwrap();
        run(&ReconConfig::default(), &input).unwrap()
    }

    #[test]
    fn default_columns_and_rows() {
        let report = sample_report();
        let csv = render_records(&report, &ExportConfig::default()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "identifier,description,expected_qty,actual_qty,delta,category,confidence"
        );
        assert_eq!(
            lines.next().unwrap(),
            "A1,Cotton Tee,10,8,-2,quantity_mismatch,exact"
        );
        assert_eq!(
            lines.next().unwrap(),
            "B2,Linen Shirt,4,,-4,missing_from_sticker,none"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn custom_columns_and_header_overrides() {
        let report = sample_report();
        let export = ExportConfig {
            summary: SummaryPlacement::Omit,
            columns: vec![
                ColumnSpec {
                    field: ExportField::Identifier,
                    header: Some("SKU".into()),
                },
                ColumnSpec {
                    field: ExportField::Delta,
                    header: None,
                },
            ],
        };
        let csv = render_records(&report, &export).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "SKU,delta");
        assert_eq!(lines.next().unwrap(), "A1,-2");
    }

    #[test]
    fn summary_block_rows() {
        let report = sample_report();
        let csv = render_summary(&report).unwrap();
        assert!(csv.starts_with("metric,value\n"));
        assert!(csv.contains("quantity_mismatch,1\n"));
        assert!(csv.contains("missing_from_sticker,1\n"));
        assert!(csv.contains("total_challan_lines,2\n"));
    }

    #[test]
    fn trailing_summary_written_into_same_file() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let extra = write_report(&report, &ExportConfig::default(), &path).unwrap();
        assert!(extra.is_none());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("quantity_mismatch,exact"));
        assert!(content.contains("\n\nmetric,value\n"));
    }

    #[test]
    fn separate_summary_file_named_after_stem() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aug-12.csv");

        let export = ExportConfig {
            summary: SummaryPlacement::SeparateFile,
            ..ExportConfig::default()
        };
        let extra = write_report(&report, &export, &path).unwrap();

        let summary_path = extra.unwrap();
        assert_eq!(summary_path.file_name().unwrap(), "aug-12-summary.csv");
        assert!(std::fs::read_to_string(summary_path)
            .unwrap()
            .starts_with("metric,value"));
        assert!(!std::fs::read_to_string(&path).unwrap().contains("metric,value"));
    }
}
