use std::collections::HashMap;

use crate::model::{
    NormalizeOutput, ReconciliationReport, ReportMeta, ReportSummary, VarianceCategory,
    VarianceRecord,
};

/// Assemble the final report from classified records.
///
/// Record ordering is preserved as produced upstream (challan-declared order,
/// then sticker-only extras). The per-category counts always sum to
/// `records.len()`. No I/O happens here; export collaborators consume the
/// returned structure.
pub fn build_report(
    records: Vec<VarianceRecord>,
    challan: &NormalizeOutput,
    stickers: &NormalizeOutput,
    meta: ReportMeta,
) -> ReconciliationReport {
    let mut category_counts: HashMap<String, usize> = HashMap::new();
    let mut matched_count = 0;
    let mut mismatch_count = 0;
    let mut missing_count = 0;
    let mut extra_count = 0;
    let mut unidentified_count = 0;

    for r in &records {
        *category_counts.entry(r.category.to_string()).or_insert(0) += 1;

        match r.category {
            VarianceCategory::Match => matched_count += 1,
            VarianceCategory::QuantityMismatch => mismatch_count += 1,
            VarianceCategory::MissingFromSticker => missing_count += 1,
            VarianceCategory::ExtraInSticker => extra_count += 1,
            VarianceCategory::Unidentified => unidentified_count += 1,
        }
    }

    let mut anomalies = challan.anomalies.clone();
    anomalies.extend(stickers.anomalies.iter().cloned());

    ReconciliationReport {
        meta,
        summary: ReportSummary {
            total_challan_lines: challan.input_lines,
            total_sticker_lines: stickers.input_lines,
            matched_count,
            mismatch_count,
            missing_count,
            extra_count,
            unidentified_count,
            challan_anomalies: challan.anomalies.len(),
            sticker_anomalies: stickers.anomalies.len(),
            category_counts,
        },
        records,
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anomaly, ItemSource, MatchConfidence};

    fn record(category: VarianceCategory) -> VarianceRecord {
        VarianceRecord {
            category,
            identifier: "A1".into(),
            description: "desc".into(),
            unit: None,
            expected_qty: Some(1.0),
            actual_qty: Some(1.0),
            delta: 0.0,
            confidence: MatchConfidence::Exact,
            similarity: None,
        }
    }

    fn side(lines: usize, anomalies: usize) -> NormalizeOutput {
        NormalizeOutput {
            items: Vec::new(),
            anomalies: (0..anomalies)
                .map(|i| Anomaly {
                    source: ItemSource::Challan,
                    identifier: format!("A{i}"),
                    quantity: "x".into(),
                    reason: "quantity 'x' is not numeric".into(),
                })
                .collect(),
            input_lines: lines,
        }
    }

    fn meta() -> ReportMeta {
        ReportMeta {
            challan_number: None,
            challan_date: None,
            engine_version: "test".into(),
            run_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn counts_sum_to_record_total() {
        let records = vec![
            record(VarianceCategory::Match),
            record(VarianceCategory::Match),
            record(VarianceCategory::QuantityMismatch),
            record(VarianceCategory::MissingFromSticker),
            record(VarianceCategory::ExtraInSticker),
            record(VarianceCategory::Unidentified),
        ];
        let report = build_report(records, &side(5, 0), &side(3, 0), meta());
        let s = &report.summary;
        assert_eq!(
            s.matched_count
                + s.mismatch_count
                + s.missing_count
                + s.extra_count
                + s.unidentified_count,
            report.records.len()
        );
        assert_eq!(s.matched_count, 2);
        assert_eq!(s.category_counts["match"], 2);
        assert_eq!(s.category_counts["unidentified"], 1);
        assert_eq!(s.total_challan_lines, 5);
        assert_eq!(s.total_sticker_lines, 3);
    }

    #[test]
    fn anomalies_counted_per_side_and_collected() {
        let report = build_report(Vec::new(), &side(4, 2), &side(6, 1), meta());
        assert_eq!(report.summary.challan_anomalies, 2);
        assert_eq!(report.summary.sticker_anomalies, 1);
        assert_eq!(report.anomalies.len(), 3);
    }

    #[test]
    fn empty_run_yields_zeroed_summary() {
        let report = build_report(Vec::new(), &side(0, 0), &side(0, 0), meta());
        let s = &report.summary;
        assert_eq!(s.total_challan_lines, 0);
        assert_eq!(s.total_sticker_lines, 0);
        assert_eq!(s.matched_count, 0);
        assert_eq!(s.missing_count, 0);
        assert_eq!(s.extra_count, 0);
        assert!(report.records.is_empty());
    }
}
