use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which side of the reconciliation a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    Challan,
    Sticker,
}

impl std::fmt::Display for ItemSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Challan => write!(f, "challan"),
            Self::Sticker => write!(f, "sticker"),
        }
    }
}

/// A single line item as produced by the extraction collaborator.
///
/// Quantity is carried as raw text; numeric JSON values are stringified at
/// intake and parsed at the normalize boundary. Extraction output is
/// untrusted, so no field here is assumed well-formed.
#[derive(Debug, Clone)]
pub struct RawItemRecord {
    pub source: ItemSource,
    pub identifier: String,
    pub description: String,
    pub quantity: String,
    pub unit: Option<String>,
}

/// Pre-loaded records for one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub challan: Vec<RawItemRecord>,
    pub stickers: Vec<RawItemRecord>,
    pub challan_number: Option<String>,
    pub challan_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// A record that passed the normalize boundary.
///
/// Invariants: `identifier` is non-empty, uppercased, whitespace-collapsed;
/// `quantity` is finite and >= 0.
#[derive(Debug, Clone)]
pub struct NormalizedItem {
    pub identifier: String,
    pub description: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub raw: RawItemRecord,
}

/// A record excluded at the normalize boundary, kept for the audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    pub source: ItemSource,
    pub identifier: String,
    pub quantity: String,
    pub reason: String,
}

/// Output of one side's normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizeOutput {
    pub items: Vec<NormalizedItem>,
    pub anomalies: Vec<Anomaly>,
    pub input_lines: usize,
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    Exact,
    Fuzzy,
    None,
}

impl std::fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::None => write!(f, "none"),
        }
    }
}

/// One pairing decision. At least one side is present; `None` confidence
/// means exactly one side is present. `similarity` is set for fuzzy pairs.
#[derive(Debug, Clone)]
pub struct MatchPair {
    pub challan: Option<NormalizedItem>,
    pub sticker: Option<NormalizedItem>,
    pub confidence: MatchConfidence,
    pub similarity: Option<f64>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceCategory {
    Match,
    QuantityMismatch,
    MissingFromSticker,
    ExtraInSticker,
    Unidentified,
}

impl std::fmt::Display for VarianceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::QuantityMismatch => write!(f, "quantity_mismatch"),
            Self::MissingFromSticker => write!(f, "missing_from_sticker"),
            Self::ExtraInSticker => write!(f, "extra_in_sticker"),
            Self::Unidentified => write!(f, "unidentified"),
        }
    }
}

/// One classified line of the report.
///
/// `delta = actual - expected` when both sides are present, `-expected` for
/// missing lines, `+actual` for extras.
#[derive(Debug, Clone, Serialize)]
pub struct VarianceRecord {
    pub category: VarianceCategory,
    pub identifier: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_qty: Option<f64>,
    pub delta: f64,
    pub confidence: MatchConfidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_challan_lines: usize,
    pub total_sticker_lines: usize,
    pub matched_count: usize,
    pub mismatch_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    pub unidentified_count: usize,
    pub challan_anomalies: usize,
    pub sticker_anomalies: usize,
    pub category_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challan_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challan_date: Option<String>,
    pub engine_version: String,
    pub run_at: String,
}

/// Final run output. Immutable once built; export collaborators read it.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub records: Vec<VarianceRecord>,
    pub anomalies: Vec<Anomaly>,
}
