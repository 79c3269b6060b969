use serde::Deserialize;

use crate::classify::classify;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::matcher::match_items;
use crate::model::{
    ItemSource, RawItemRecord, ReconInput, ReconciliationReport, ReportMeta,
};
use crate::normalize::normalize;
use crate::report::build_report;
use crate::similarity::{NormalizedLevenshtein, SimilarityScorer};

/// Run one reconciliation: validate config, normalize both sides, match,
/// classify, build the report.
///
/// Empty inputs are a valid (if unusual) shipment: the run produces an empty
/// report with zeroed summary counts rather than failing.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconciliationReport, ReconError> {
    run_with_scorer(config, input, &NormalizedLevenshtein)
}

/// [`run`] with a caller-provided similarity strategy.
pub fn run_with_scorer(
    config: &ReconConfig,
    input: &ReconInput,
    scorer: &dyn SimilarityScorer,
) -> Result<ReconciliationReport, ReconError> {
    config.validate()?;

    let mut challan = normalize(input.challan.clone());
    let mut stickers = normalize(input.stickers.clone());

    let challan_items = std::mem::take(&mut challan.items);
    let sticker_items = std::mem::take(&mut stickers.items);

    let pairs = match_items(
        challan_items,
        sticker_items,
        config.matching.fuzzy_match_threshold,
        scorer,
    );

    let records = classify(
        &pairs,
        config.tolerance.quantity,
        config.matching.identity_trust_threshold,
    );

    Ok(build_report(
        records,
        &challan,
        &stickers,
        ReportMeta {
            challan_number: input.challan_number.clone(),
            challan_date: input.challan_date.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
    ))
}

// ---------------------------------------------------------------------------
// Intake: extraction-collaborator JSON -> RawItemRecord
// ---------------------------------------------------------------------------
//
// The AI extraction step runs strictly before this core and its output is
// untrusted; everything here funnels into RawItemRecord and the normalize
// boundary does the real validation.

/// Parsed challan document: line records plus header fields for the report.
#[derive(Debug, Clone)]
pub struct ChallanExtract {
    pub records: Vec<RawItemRecord>,
    pub challan_number: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
struct ChallanDoc {
    challan_number: Option<String>,
    date: Option<String>,
    #[serde(default)]
    lines: Vec<ChallanLine>,
}

#[derive(Deserialize)]
struct ChallanLine {
    sku: Option<String>,
    #[serde(default)]
    description: String,
    size: Option<String>,
    qty: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct StickerDoc {
    #[serde(default)]
    scans: Vec<StickerScan>,
}

#[derive(Deserialize)]
struct StickerScan {
    sku: Option<String>,
    #[serde(default)]
    style: String,
    size: Option<String>,
    qty: Option<serde_json::Value>,
}

/// Parse a challan extraction document.
pub fn load_challan_json(data: &str) -> Result<ChallanExtract, ReconError> {
    let doc: ChallanDoc = serde_json::from_str(data).map_err(|e| ReconError::ExtractParse {
        source: ItemSource::Challan,
        detail: e.to_string(),
    })?;

    let records = doc
        .lines
        .into_iter()
        .map(|line| RawItemRecord {
            source: ItemSource::Challan,
            identifier: line.sku.unwrap_or_default(),
            description: line.description,
            quantity: quantity_text(line.qty),
            unit: line.size,
        })
        .collect();

    Ok(ChallanExtract {
        records,
        challan_number: doc.challan_number,
        date: doc.date,
    })
}

/// Parse sticker-scan extraction output. A scan without a quantity counts as
/// one physical unit.
pub fn load_sticker_json(data: &str) -> Result<Vec<RawItemRecord>, ReconError> {
    let doc: StickerDoc = serde_json::from_str(data).map_err(|e| ReconError::ExtractParse {
        source: ItemSource::Sticker,
        detail: e.to_string(),
    })?;

    Ok(doc
        .scans
        .into_iter()
        .map(|scan| RawItemRecord {
            source: ItemSource::Sticker,
            identifier: scan.sku.unwrap_or_default(),
            description: scan.style,
            quantity: match scan.qty {
                Some(serde_json::Value::Null) | None => "1".into(),
                other => quantity_text(other),
            },
            unit: scan.size,
        })
        .collect())
}

/// Load both extraction documents into one run input.
pub fn load_input(challan_json: &str, stickers_json: &str) -> Result<ReconInput, ReconError> {
    let challan = load_challan_json(challan_json)?;
    let stickers = load_sticker_json(stickers_json)?;
    Ok(ReconInput {
        challan: challan.records,
        stickers,
        challan_number: challan.challan_number,
        challan_date: challan.date,
    })
}

/// Carry the extraction value through as text; the normalizer decides whether
/// it parses. Non-scalar values stringify to something it will reject.
fn quantity_text(value: Option<serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}
