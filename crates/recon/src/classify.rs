//! Variance classification: a total mapping from match pairs to report lines.

use crate::model::{MatchConfidence, MatchPair, VarianceCategory, VarianceRecord};

/// Classify every pair into exactly one [`VarianceRecord`].
///
/// Quantity comparison uses an absolute tolerance: a difference exactly equal
/// to the tolerance still counts as a match. Fuzzy pairs whose similarity
/// falls below `identity_trust_threshold` are flagged `Unidentified` instead,
/// signaling that a human should verify identity rather than quantity.
pub fn classify(
    pairs: &[MatchPair],
    quantity_tolerance: f64,
    identity_trust_threshold: f64,
) -> Vec<VarianceRecord> {
    let mut records = Vec::with_capacity(pairs.len());

    for pair in pairs {
        match (&pair.challan, &pair.sticker) {
            (Some(challan), Some(sticker)) => {
                let expected = challan.quantity;
                let actual = sticker.quantity;
                let delta = actual - expected;

                let low_trust = pair.confidence == MatchConfidence::Fuzzy
                    && pair.similarity.is_some_and(|s| s < identity_trust_threshold);

                let category = if low_trust {
                    VarianceCategory::Unidentified
                } else if delta.abs() <= quantity_tolerance {
                    VarianceCategory::Match
                } else {
                    VarianceCategory::QuantityMismatch
                };

                records.push(VarianceRecord {
                    category,
                    identifier: challan.identifier.clone(),
                    description: challan.description.clone(),
                    unit: challan.unit.clone(),
                    expected_qty: Some(expected),
                    actual_qty: Some(actual),
                    delta,
                    confidence: pair.confidence,
                    similarity: pair.similarity,
                });
            }
            (Some(challan), None) => {
                records.push(VarianceRecord {
                    category: VarianceCategory::MissingFromSticker,
                    identifier: challan.identifier.clone(),
                    description: challan.description.clone(),
                    unit: challan.unit.clone(),
                    expected_qty: Some(challan.quantity),
                    actual_qty: None,
                    delta: -challan.quantity,
                    confidence: pair.confidence,
                    similarity: None,
                });
            }
            (None, Some(sticker)) => {
                records.push(VarianceRecord {
                    category: VarianceCategory::ExtraInSticker,
                    identifier: sticker.identifier.clone(),
                    description: sticker.description.clone(),
                    unit: sticker.unit.clone(),
                    expected_qty: None,
                    actual_qty: Some(sticker.quantity),
                    delta: sticker.quantity,
                    confidence: pair.confidence,
                    similarity: None,
                });
            }
            // The matcher never emits an empty pair.
            (None, None) => {}
        }
    }

    records
}
