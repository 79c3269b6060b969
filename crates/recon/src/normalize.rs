//! Normalize boundary: canonicalize untrusted extraction records.
//!
//! Malformed records are excluded but always counted as anomalies; a single
//! bad line must not abort reconciliation of an entire shipment.

use crate::model::{Anomaly, NormalizeOutput, NormalizedItem, RawItemRecord};

/// Canonicalize one side's records.
///
/// Identifiers are trimmed, uppercased, and internal whitespace is collapsed.
/// Quantities are parsed from the raw text; non-numeric, negative, or
/// non-finite values exclude the record and produce an [`Anomaly`].
/// Deterministic and idempotent on already-canonical input.
pub fn normalize(records: Vec<RawItemRecord>) -> NormalizeOutput {
    let input_lines = records.len();
    let mut items = Vec::with_capacity(input_lines);
    let mut anomalies = Vec::new();

    for raw in records {
        let mut identifier = canonical_key(&raw.identifier);
        let description = collapse_whitespace(raw.description.trim());

        if identifier.is_empty() {
            // Extraction output may carry no usable SKU (sticker scans often
            // don't); fall back to the description as the identity key.
            identifier = canonical_key(&description);
        }
        if identifier.is_empty() {
            anomalies.push(Anomaly {
                source: raw.source,
                identifier: raw.identifier.clone(),
                quantity: raw.quantity.clone(),
                reason: "empty identifier and description".into(),
            });
            continue;
        }

        let quantity = match parse_quantity(&raw.quantity) {
            Ok(q) => q,
            Err(reason) => {
                anomalies.push(Anomaly {
                    source: raw.source,
                    identifier: identifier.clone(),
                    quantity: raw.quantity.clone(),
                    reason,
                });
                continue;
            }
        };

        let unit = raw
            .unit
            .as_deref()
            .map(canonical_key)
            .filter(|u| !u.is_empty());

        items.push(NormalizedItem {
            identifier,
            description,
            quantity,
            unit,
            raw,
        });
    }

    NormalizeOutput {
        items,
        anomalies,
        input_lines,
    }
}

/// Trim, collapse internal whitespace, uppercase.
pub fn canonical_key(s: &str) -> String {
    collapse_whitespace(s.trim()).to_uppercase()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_quantity(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("missing quantity".into());
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("quantity '{trimmed}' is not numeric"))?;
    if !value.is_finite() {
        return Err(format!("quantity '{trimmed}' is not finite"));
    }
    if value < 0.0 {
        return Err(format!("quantity '{trimmed}' is negative"));
    }
    Ok(value)
}
