//! One-to-one pairing of challan lines against sticker scans.

use std::collections::BTreeMap;
use std::collections::VecDeque;

use crate::model::{MatchConfidence, MatchPair, NormalizedItem};
use crate::similarity::SimilarityScorer;

/// Pair challan items with sticker items.
///
/// Exact identifier lookups run first; leftovers are fuzzy-matched on
/// description similarity against the remaining stickers. Matching is
/// strictly one-to-one: duplicate identifiers each consume at most one
/// counterpart and quantities are never summed across lines.
///
/// Every input item from both sides appears in exactly one output pair.
/// Output order is challan-declared order first, then unconsumed stickers in
/// scan order. Fuzzy ties break on lowest sticker identifier, then scan
/// order, so the match set does not depend on sticker input order.
pub fn match_items(
    challan: Vec<NormalizedItem>,
    stickers: Vec<NormalizedItem>,
    fuzzy_threshold: f64,
    scorer: &dyn SimilarityScorer,
) -> Vec<MatchPair> {
    // Sticker lookup: identifier -> scan-order queue of indices.
    let mut by_identifier: BTreeMap<String, VecDeque<usize>> = BTreeMap::new();
    for (i, item) in stickers.iter().enumerate() {
        by_identifier
            .entry(item.identifier.clone())
            .or_default()
            .push_back(i);
    }

    let mut sticker_used = vec![false; stickers.len()];

    // Pass 1: exact identifier matches, consuming one sticker per hit.
    let mut exact: Vec<Option<usize>> = Vec::with_capacity(challan.len());
    for item in &challan {
        let hit = by_identifier
            .get_mut(item.identifier.as_str())
            .and_then(|queue| queue.pop_front());
        if let Some(si) = hit {
            sticker_used[si] = true;
        }
        exact.push(hit);
    }

    // Pass 2: fuzzy description matches for challan items still unmatched.
    let mut fuzzy: Vec<Option<(usize, f64)>> = vec![None; challan.len()];
    for (ci, item) in challan.iter().enumerate() {
        if exact[ci].is_some() {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (si, sticker) in stickers.iter().enumerate() {
            if sticker_used[si] {
                continue;
            }
            let score = scorer.score(&item.description, &sticker.description);
            if score < fuzzy_threshold {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_si, best_score)) => {
                    score > best_score
                        || (score == best_score
                            && stickers[si].identifier < stickers[best_si].identifier)
                }
            };
            if better {
                best = Some((si, score));
            }
        }
        if let Some((si, _)) = best {
            sticker_used[si] = true;
        }
        fuzzy[ci] = best;
    }

    // Assemble: challan order first, then leftover stickers in scan order.
    let mut slots: Vec<Option<NormalizedItem>> = stickers.into_iter().map(Some).collect();
    let mut pairs = Vec::with_capacity(challan.len() + slots.len());

    for (ci, item) in challan.into_iter().enumerate() {
        if let Some(si) = exact[ci] {
            pairs.push(MatchPair {
                challan: Some(item),
                sticker: slots[si].take(),
                confidence: MatchConfidence::Exact,
                similarity: None,
            });
        } else if let Some((si, score)) = fuzzy[ci] {
            pairs.push(MatchPair {
                challan: Some(item),
                sticker: slots[si].take(),
                confidence: MatchConfidence::Fuzzy,
                similarity: Some(score),
            });
        } else {
            pairs.push(MatchPair {
                challan: Some(item),
                sticker: None,
                confidence: MatchConfidence::None,
                similarity: None,
            });
        }
    }

    for slot in &mut slots {
        if let Some(item) = slot.take() {
            pairs.push(MatchPair {
                challan: None,
                sticker: Some(item),
                confidence: MatchConfidence::None,
                similarity: None,
            });
        }
    }

    pairs
}
