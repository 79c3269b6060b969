//! Description-text similarity scoring for fuzzy matching.

/// Strategy for scoring how alike two description strings are, in `[0, 1]`.
///
/// The matcher only depends on this trait, so the algorithm can be swapped
/// without touching its control flow.
pub trait SimilarityScorer {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Default scorer: normalized Levenshtein ratio over casefolded,
/// whitespace-collapsed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl SimilarityScorer for NormalizedLevenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(&fold(a), &fold(b))
    }
}

/// Lowercase and collapse whitespace so scoring ignores formatting noise.
fn fold(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        let s = NormalizedLevenshtein;
        assert_eq!(s.score("Cotton Tee Crew", "Cotton Tee Crew"), 1.0);
    }

    #[test]
    fn case_and_whitespace_ignored() {
        let s = NormalizedLevenshtein;
        assert_eq!(s.score("Cotton  Tee\tCrew", "cotton tee crew"), 1.0);
    }

    #[test]
    fn disjoint_strings_score_low() {
        let s = NormalizedLevenshtein;
        assert!(s.score("Cotton Tee", "Steel Bracket") < 0.5);
    }

    #[test]
    fn near_miss_scores_high() {
        let s = NormalizedLevenshtein;
        // One transposed character out of a long description.
        let score = s.score("Cotton Tee Crew Neck Blue", "Cotton Tee Crew Neck Bleu");
        assert!(score > 0.9, "got {score}");
    }

    #[test]
    fn empty_vs_empty_scores_one() {
        let s = NormalizedLevenshtein;
        assert_eq!(s.score("", ""), 1.0);
    }
}
