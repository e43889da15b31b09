//! Keyword-based classification of task descriptions into patterns

use crate::catalog::{catalog, PatternKind, DEFAULT_PATTERN};

/// Select the coordination pattern for a task description.
///
/// Scores each catalog entry by the number of its keywords occurring as
/// case-insensitive substrings of the description and returns the first
/// maximal-scoring pattern in declared order. A description matching no
/// keyword at all (including an empty one) routes to [`DEFAULT_PATTERN`].
///
/// Pure and deterministic: the same description always yields the same
/// pattern.
pub fn classify(description: &str) -> PatternKind {
    let lowered = description.to_lowercase();

    let mut best = DEFAULT_PATTERN;
    let mut best_score = 0usize;
    for spec in catalog() {
        let score = spec
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count();
        if score > best_score {
            best = spec.kind;
            best_score = score;
        }
    }

    if best_score == 0 {
        tracing::debug!("no keywords matched, defaulting to {DEFAULT_PATTERN} pattern");
        return DEFAULT_PATTERN;
    }

    tracing::debug!(pattern = %best, score = best_score, "classified task description");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_deterministic() {
        let description = "Research and investigate caching strategies";
        let first = classify(description);
        for _ in 0..10 {
            assert_eq!(classify(description), first);
        }
    }

    #[test]
    fn test_classify_analysis_task() {
        assert_eq!(
            classify("Analyze the system architecture"),
            PatternKind::Decompose
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("DEBUG the BROKEN build"), PatternKind::Diagnose);
    }

    #[test]
    fn test_empty_description_routes_to_default() {
        assert_eq!(classify(""), DEFAULT_PATTERN);
        assert_eq!(classify("   "), DEFAULT_PATTERN);
    }

    #[test]
    fn test_no_keyword_match_routes_to_default() {
        assert_eq!(classify("xyzzy plugh"), DEFAULT_PATTERN);
    }

    #[test]
    fn test_tie_breaks_by_declared_order() {
        // One Decompose keyword ("analyze") and one Diagnose keyword
        // ("debug"): Decompose is declared first and wins the tie.
        assert_eq!(classify("analyze and debug"), PatternKind::Decompose);
    }

    #[test]
    fn test_highest_score_wins_over_order() {
        // Two Fanout keywords beat a single Decompose keyword even though
        // Decompose is declared earlier.
        assert_eq!(
            classify("analyze the batch in parallel"),
            PatternKind::Fanout
        );
    }
}
