//! Argument strength heuristic.
//!
//! Fragments citing numbers, trial ids, phases, regulators or statistics
//! outrank vague ones. Scores only order fragments within a pool.

use regex::Regex;
use std::sync::OnceLock;

/// Pattern → points. Every matching rule adds its points once.
const RULES: &[(&str, u32)] = &[
    // percentage figure
    (r"\d+%", 3),
    // trial registry id
    (r"NCT\d+", 2),
    (r"(?i)\bphase\s+(?:iv|i{1,3}|[1-4])", 2),
    (r"(?i)fda|orphan|fast[\s-]track", 2),
    (r"(?i)\bror\b|faers|odds ratio", 2),
    // p-value
    (r"p[=<]\s*0\.\d+", 3),
];

const QUESTION_POINTS: u32 = 1;
const CONCISE_POINTS: u32 = 1;
/// Exclusive character-count bounds for a concise fragment.
const CONCISE_RANGE: (usize, usize) = (40, 180);

fn compiled_rules() -> &'static [(Regex, u32)] {
    static RULES_RE: OnceLock<Vec<(Regex, u32)>> = OnceLock::new();
    RULES_RE.get_or_init(|| {
        RULES
            .iter()
            .map(|(pattern, points)| (Regex::new(pattern).unwrap(), *points))
            .collect()
    })
}

/// Heuristic strength of one argument fragment.
pub fn score_fragment(text: &str) -> u32 {
    let mut score: u32 = compiled_rules()
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, points)| points)
        .sum();

    if text.contains('?') {
        score += QUESTION_POINTS;
    }
    let len = text.chars().count();
    if len > CONCISE_RANGE.0 && len < CONCISE_RANGE.1 {
        score += CONCISE_POINTS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_clinical_fragment() {
        let s = score_fragment("Response rate was 45% in Phase II (NCT01234567, p=0.03)");
        assert!(s >= 10);
        assert_eq!(s, 11);
    }

    #[test]
    fn test_vague_fragment_scores_low() {
        assert_eq!(score_fragment("It might work"), 0);
    }

    #[test]
    fn test_individual_rules() {
        assert_eq!(score_fragment("phase 3"), 2);
        assert_eq!(score_fragment("FAST-TRACK"), 2);
        assert_eq!(score_fragment("ROR 0.3"), 2);
        assert_eq!(score_fragment("Really?"), 1);
        // "error" is not an odds ratio.
        assert_eq!(score_fragment("error"), 0);
    }

    #[test]
    fn test_length_band_is_exclusive() {
        assert_eq!(score_fragment(&"a".repeat(40)), 0);
        assert_eq!(score_fragment(&"a".repeat(41)), 1);
        assert_eq!(score_fragment(&"a".repeat(180)), 0);
    }
}
