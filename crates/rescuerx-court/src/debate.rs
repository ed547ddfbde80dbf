//! Debate synthesis.
//!
//! Each side's pool is ranked by [`score_fragment`], the strongest fragments
//! are kept in their original order, and every run of three is stitched into
//! one statement with rotating connectives. Statements then alternate
//! advocate, skeptic, advocate, skeptic, advocate; the advocate gets the
//! last word.

use rescuerx_common::models::{DebateEntry, DebateSide};
use rescuerx_common::text::safe_string;
use serde_json::Value;
use std::cmp::Reverse;
use tracing::debug;

use crate::scorer::score_fragment;
use crate::topic::classify;

/// Fragments this short carry no argument.
const MIN_FRAGMENT_CHARS: usize = 5;

const ADVOCATE_PICKS: usize = 9;
const SKEPTIC_PICKS: usize = 6;
const FRAGMENTS_PER_STATEMENT: usize = 3;
const ADVOCATE_STATEMENTS: usize = 3;
const SKEPTIC_STATEMENTS: usize = 2;

const ADVOCATE_CONNECTIVES: &[&str] = &[
    " Furthermore, ",
    " Building on this, ",
    " Additionally, ",
    " To strengthen this point, ",
    " Moreover, ",
];

const SKEPTIC_CONNECTIVES: &[&str] = &[
    " Adding to this concern, ",
    " More critically, ",
    " Compounding this issue, ",
    " Beyond that, ",
    " To emphasize, ",
];

/// The `n` highest-scoring fragments, in their original order. Ties keep
/// input order.
fn pick_strongest(pool: Vec<String>, n: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, u32, String)> = pool
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let score = score_fragment(&text);
            (i, score, text)
        })
        .collect();
    ranked.sort_by_key(|(_, score, _)| Reverse(*score));
    ranked.truncate(n);
    ranked.sort_by_key(|(i, _, _)| *i);
    ranked.into_iter().map(|(_, _, text)| text).collect()
}

fn is_upper(c: char) -> bool {
    c.to_uppercase().eq(std::iter::once(c))
}

fn is_lower(c: char) -> bool {
    c.to_lowercase().eq(std::iter::once(c))
}

/// Lower-case the first letter so a fragment can follow a connective.
/// Fragments opening with two capitals (`FDA`, `BBB`) are left alone.
fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return s.to_string();
    };
    if is_upper(first) && is_upper(second) {
        return s.to_string();
    }
    if is_upper(first) && is_lower(second) {
        let rest = &s[first.len_utf8()..];
        return first.to_lowercase().chain(rest.chars()).collect();
    }
    s.to_string()
}

/// Append `next` to a statement, avoiding a doubled full stop.
fn join_sentence(statement: &mut String, connective: &str, next: &str) {
    let trimmed = statement.trim_end().trim_end_matches('.').len();
    statement.truncate(trimmed);
    statement.push('.');
    statement.push_str(connective);
    statement.push_str(&lower_first(next));
}

fn combine(fragments: &[String], connectives: &[&str]) -> Vec<String> {
    fragments
        .chunks(FRAGMENTS_PER_STATEMENT)
        .enumerate()
        .map(|(group, chunk)| {
            let mut statement = chunk[0].clone();
            for (offset, next) in chunk[1..].iter().enumerate() {
                let connective = connectives[(group + offset) % connectives.len()];
                join_sentence(&mut statement, connective, next);
            }
            statement
        })
        .collect()
}

fn statements(pool: Vec<String>, picks: usize, connectives: &[&str], limit: usize) -> Vec<String> {
    let mut combined = combine(&pick_strongest(pool, picks), connectives);
    combined.truncate(limit);
    combined
}

fn entry(side: DebateSide, text: &str) -> DebateEntry {
    DebateEntry { side, topic: classify(text).label().to_string(), text: text.to_string() }
}

/// Build the debate from raw fragment strings.
pub fn synthesize_debate_text(advocate: &[String], skeptic: &[String]) -> Vec<DebateEntry> {
    let keep = |pool: &[String]| -> Vec<String> {
        pool.iter().filter(|s| s.chars().count() > MIN_FRAGMENT_CHARS).cloned().collect()
    };
    let adv = keep(advocate);
    let skp = keep(skeptic);
    if adv.is_empty() && skp.is_empty() {
        return Vec::new();
    }
    debug!(advocate = adv.len(), skeptic = skp.len(), "synthesizing debate");

    let adv = statements(adv, ADVOCATE_PICKS, ADVOCATE_CONNECTIVES, ADVOCATE_STATEMENTS);
    let skp = statements(skp, SKEPTIC_PICKS, SKEPTIC_CONNECTIVES, SKEPTIC_STATEMENTS);

    let turns = [
        (DebateSide::Advocate, adv.first()),
        (DebateSide::Skeptic, skp.first()),
        (DebateSide::Advocate, adv.get(1)),
        (DebateSide::Skeptic, skp.get(1)),
        (DebateSide::Advocate, adv.get(2)),
    ];
    turns
        .into_iter()
        .filter_map(|(side, text)| text.filter(|t| !t.is_empty()).map(|t| entry(side, t)))
        .collect()
}

/// Build the debate from raw JSON fragments of any shape.
pub fn synthesize_debate(advocate: &[Value], skeptic: &[Value]) -> Vec<DebateEntry> {
    let adv: Vec<String> = advocate.iter().map(safe_string).collect();
    let skp: Vec<String> = skeptic.iter().map(safe_string).collect();
    synthesize_debate_text(&adv, &skp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rescuerx_test_utils::fragments;
    use serde_json::json;

    fn sides(debate: &[DebateEntry]) -> Vec<DebateSide> {
        debate.iter().map(|d| d.side).collect()
    }

    #[test]
    fn test_full_pools_alternate() {
        let debate = synthesize_debate_text(&fragments("Advocate", 9), &fragments("Skeptic", 6));
        assert_eq!(debate.len(), 5);
        use DebateSide::*;
        assert_eq!(sides(&debate), vec![Advocate, Skeptic, Advocate, Skeptic, Advocate]);
    }

    #[test]
    fn test_no_skeptic_pool() {
        let debate = synthesize_debate_text(&fragments("Advocate", 9), &[]);
        assert!(debate.len() <= 3);
        assert!(debate.iter().all(|d| d.side == DebateSide::Advocate));
    }

    #[test]
    fn test_only_skeptic_pool() {
        let debate = synthesize_debate_text(&[], &fragments("Skeptic", 4));
        assert_eq!(sides(&debate), vec![DebateSide::Skeptic, DebateSide::Skeptic]);
    }

    #[test]
    fn test_empty_pools() {
        assert!(synthesize_debate_text(&[], &[]).is_empty());
        let short = vec!["tiny".to_string(), "12345".to_string()];
        assert!(synthesize_debate_text(&short, &short).is_empty());
    }

    #[test]
    fn test_three_fragments_joined_with_connectives() {
        let adv = vec![
            "Bevacizumab normalizes vessels".to_string(),
            "The drug crosses into tumour tissue.".to_string(),
            "FDA approval exists for recurrent disease".to_string(),
        ];
        let debate = synthesize_debate_text(&adv, &[]);
        assert_eq!(debate.len(), 1);
        assert_eq!(
            debate[0].text,
            "Bevacizumab normalizes vessels. Furthermore, the drug crosses into tumour tissue. \
             Building on this, FDA approval exists for recurrent disease"
        );
        assert_eq!(debate[0].topic, "Mechanism");
    }

    #[test]
    fn test_second_group_rotates_connectives() {
        let adv = fragments("Advocate", 6);
        let debate = synthesize_debate_text(&adv, &[]);
        assert_eq!(debate.len(), 2);
        assert!(debate[1].text.contains(". Building on this, advocate argument number 5"));
        assert!(debate[1].text.contains(". Additionally, advocate argument number 6"));
    }

    #[test]
    fn test_strongest_fragments_kept_in_original_order() {
        let mut skp = fragments("Weak", 6);
        skp.push("Response rate only 12% in NCT00345163 (p=0.4)".to_string());
        let debate = synthesize_debate_text(&[], &skp);
        // Seven candidates, six picks: the last weak fragment is dropped.
        let all: String = debate.iter().map(|d| d.text.as_str()).collect();
        assert!(!all.contains("number 6"));
        assert!(debate[1].text.ends_with("response rate only 12% in NCT00345163 (p=0.4)"));
    }

    #[test]
    fn test_lower_first_guards_acronyms() {
        assert_eq!(lower_first("FDA approved"), "FDA approved");
        assert_eq!(lower_first("Drug works"), "drug works");
        assert_eq!(lower_first("5-HT2A agonism"), "5-HT2A agonism");
        assert_eq!(lower_first("x"), "x");
    }

    #[test]
    fn test_json_fragments_are_stringified() {
        let adv = vec![json!({ "key_finding": "Median PFS rose to 10.6 months" }), json!(null)];
        let debate = synthesize_debate(&adv, &[]);
        assert_eq!(debate.len(), 1);
        assert_eq!(debate[0].text, "Median PFS rose to 10.6 months");
        assert_eq!(debate[0].topic, "Clinical Data");
    }

    #[test]
    fn test_deterministic() {
        let a = fragments("Advocate", 9);
        let s = fragments("Skeptic", 6);
        assert_eq!(synthesize_debate_text(&a, &s), synthesize_debate_text(&a, &s));
    }
}
