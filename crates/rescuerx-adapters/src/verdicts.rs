//! Verdict cards (court/verdict_scores.json).
//!
//! Upstream scores come without cost or duration estimates; both are derived
//! here from the score tier and a stable hash of the drug name so the same
//! document always renders the same numbers.

use regex::Regex;
use rescuerx_common::models::VerdictRecord;
use rescuerx_common::probe::{as_number, entries, field, first_truthy, items, leading_number, text_list, text_of};
use rescuerx_common::text::display_name;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const MAX_NEXT_STEPS: usize = 3;

fn timeline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)[- ]+(\d+)\s*year").unwrap())
}

/// 31-multiplier string hash over UTF-16 code units, wrapping at 32 bits.
pub fn name_hash(name: &str) -> u32 {
    let h = name
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit)));
    h.unsigned_abs()
}

/// Base cost in millions for a score tier.
fn base_cost(score: f64) -> u32 {
    if score >= 70.0 {
        180
    } else if score >= 50.0 {
        280
    } else {
        350
    }
}

fn base_years(score: f64) -> u32 {
    if score >= 70.0 {
        2
    } else if score >= 50.0 {
        3
    } else {
        4
    }
}

/// `(low, high)` years: parsed from `"N-M years"` text, else estimated.
pub fn estimate_years(timeline: &str, score: f64, hash: u32) -> (u32, u32) {
    if let Some(caps) = timeline_regex().captures(timeline) {
        if let (Ok(low), Ok(high)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            return (low, high);
        }
    }
    let low = base_years(score);
    (low, low + 1 + hash % 2)
}

/// Confidence as a 0–1 fraction. Strings such as `"80%"` and numbers above 1
/// are read as percentages.
pub fn normalize_confidence(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::String(s)) => leading_number(s).map(|n| n / 100.0),
        Some(v) => as_number(v).map(|n| if n > 1.0 { n / 100.0 } else { n }),
        None => None,
    };
    raw.filter(|n| n.is_finite()).unwrap_or(0.0).clamp(0.0, 1.0)
}

fn dimension_scores(v: &Value) -> BTreeMap<String, f64> {
    entries(field(v, "dimension_scores"))
        .filter_map(|(k, score)| as_number(score).map(|n| (k.clone(), n)))
        .collect()
}

fn verdict_record(v: &Value, score: f64) -> VerdictRecord {
    let source_name = text_of(first_truthy(v, &["drug_name"]));
    let hash = name_hash(if source_name.is_empty() { "X" } else { source_name.as_str() });
    let timeline_text = text_of(first_truthy(v, &["timeline_estimate", "timeline"]));
    let (estimated_years_low, estimated_years_high) = estimate_years(&timeline_text, score, hash);

    let mut next_steps = text_list(field(v, "next_steps"));
    next_steps.truncate(MAX_NEXT_STEPS);

    VerdictRecord {
        name: display_name(&source_name),
        source_name,
        score,
        tier: text_of(first_truthy(v, &["verdict", "tier"])),
        verdict_text: text_of(first_truthy(v, &["verdict"])),
        dimension_scores: dimension_scores(v),
        strengths: text_list(field(v, "strengths")),
        risks: text_list(field(v, "risks")),
        confidence: normalize_confidence(first_truthy(v, &["confidence"])),
        timeline_text,
        estimated_cost_millions: base_cost(score) + hash % 120,
        estimated_years_low,
        estimated_years_high,
        next_steps,
        investment_recommendation: text_of(first_truthy(v, &["investment_recommendation"])),
    }
}

/// Build verdict cards in document order, dropping unscored entries.
pub fn build_verdicts(doc: Option<&Value>) -> Vec<VerdictRecord> {
    let Some(doc) = doc else { return Vec::new() };
    items(field(doc, "verdicts"))
        .into_iter()
        .filter(|v| v.is_object())
        .filter_map(|v| {
            let score = field(v, "rescue_score").and_then(as_number).filter(|s| *s > 0.0)?;
            Some(verdict_record(v, score))
        })
        .collect()
}
