//! Investigation tiers.

use rescuerx_common::models::{TierEntry, TierMap, VerdictRecord};
use rescuerx_common::probe::{as_number, entries, field, first_truthy, items, text_of};
use rescuerx_common::text::safe_string;
use serde_json::{json, Value};

pub const TIER_PRIME: &str = "tier_1_prime_candidates";
pub const TIER_STRONG: &str = "tier_2_strong_candidates";
pub const TIER_MODERATE: &str = "tier_3_moderate_candidates";
pub const TIER_WEAK: &str = "tier_4_weak_candidates";

/// Tier key for a rescue score.
pub fn tier_for_score(score: f64) -> &'static str {
    if score >= 70.0 {
        TIER_PRIME
    } else if score >= 50.0 {
        TIER_STRONG
    } else if score >= 30.0 {
        TIER_MODERATE
    } else {
        TIER_WEAK
    }
}

fn tier_entry(raw: &Value) -> TierEntry {
    if !raw.is_object() {
        return TierEntry { drug_name: safe_string(raw), rescue_score: None, justification: String::new() };
    }
    TierEntry {
        drug_name: text_of(first_truthy(raw, &["drug_name", "name", "drug"])),
        rescue_score: field(raw, "rescue_score").and_then(as_number),
        justification: text_of(first_truthy(raw, &["justification", "rationale", "reason"])),
    }
}

fn tier_list(list: &[TierEntry]) -> Value {
    list.iter()
        .map(|e| json!({ "drugName": e.drug_name, "rescueScore": e.rescue_score, "justification": e.justification }))
        .collect()
}

/// Tiers as published in the summary's `candidates_by_tier`, in document order.
pub fn upstream_tiers(summary: Option<&Value>) -> TierMap {
    let Some(by_tier) = summary.and_then(|s| field(s, "candidates_by_tier")) else {
        return TierMap::new();
    };
    entries(Some(by_tier))
        .map(|(tier, list)| {
            let parsed: Vec<TierEntry> = items(Some(list)).into_iter().map(tier_entry).collect();
            (tier.clone(), tier_list(&parsed))
        })
        .collect()
}

/// Tiers derived from verdict scores, prime first; empty tiers are left out.
pub fn synthesize_tiers(verdicts: &[VerdictRecord]) -> TierMap {
    let mut tiers = TierMap::new();
    for tier in [TIER_PRIME, TIER_STRONG, TIER_MODERATE, TIER_WEAK] {
        let list: Vec<TierEntry> = verdicts
            .iter()
            .filter(|v| tier_for_score(v.score) == tier)
            .map(|v| TierEntry {
                drug_name: v.name.clone(),
                rescue_score: Some(v.score),
                justification: v.verdict_text.clone(),
            })
            .collect();
        if !list.is_empty() {
            tiers.insert(tier.to_string(), tier_list(&list));
        }
    }
    tiers
}
