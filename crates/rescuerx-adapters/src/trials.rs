//! Trial scan: merges the three places trials show up upstream.
//!
//! 1. `evidence/clinical_trials.json`: registry trials per drug with NCT ids
//!    and failure categories.
//! 2. `evidence/summary.json`: `evidence_per_drug.<drug>.literature.
//!    ongoing_trials_2024_2026`, free-text descriptions.
//! 3. `evidence/literature.json`: `results.<drug>.clinical_evidence.
//!    ongoing_2024_2026`, free-text descriptions.

use regex::Regex;
use rescuerx_common::models::{TrialRecord, TrialStatus};
use rescuerx_common::probe::{entries, field, first_truthy, items, text_of};
use rescuerx_common::text::{display_name, safe_string};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Failure category marking a trial stopped for non-scientific reasons.
pub const PRIME_FAILURE_CATEGORY: &str = "BUSINESS/LOGISTICS";

const NO_ID: &str = "\u{2014}";

fn summary_trial_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"NCT\d+|ChiCTR\w+").unwrap())
}

fn nct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"NCT\d+").unwrap())
}

fn nct_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"NCT\d+\s*").unwrap())
}

/// `"PHASE2"` → `"Phase 2"`.
fn phase_label(raw: &str) -> String {
    raw.replacen("PHASE", "Phase ", 1)
}

fn registry_trials(ct: &Value, out: &mut Vec<TrialRecord>) {
    for (drug, data) in entries(field(ct, "results")) {
        let trials = items(field(data, "trials"));

        for trial in &trials {
            let phases: Vec<String> = items(field(trial, "phases"))
                .into_iter()
                .map(|p| phase_label(&safe_string(p)))
                .collect();
            let failure_category = text_of(field(trial, "failure_category"));

            out.push(TrialRecord {
                nct_id: text_of(field(trial, "nct_id")),
                drug_name: display_name(drug),
                phase_label: if phases.is_empty() { "?".to_string() } else { phases.join("/") },
                status_label: TrialStatus::from_label(&text_of(first_truthy(trial, &["status"]))),
                tag: first_truthy(trial, &["failure_category"])
                    .or_else(|| first_truthy(data, &["classification"]))
                    .map(safe_string)
                    .unwrap_or_else(|| "UNKNOWN".to_string()),
                rationale: first_truthy(trial, &["why_stopped"])
                    .or_else(|| first_truthy(data, &["interpretation"]))
                    .map(safe_string)
                    .unwrap_or_else(|| "Not specified".to_string()),
                is_prime_signal: failure_category == PRIME_FAILURE_CATEGORY,
            });
        }

        // A drug without registry trials still gets one row explaining why.
        if trials.is_empty() {
            if let Some(interpretation) = first_truthy(data, &["interpretation"]) {
                let classification = first_truthy(data, &["classification"]).map(safe_string);
                out.push(TrialRecord {
                    nct_id: NO_ID.to_string(),
                    drug_name: display_name(drug),
                    phase_label: NO_ID.to_string(),
                    status_label: TrialStatus::from_label(classification.as_deref().unwrap_or("None")),
                    tag: classification.unwrap_or_else(|| "NONE".to_string()),
                    rationale: safe_string(interpretation),
                    is_prime_signal: false,
                });
            }
        }
    }
}

fn summary_ongoing_trials(summary: &Value, out: &mut Vec<TrialRecord>) {
    for (drug, data) in entries(field(summary, "evidence_per_drug")) {
        let ongoing = field(data, "literature").and_then(|lit| field(lit, "ongoing_trials_2024_2026"));
        for desc in items(ongoing) {
            let desc = safe_string(desc);
            let nct_id = summary_trial_id_regex()
                .find(&desc)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| NO_ID.to_string());
            let stripped = nct_prefix_regex().replace(&desc, "");
            let stripped = stripped.strip_prefix('(').unwrap_or(&stripped);
            let stripped = stripped.strip_suffix(')').unwrap_or(stripped);

            out.push(TrialRecord {
                nct_id,
                drug_name: display_name(drug),
                phase_label: "Phase I/II".to_string(),
                status_label: TrialStatus::Active,
                tag: "ONGOING".to_string(),
                rationale: stripped.trim().to_string(),
                is_prime_signal: false,
            });
        }
    }
}

fn literature_ongoing_trials(literature: &Value, out: &mut Vec<TrialRecord>) {
    for (drug, data) in entries(field(literature, "results")) {
        let ongoing = field(data, "clinical_evidence").and_then(|ce| field(ce, "ongoing_2024_2026"));
        for desc in items(ongoing) {
            let desc = safe_string(desc);
            if desc.chars().count() <= 5 {
                continue;
            }
            out.push(TrialRecord {
                nct_id: nct_regex()
                    .find(&desc)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| NO_ID.to_string()),
                drug_name: display_name(drug),
                phase_label: "Ongoing".to_string(),
                status_label: TrialStatus::Active,
                tag: "ONGOING".to_string(),
                rationale: desc,
                is_prime_signal: false,
            });
        }
    }
}

/// Ordering group: prime signals, then terminated trials, then the rest.
/// The first two groups list the latest collected trial first.
fn sort_group(trial: &TrialRecord) -> u8 {
    if trial.is_prime_signal {
        0
    } else if trial.status_label == TrialStatus::Terminated {
        1
    } else {
        2
    }
}

/// Build the trial scan from the registry, the evidence summary and the
/// literature review. Prime and terminated trials come out in reverse
/// collection order; all other trials keep collection order.
pub fn build_trials(
    clinical_trials: Option<&Value>,
    summary: Option<&Value>,
    literature: Option<&Value>,
) -> Vec<TrialRecord> {
    let mut trials = Vec::new();
    if let Some(ct) = clinical_trials {
        registry_trials(ct, &mut trials);
    }
    if let Some(sum) = summary {
        summary_ongoing_trials(sum, &mut trials);
    }
    if let Some(lit) = literature {
        literature_ongoing_trials(lit, &mut trials);
    }
    let mut keyed: Vec<(usize, TrialRecord)> = trials.into_iter().enumerate().collect();
    keyed.sort_by(|(i, a), (j, b)| {
        let group = sort_group(a);
        group.cmp(&sort_group(b)).then_with(|| if group < 2 { j.cmp(i) } else { i.cmp(j) })
    });
    let trials: Vec<TrialRecord> = keyed.into_iter().map(|(_, t)| t).collect();
    debug!(n = trials.len(), "trials built");
    trials
}
