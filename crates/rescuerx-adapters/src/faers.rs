//! FAERS adverse-event signals (evidence/faers_signals.json).
//!
//! Two layouts exist upstream: a single generic `results` map, and the
//! bucketed layout (`repurposing_candidates`, established comparator drugs,
//! `insufficient_data`). All buckets are flattened into one list.

use rescuerx_common::models::{FaersDrugRecord, FaersPanel, FaersSignal};
use rescuerx_common::probe::{entries, first_truthy, nonzero_number, number_or};
use rescuerx_common::text::{display_name, is_truthy, safe_string};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

const RISK_THRESHOLD: f64 = 1.5;
const PROTECTIVE_THRESHOLD: f64 = 0.5;

const ESTABLISHED_KEYS: &[&str] = &["established_breast_cancer_drugs", "established_drugs"];

/// Tag a drug by its reporting odds ratio.
pub fn classify_signal(ratio: Option<f64>, co_reports: u64) -> FaersSignal {
    match ratio {
        Some(r) if r > RISK_THRESHOLD => FaersSignal::Risk,
        Some(r) if r < PROTECTIVE_THRESHOLD => FaersSignal::Protective,
        _ if co_reports == 0 => FaersSignal::NoData,
        _ => FaersSignal::Neutral,
    }
}

fn count(value: Option<&Value>) -> u64 {
    number_or(value, 0.0).max(0.0) as u64
}

fn flag(d: &Value, keys: &[&str]) -> bool {
    first_truthy(d, keys).is_some()
}

struct Row {
    name: String,
    total_reports: u64,
    co_report_count: u64,
    has_signal: bool,
    ratio: Option<f64>,
    interpretation: String,
    protection_percent: Option<f64>,
}

impl Row {
    fn into_record(self) -> FaersDrugRecord {
        FaersDrugRecord {
            signal: classify_signal(self.ratio, self.co_report_count),
            name: self.name,
            total_reports: self.total_reports,
            co_report_count: self.co_report_count,
            has_signal: self.has_signal,
            reporting_odds_ratio: self.ratio,
            interpretation: self.interpretation,
            protection_percent: self.protection_percent,
        }
    }
}

fn interpretation(d: &Value, keys: &[&str]) -> String {
    first_truthy(d, keys).map(safe_string).unwrap_or_default()
}

fn generic_row(name: &str, d: &Value) -> Row {
    Row {
        name: display_name(name),
        total_reports: count(first_truthy(d, &["drug_total_reports", "report_count"])),
        co_report_count: count(first_truthy(d, &["report_count", "a"])),
        has_signal: flag(d, &["has_inverse_signal", "has_positive_signal"]),
        ratio: first_truthy(d, &["best_ror", "ror"]).and_then(|v| nonzero_number(Some(v))),
        interpretation: interpretation(d, &["faers_interpretation", "interpretation"]),
        protection_percent: nonzero_number(d.get("protection_pct")),
    }
}

fn bucket_row(name: &str, d: &Value) -> Row {
    Row {
        name: display_name(name),
        total_reports: count(d.get("drug_total_reports")),
        co_report_count: count(d.get("report_count")),
        has_signal: false,
        ratio: nonzero_number(d.get("ror")),
        interpretation: interpretation(d, &["interpretation"]),
        protection_percent: None,
    }
}

/// Ascending by ratio; drugs without a ratio go last.
fn by_ratio(a: &FaersDrugRecord, b: &FaersDrugRecord) -> Ordering {
    match (a.reporting_odds_ratio, b.reporting_odds_ratio) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Build the FAERS panel. An absent document yields an empty panel.
pub fn build_faers(doc: Option<&Value>) -> FaersPanel {
    let Some(f) = doc else { return FaersPanel::default() };
    let mut rows: Vec<Row> = Vec::new();

    for (name, d) in entries(f.get("results")).filter(|(_, d)| d.is_object()) {
        rows.push(generic_row(name, d));
    }

    // Repurposing candidates only count when they carry a ratio.
    for (name, d) in entries(f.get("repurposing_candidates")) {
        if !d.is_object() || nonzero_number(d.get("ror")).is_none() {
            continue;
        }
        rows.push(Row {
            has_signal: flag(d, &["has_inverse_signal"]),
            protection_percent: nonzero_number(d.get("protection_pct")),
            ..bucket_row(name, d)
        });
    }

    let established = first_truthy(f, ESTABLISHED_KEYS);
    for (name, d) in entries(established) {
        if !d.is_object() {
            continue;
        }
        let Some(ratio) = nonzero_number(d.get("ror")) else { continue };
        rows.push(Row {
            has_signal: flag(d, &["has_positive_signal"]) || ratio > 1.0,
            ..bucket_row(name, d)
        });
    }

    for (name, d) in entries(f.get("insufficient_data")).filter(|(_, d)| d.is_object()) {
        rows.push(bucket_row(name, d));
    }

    let mut drugs: Vec<FaersDrugRecord> = rows.into_iter().map(Row::into_record).collect();
    drugs.sort_by(by_ratio);
    debug!(n = drugs.len(), "FAERS rows built");

    FaersPanel {
        summary: first_truthy(f, &["interpretation", "summary", "advocate_summary"])
            .map(safe_string)
            .unwrap_or_default(),
        total_reports: f
            .get("total_faers_reports")
            .filter(|v| is_truthy(v))
            .map(|v| count(Some(v)))
            .unwrap_or(0),
        drugs,
    }
}
