//! Knowledge-graph candidate ranking (candidates.json).
//!
//! Accepted shapes:
//! - a bare array of candidate objects;
//! - an object holding the array under `candidates`, `drugs` or `results`;
//! - an object holding it under any other key (first non-empty array of
//!   objects wins).

use rescuerx_common::error::RescueError;
use rescuerx_common::models::{CandidateRecord, CandidateStatus};
use rescuerx_common::probe::{nonzero_number, number_or, probe_key, probe_key_or_first};
use rescuerx_common::text::{display_name, is_truthy, safe_string};
use serde_json::{Map, Value};
use tracing::debug;

const LIST_KEYS: &[&str] = &["candidates", "drugs", "results"];
const NAME_KEYS: &[&str] = &["drug_name", "name", "drug"];
const PERCENTILE_KEYS: &[&str] = &["kg_percentile", "percentile"];
const Z_SCORE_KEYS: &[&str] = &["kg_z_score", "z_score"];
const RANK_KEYS: &[&str] = &["kg_rank", "rank"];
const STATUS_KEYS: &[&str] = &["status"];

/// Candidates kept per status group.
const PER_STATUS_LIMIT: usize = 5;
/// Overall cap on the ranking panel.
const MAX_CANDIDATES: usize = 10;

/// Locate the candidate rows inside a candidates document.
pub fn candidate_rows(doc: &Value) -> Result<&[Value], RescueError> {
    if let Value::Array(rows) = doc {
        return Ok(rows.as_slice());
    }
    let Some(obj) = doc.as_object() else {
        return Err(RescueError::UnrecognizedSchema("candidates document is not an object or array".into()));
    };

    if let Some(listed) = LIST_KEYS.iter().filter_map(|k| obj.get(*k)).find(|v| is_truthy(v)) {
        return match listed {
            Value::Array(rows) => Ok(rows.as_slice()),
            _ => Err(RescueError::UnrecognizedSchema("candidate list key does not hold an array".into())),
        };
    }

    obj.values()
        .find_map(|v| match v {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => Some(rows.as_slice()),
            _ => None,
        })
        .ok_or_else(|| RescueError::UnrecognizedSchema("no candidate array found".into()))
}

/// Keys detected on the first candidate row; every row is read with them.
struct KgKeys {
    name: Option<String>,
    percentile: Option<&'static str>,
    z_score: Option<&'static str>,
    rank: Option<&'static str>,
    status: Option<&'static str>,
}

impl KgKeys {
    fn probe(first: &Map<String, Value>) -> Self {
        Self {
            name: probe_key_or_first(first, NAME_KEYS),
            percentile: probe_key(first, PERCENTILE_KEYS),
            z_score: probe_key(first, Z_SCORE_KEYS),
            rank: probe_key(first, RANK_KEYS),
            status: probe_key(first, STATUS_KEYS),
        }
    }

    fn status_of(&self, row: &Value) -> CandidateStatus {
        match self.status {
            Some(key) => row
                .get(key)
                .filter(|v| is_truthy(v))
                .map(|v| CandidateStatus::from_raw(&safe_string(v)))
                .unwrap_or(CandidateStatus::Unknown),
            None => CandidateStatus::Unknown,
        }
    }

    fn record(&self, row: &Value, position: usize) -> CandidateRecord {
        let name = self
            .name
            .as_deref()
            .and_then(|k| row.get(k))
            .filter(|v| is_truthy(v))
            .map(safe_string)
            .unwrap_or_default();

        let percentile = self
            .percentile
            .map(|k| number_or(row.get(k), 0.0))
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        let z_score = self.z_score.map(|k| number_or(row.get(k), 0.0)).unwrap_or(0.0);

        let fallback_rank = position as u32 + 1;
        let rank = self
            .rank
            .and_then(|k| nonzero_number(row.get(k)))
            .filter(|r| *r >= 1.0)
            .map(|r| r.round() as u32)
            .unwrap_or(fallback_rank);

        CandidateRecord {
            name: display_name(&name),
            percentile,
            z_score,
            rank,
            status: self.status_of(row),
        }
    }
}

/// Build the ranking panel: up to 5 active and 5 dropped candidates (active
/// first, 10 max), stable-sorted by rank ascending.
pub fn build_kg_list(doc: Option<&Value>) -> Vec<CandidateRecord> {
    let Some(doc) = doc else { return Vec::new() };

    let rows = match candidate_rows(doc) {
        Ok(rows) => rows,
        Err(e) => {
            debug!(error = %e, "candidates document skipped");
            return Vec::new();
        }
    };
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return Vec::new();
    };
    let keys = KgKeys::probe(first);

    let selected: Vec<&Value> = if keys.status.is_some() {
        let active = rows
            .iter()
            .filter(|r| keys.status_of(r) != CandidateStatus::Dropped)
            .take(PER_STATUS_LIMIT);
        let dropped = rows
            .iter()
            .filter(|r| keys.status_of(r) == CandidateStatus::Dropped)
            .take(PER_STATUS_LIMIT);
        active.chain(dropped).take(MAX_CANDIDATES).collect()
    } else {
        rows.iter().take(MAX_CANDIDATES).collect()
    };

    let mut list: Vec<CandidateRecord> = selected
        .into_iter()
        .enumerate()
        .map(|(i, row)| keys.record(row, i))
        .collect();
    list.sort_by_key(|c| c.rank);
    list
}

/// Number of dropped rows in a candidates document.
pub fn dropped_count(doc: &Value) -> usize {
    let Ok(rows) = candidate_rows(doc) else { return 0 };
    rows.iter()
        .filter(|r| {
            r.get("status")
                .and_then(Value::as_str)
                .is_some_and(|s| CandidateStatus::from_raw(s) == CandidateStatus::Dropped)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rescuerx_test_utils::{depression_candidates, glioblastoma_candidates};
    use serde_json::json;

    fn mixed_candidates(active: usize, dropped: usize) -> Value {
        let mut rows = Vec::new();
        for i in 0..active {
            rows.push(json!({ "drug_name": format!("ACTIVE{i}"), "kg_rank": i + 1, "status": "active" }));
        }
        for i in 0..dropped {
            rows.push(json!({ "drug_name": format!("DROPPED{i}"), "kg_rank": active + i + 1, "status": "dropped" }));
        }
        json!({ "candidates": rows })
    }

    #[test]
    fn test_seven_active_four_dropped() {
        let list = build_kg_list(Some(&mixed_candidates(7, 4)));
        assert!(list.len() <= 10);
        assert_eq!(list.len(), 9);

        let first_dropped = list.iter().position(|c| c.status == CandidateStatus::Dropped).unwrap();
        assert!(list[..first_dropped].iter().all(|c| c.status == CandidateStatus::Active));
        assert!(list[first_dropped..].iter().all(|c| c.status == CandidateStatus::Dropped));
        assert!(list.windows(2).all(|w| w[0].rank <= w[1].rank));
    }

    #[test]
    fn test_object_shape_sorted_by_rank() {
        let list = build_kg_list(Some(&glioblastoma_candidates()));
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bevacizumab", "Valproic Acid", "Chloroquine", "Disulfiram", "Metformin"]);
        assert_eq!(list[0].status, CandidateStatus::Dropped);
        assert_eq!(list[0].percentile, 99.1);
        assert_eq!(list[0].z_score, 3.4);
    }

    #[test]
    fn test_bare_array_without_status() {
        let list = build_kg_list(Some(&depression_candidates()));
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].name, "Ketamine");
        assert_eq!(list[0].percentile, 98.5);
        assert!(list.iter().all(|c| c.status == CandidateStatus::Unknown));
    }

    #[test]
    fn test_unknown_list_key_is_scanned() {
        let doc = json!({ "meta": "x", "ranked": [ { "compound": "DRUG A" }, { "compound": "DRUG B" } ] });
        let list = build_kg_list(Some(&doc));
        assert_eq!(list.len(), 2);
        // Name falls back to the first key, rank to position.
        assert_eq!(list[0].name, "Drug A");
        assert_eq!(list[1].rank, 2);
    }

    #[test]
    fn test_missing_or_invalid_rank_uses_position() {
        let doc = json!([
            { "name": "A", "rank": 0 },
            { "name": "B", "rank": "n/a" },
            { "name": "C", "rank": 1 }
        ]);
        let list = build_kg_list(Some(&doc));
        let ranks: Vec<u32> = list.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![1, 1, 2]);
        // Stable: A (fallback 1) stays ahead of C (explicit 1).
        assert_eq!(list[0].name, "A");
        assert_eq!(list[1].name, "C");
    }

    #[test]
    fn test_percentile_clamped() {
        let doc = json!([{ "name": "A", "percentile": 140 }]);
        assert_eq!(build_kg_list(Some(&doc))[0].percentile, 100.0);
    }

    #[test]
    fn test_absent_and_malformed_documents() {
        assert!(build_kg_list(None).is_empty());
        assert!(build_kg_list(Some(&json!("nope"))).is_empty());
        assert!(build_kg_list(Some(&json!({ "results": { "a": 1 } }))).is_empty());
        assert!(build_kg_list(Some(&json!({ "candidates": [] }))).is_empty());
    }

    #[test]
    fn test_dropped_count() {
        assert_eq!(dropped_count(&glioblastoma_candidates()), 2);
        assert_eq!(dropped_count(&depression_candidates()), 0);
    }
}
