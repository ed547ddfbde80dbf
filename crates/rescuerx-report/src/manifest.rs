//! The disease manifest and free-text disease lookup.
//!
//! `manifest.json` lists every staged disease:
//!
//! ```json
//! { "generated": "2026-02-14T09:12:00Z",
//!   "diseases": [ { "id": "glioblastoma", "label": "Glioblastoma",
//!                   "hasEvidence": true, "hasCourt": true, "hasTrials": true } ] }
//! ```

use chrono::{DateTime, Utc};
use regex::Regex;
use rescuerx_common::error::{RescueError, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MANIFEST_PATH: &str = "manifest.json";

/// Query words this short are too ambiguous for the word-match pass.
const MIN_WORD_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseEntry {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub has_evidence: bool,
    #[serde(default)]
    pub has_court: bool,
    #[serde(default)]
    pub has_trials: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub generated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub diseases: Vec<DiseaseEntry>,
}

impl Manifest {
    pub fn resolve(&self, query: &str) -> Option<&DiseaseEntry> {
        resolve(query, &self.diseases)
    }
}

fn query_strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9 ]").unwrap())
}

fn id_strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_-]").unwrap())
}

/// Lowercase, trim, keep `[a-z0-9 ]`.
pub fn normalize_query(query: &str) -> String {
    query_strip_regex()
        .replace_all(query.to_lowercase().trim(), "")
        .into_owned()
}

fn find_by<'a>(
    diseases: &'a [DiseaseEntry],
    labels: &[String],
    pred: impl Fn(&str, &str) -> bool,
) -> Option<&'a DiseaseEntry> {
    diseases
        .iter()
        .zip(labels)
        .find(|(d, label)| pred(&d.id, label.as_str()))
        .map(|(d, _)| d)
}

/// Match free text against the staged diseases. Passes, in priority order:
/// exact id or label, prefix, substring, then any query word of three or more
/// characters found in an id or label.
pub fn resolve<'a>(query: &str, diseases: &'a [DiseaseEntry]) -> Option<&'a DiseaseEntry> {
    let q = normalize_query(query);
    if q.is_empty() || diseases.is_empty() {
        return None;
    }
    let q = q.as_str();
    let labels: Vec<String> = diseases.iter().map(|d| d.label.to_lowercase()).collect();

    find_by(diseases, &labels, |id, label| id == q || label == q)
        .or_else(|| find_by(diseases, &labels, |id, label| id.starts_with(q) || label.starts_with(q)))
        .or_else(|| find_by(diseases, &labels, |id, label| id.contains(q) || label.contains(q)))
        .or_else(|| {
            let words: Vec<&str> = q
                .split_whitespace()
                .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
                .collect();
            find_by(diseases, &labels, |id, label| words.iter().any(|w| id.contains(w) || label.contains(w)))
        })
}

/// Staged disease ids are lowercase with anything outside `[a-z0-9_-]`
/// replaced by `_`. Ids that would not survive that rule unchanged are
/// rejected so they can never be used to build document paths.
pub fn sanitize_disease_id(raw: &str) -> Result<String> {
    let id = id_strip_regex().replace_all(&raw.to_lowercase(), "_").into_owned();
    if id.is_empty() || id != raw {
        return Err(RescueError::InvalidDiseaseId(raw.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry(id: &str, label: &str) -> DiseaseEntry {
        DiseaseEntry { id: id.into(), label: label.into(), has_evidence: true, has_court: true, has_trials: false }
    }

    fn diseases() -> Vec<DiseaseEntry> {
        vec![
            entry("glioblastoma", "Glioblastoma"),
            entry("breast_cancer", "Breast cancer"),
            entry("depression", "Depression"),
            entry("major_depression_adolescent", "Major depression adolescent"),
        ]
    }

    fn resolved(q: &str) -> Option<String> {
        resolve(q, &diseases()).map(|d| d.id.clone())
    }

    #[test]
    fn test_exact_beats_prefix() {
        assert_eq!(resolved("Depression").as_deref(), Some("depression"));
        assert_eq!(resolved("  BREAST CANCER! ").as_deref(), Some("breast_cancer"));
    }

    #[test]
    fn test_prefix_then_substring() {
        assert_eq!(resolved("glio").as_deref(), Some("glioblastoma"));
        assert_eq!(resolved("blastoma").as_deref(), Some("glioblastoma"));
        assert_eq!(resolved("major dep").as_deref(), Some("major_depression_adolescent"));
    }

    #[test]
    fn test_word_match() {
        assert_eq!(resolved("metastatic breast tumours").as_deref(), Some("breast_cancer"));
        // Words shorter than three characters are ignored.
        assert_eq!(resolved("of ab"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(resolved("psoriasis"), None);
        assert_eq!(resolved(""), None);
        assert_eq!(resolve("glio", &[]), None);
    }

    #[test]
    fn test_sanitize_disease_id() {
        assert_eq!(sanitize_disease_id("breast_cancer").unwrap(), "breast_cancer");
        assert_eq!(sanitize_disease_id("als-2").unwrap(), "als-2");
        assert!(sanitize_disease_id("../secrets").is_err());
        assert!(sanitize_disease_id("Breast Cancer").is_err());
        assert!(sanitize_disease_id("").is_err());
    }

    #[test]
    fn test_manifest_deserialises_staging_output() {
        let doc = json!({
            "generated": "2026-02-14T09:12:00.000Z",
            "diseases": [{ "id": "glioblastoma", "label": "Glioblastoma", "hasEvidence": true, "hasCourt": true, "hasTrials": true }]
        });
        let m: Manifest = serde_json::from_value(doc).unwrap();
        assert!(m.generated.is_some());
        assert!(m.diseases[0].has_trials);
        assert_eq!(m.resolve("glio").map(|d| d.label.as_str()), Some("Glioblastoma"));

        let sparse: Manifest = serde_json::from_value(json!({ "diseases": [{ "id": "x", "label": "X" }] })).unwrap();
        assert_eq!(sparse.generated, None);
        assert!(!sparse.diseases[0].has_court);
    }
}
