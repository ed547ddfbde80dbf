//! Evidence wall: per-drug literature and molecular evidence.
//!
//! Three documents feed the wall, merged in this order:
//! `evidence/summary.json` (`evidence_per_drug`), `evidence/literature.json`
//! and `evidence/molecular.json` (both under `results`). Drugs are keyed
//! case-insensitively and keep first-seen order. Each record has four
//! independent categories (literature, molecular, strengths, weaknesses); a
//! later document only fills a category an earlier one left unset.

use rescuerx_common::models::{ClinicalEntry, DatabaseHit, EvidenceRecord, LiteratureEvidence, MolecularProfile};
use rescuerx_common::probe::{entries, field, first_truthy, items, nonzero_number, number_or, text_list, text_of};
use rescuerx_common::text::{display_name, is_truthy, safe_string, title_label};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Clinical text shorter than this is noise ("n=20", "yes").
const MIN_CLINICAL_TEXT: usize = 10;

const ONGOING_KEY: &str = "ongoing_2024_2026";

#[derive(Default)]
struct Draft {
    source_name: String,
    kg_percentile: f64,
    literature: Option<LiteratureEvidence>,
    molecular: Option<MolecularProfile>,
    strengths: Option<Vec<String>>,
    weaknesses: Option<Vec<String>>,
}

impl Draft {
    fn into_record(self) -> EvidenceRecord {
        EvidenceRecord {
            name: display_name(&self.source_name),
            source_name: self.source_name,
            kg_percentile: self.kg_percentile,
            literature: self.literature.unwrap_or_default(),
            molecular: self.molecular.unwrap_or_default(),
            strengths: self.strengths.unwrap_or_default(),
            weaknesses: self.weaknesses.unwrap_or_default(),
        }
    }
}

/// Drafts in first-seen order, indexed by upper-cased drug name.
#[derive(Default)]
struct Wall {
    drafts: Vec<Draft>,
    index: HashMap<String, usize>,
}

impl Wall {
    fn entry(&mut self, name: &str) -> &mut Draft {
        let key = name.to_uppercase();
        let idx = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.drafts.push(Draft { source_name: name.to_string(), ..Draft::default() });
                self.index.insert(key, self.drafts.len() - 1);
                self.drafts.len() - 1
            }
        };
        &mut self.drafts[idx]
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn non_empty(list: Vec<String>) -> Option<Vec<String>> {
    if list.is_empty() { None } else { Some(list) }
}

fn is_long(text: &str) -> bool {
    text.chars().count() > MIN_CLINICAL_TEXT
}

// ── Summary document ─────────────────────────────────────────────────────────

/// Citation count implied by an evidence level when none is reported.
fn inferred_citations(level: &str) -> u32 {
    match level {
        "" => 0,
        "STRONG" => 10,
        "MODERATE" => 5,
        _ => 1,
    }
}

fn summary_literature(d: &Value) -> Option<LiteratureEvidence> {
    if let Some(lit) = field(d, "literature").filter(|l| l.as_object().is_some_and(|o| !o.is_empty())) {
        let level = text_of(first_truthy(lit, &["evidence_level"]));
        let citation_count = match field(lit, "citation_count") {
            Some(v) => number_or(Some(v), 0.0).max(0.0) as u32,
            None => inferred_citations(&level),
        };
        let clinical_entries = text_list(field(lit, "key_findings"))
            .into_iter()
            .map(|text| ClinicalEntry { label: "Key Finding".to_string(), text })
            .collect();
        return Some(LiteratureEvidence {
            citation_count,
            evidence_level: level,
            recommendation: text_of(first_truthy(lit, &["recommendation"])),
            mechanism: text_of(first_truthy(lit, &["mechanism"])),
            safety: text_of(first_truthy(lit, &["safety"])),
            regulatory: text_of(first_truthy(lit, &["regulatory"])),
            clinical_entries,
        });
    }

    // Investigator pipelines write flat fields instead of a nested object.
    let level = first_truthy(d, &["literature_level"]).map(safe_string);
    let summary = first_truthy(d, &["literature_summary"]).map(safe_string);
    if level.is_none() && summary.is_none() {
        return None;
    }
    let level = level.unwrap_or_default();
    Some(LiteratureEvidence {
        citation_count: inferred_citations(&level),
        evidence_level: level,
        clinical_entries: summary
            .into_iter()
            .map(|text| ClinicalEntry { label: "Summary".to_string(), text })
            .collect(),
        ..LiteratureEvidence::default()
    })
}

fn summary_molecular(d: &Value) -> Option<MolecularProfile> {
    if let Some(mol) = field(d, "molecular").filter(|m| m.as_object().is_some_and(|o| !o.is_empty())) {
        return Some(molecular_profile(mol));
    }
    if first_truthy(d, &["tanimoto_best", "tanimoto_to", "smiles"]).is_some() {
        return Some(molecular_profile(d));
    }
    None
}

fn merge_summary(wall: &mut Wall, summary: &Value) {
    for (name, d) in entries(field(summary, "evidence_per_drug")) {
        let draft = wall.entry(name);
        draft.kg_percentile = number_or(field(d, "kg_percentile"), draft.kg_percentile);
        fill(&mut draft.literature, summary_literature(d));
        fill(&mut draft.molecular, summary_molecular(d));
        fill(&mut draft.strengths, non_empty(text_list(field(d, "strengths"))));
        fill(&mut draft.weaknesses, non_empty(text_list(field(d, "weaknesses"))));
    }
}

// ── Literature document ──────────────────────────────────────────────────────

fn clinical_entries(d: &Value) -> Vec<ClinicalEntry> {
    let mut out = Vec::new();

    for (key, val) in entries(field(d, "clinical_evidence")) {
        if key == ONGOING_KEY {
            continue;
        }
        if let Some(text) = val.as_str().filter(|t| is_long(t)) {
            out.push(ClinicalEntry { label: title_label(key), text: text.to_string() });
        }
    }

    for (key, val) in entries(field(d, "known_clinical_data")) {
        let texts: Vec<&str> = match val {
            Value::String(s) => vec![s.as_str()],
            Value::Array(list) => list.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        for text in texts.into_iter().filter(|t| is_long(t)) {
            out.push(ClinicalEntry { label: title_label(key), text: text.to_string() });
        }
    }

    for (key, label) in [("why_abandoned", "Why Abandoned"), ("why_not_pursued", "Why Not Pursued")] {
        if let Some(v) = first_truthy(d, &[key]) {
            out.push(ClinicalEntry { label: label.to_string(), text: safe_string(v) });
        }
    }
    out
}

fn literature_evidence(d: &Value) -> LiteratureEvidence {
    let kcd = field(d, "known_clinical_data");
    let level = text_of(first_truthy(d, &["evidence_level"]));

    LiteratureEvidence {
        citation_count: nonzero_number(field(d, "citation_count"))
            .map(|n| n.max(0.0) as u32)
            .unwrap_or(if level.is_empty() { 0 } else { 1 }),
        evidence_level: level,
        recommendation: text_of(first_truthy(d, &["recommendation"])),
        mechanism: text_of(first_truthy(d, &["mechanism"]).or_else(|| kcd.and_then(|k| first_truthy(k, &["mechanism"])))),
        safety: text_of(
            first_truthy(d, &["safety"])
                .or_else(|| kcd.and_then(|k| first_truthy(k, &["safety", "safety_notes"]))),
        ),
        regulatory: text_of(first_truthy(d, &["regulatory"])),
        clinical_entries: clinical_entries(d),
    }
}

fn merge_literature(wall: &mut Wall, literature: &Value) {
    for (name, d) in entries(field(literature, "results")) {
        let draft = wall.entry(name);
        fill(&mut draft.literature, Some(literature_evidence(d)));
        fill(&mut draft.strengths, non_empty(text_list(first_truthy(d, &["key_strengths", "strengths"]))));
        fill(&mut draft.weaknesses, non_empty(text_list(first_truthy(d, &["key_weaknesses", "weaknesses"]))));
    }
}

// ── Molecular document ───────────────────────────────────────────────────────

/// `"ESKETAMINE (S-enantiomer)"` → `"ESKETAMINE"`.
fn strip_parenthetical(name: &str) -> String {
    match name.find('(') {
        Some(i) if i > 0 => name[..i].trim().to_string(),
        _ => name.to_string(),
    }
}

/// Hits strictly between 0 and 1 (self-matches excluded), most similar first.
fn database_hits(d: &Value) -> Vec<DatabaseHit> {
    let mut hits: Vec<DatabaseHit> = items(field(d, "database_hits"))
        .into_iter()
        .filter_map(|h| {
            let tanimoto = nonzero_number(field(h, "tanimoto")).filter(|t| *t > 0.0 && *t < 1.0)?;
            Some(DatabaseHit {
                name: text_of(first_truthy(h, &["drug_name", "name"])),
                tanimoto,
                interpretation: text_of(first_truthy(h, &["interpretation", "interp"])),
            })
        })
        .collect();
    hits.sort_by(|a, b| b.tanimoto.total_cmp(&a.tanimoto));
    hits
}

fn molecular_profile(d: &Value) -> MolecularProfile {
    let mut hits = database_hits(d);
    let best = hits.first();

    let max_tanimoto = field(d, "similarity_to_approved")
        .and_then(|s| nonzero_number(field(s, "max_tanimoto")))
        .or_else(|| nonzero_number(field(d, "max_tanimoto_approved")))
        .or_else(|| best.map(|h| h.tanimoto))
        .or_else(|| nonzero_number(field(d, "estimated_tanimoto")))
        .or_else(|| nonzero_number(field(d, "tanimoto_best")));

    let most_similar = best
        .map(|h| h.name.clone())
        .filter(|n| !n.is_empty())
        .or_else(|| first_truthy(d, &["most_similar_approved_drug", "tanimoto_to"]).map(safe_string))
        .map(|n| strip_parenthetical(&n));

    if hits.is_empty() {
        if let (Some(tanimoto), Some(name)) = (max_tanimoto, most_similar.as_ref()) {
            hits.push(DatabaseHit {
                name: name.clone(),
                tanimoto,
                interpretation: text_of(first_truthy(d, &["structural_similarity_to_approved"])),
            });
        }
    }

    let similarity = text_of(field(d, "structural_similarity_to_approved"));
    MolecularProfile {
        class: text_of(first_truthy(d, &["interpretation", "class"])),
        smiles: first_truthy(d, &["smiles"]).map(safe_string),
        max_tanimoto_to_approved: max_tanimoto,
        most_similar_drug: most_similar,
        structurally_novel: field(d, "structurally_novel").is_some_and(is_truthy) || similarity == "LOW",
        database_hits: hits,
        advantages: text_list(field(d, "advantages")),
        disadvantages: text_list(field(d, "disadvantages")),
    }
}

fn merge_molecular(wall: &mut Wall, molecular: &Value) {
    for (name, d) in entries(field(molecular, "results")) {
        let draft = wall.entry(name);
        fill(&mut draft.molecular, Some(molecular_profile(d)));
    }
}

/// Build the evidence wall from up to three documents.
pub fn build_evidence(
    summary: Option<&Value>,
    literature: Option<&Value>,
    molecular: Option<&Value>,
) -> Vec<EvidenceRecord> {
    let mut wall = Wall::default();
    if let Some(sum) = summary {
        merge_summary(&mut wall, sum);
    }
    if let Some(lit) = literature {
        merge_literature(&mut wall, lit);
    }
    if let Some(mol) = molecular {
        merge_molecular(&mut wall, mol);
    }
    debug!(n = wall.drafts.len(), "evidence wall built");
    wall.drafts.into_iter().map(Draft::into_record).collect()
}
