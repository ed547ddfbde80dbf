//! Report assembly for one disease.
//!
//! [`ReportContext`] owns the document source and the manifest cache for the
//! lifetime of a server or CLI run. [`ReportOrchestrator`] fetches the seven
//! documents of a disease concurrently and runs every adapter and
//! synthesizer over whatever arrived.

use rescuerx_adapters::{
    build_evidence, build_faers, build_kg_list, build_trials, build_verdicts, collect_ammunition, kg,
    synthesize_tiers, upstream_tiers,
};
use rescuerx_common::error::{RescueError, Result};
use rescuerx_common::models::{DiseaseReport, ReportMeta};
use rescuerx_common::probe::{field, first_truthy, number_or};
use rescuerx_common::text::{display_name, safe_string, title_label};
use rescuerx_court::{build_ruling, synthesize_debate_text};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::manifest::{sanitize_disease_id, DiseaseEntry, Manifest, MANIFEST_PATH};
use crate::source::DocumentSource;

// ── Document layout ──────────────────────────────────────────────────────────

pub const CANDIDATES_DOC: &str = "candidates.json";
pub const SUMMARY_DOC: &str = "evidence/summary.json";
pub const CLINICAL_TRIALS_DOC: &str = "evidence/clinical_trials.json";
pub const FAERS_DOC: &str = "evidence/faers_signals.json";
pub const LITERATURE_DOC: &str = "evidence/literature.json";
pub const MOLECULAR_DOC: &str = "evidence/molecular.json";
pub const VERDICTS_DOC: &str = "court/verdict_scores.json";

/// Every upstream document of one disease; absent ones are `None`.
#[derive(Debug, Clone, Default)]
pub struct DiseaseDocuments {
    pub candidates: Option<Value>,
    pub summary: Option<Value>,
    pub clinical_trials: Option<Value>,
    pub faers: Option<Value>,
    pub literature: Option<Value>,
    pub molecular: Option<Value>,
    pub verdicts: Option<Value>,
}

impl DiseaseDocuments {
    pub fn available(&self) -> usize {
        [
            &self.candidates,
            &self.summary,
            &self.clinical_trials,
            &self.faers,
            &self.literature,
            &self.molecular,
            &self.verdicts,
        ]
        .iter()
        .filter(|d| d.is_some())
        .count()
    }
}

// ── Context ──────────────────────────────────────────────────────────────────

pub struct ReportContext {
    source: Arc<dyn DocumentSource>,
    manifest: OnceCell<Arc<Manifest>>,
}

impl ReportContext {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source, manifest: OnceCell::new() }
    }

    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    /// The manifest, loaded on first use. A failed load is not cached, so
    /// the next call retries.
    pub async fn manifest(&self) -> Result<Arc<Manifest>> {
        self.manifest
            .get_or_try_init(|| async {
                let doc = self.source.fetch(MANIFEST_PATH).await?;
                let manifest: Manifest = serde_json::from_value(doc)?;
                info!(diseases = manifest.diseases.len(), "manifest loaded");
                Ok::<_, RescueError>(Arc::new(manifest))
            })
            .await
            .cloned()
    }

    /// Resolve free text to a staged disease.
    pub async fn resolve(&self, query: &str) -> Result<DiseaseEntry> {
        let manifest = self.manifest().await?;
        manifest
            .resolve(query)
            .cloned()
            .ok_or_else(|| RescueError::NoMatch(query.to_string()))
    }

    /// Fetch one document, treating any failure as absence.
    async fn fetch_optional(&self, path: String) -> Option<Value> {
        match self.source.fetch(&path).await {
            Ok(doc) => Some(doc),
            Err(RescueError::MissingDocument(_)) => {
                debug!(%path, "document absent");
                None
            }
            Err(e) => {
                warn!(%path, error = %e, "document fetch failed");
                None
            }
        }
    }

    /// Fetch all seven documents of a disease concurrently.
    pub async fn fetch_documents(&self, disease_id: &str) -> DiseaseDocuments {
        let path = |doc: &str| format!("{disease_id}/{doc}");
        let (candidates, summary, clinical_trials, faers, literature, molecular, verdicts) = tokio::join!(
            self.fetch_optional(path(CANDIDATES_DOC)),
            self.fetch_optional(path(SUMMARY_DOC)),
            self.fetch_optional(path(CLINICAL_TRIALS_DOC)),
            self.fetch_optional(path(FAERS_DOC)),
            self.fetch_optional(path(LITERATURE_DOC)),
            self.fetch_optional(path(MOLECULAR_DOC)),
            self.fetch_optional(path(VERDICTS_DOC)),
        );
        DiseaseDocuments { candidates, summary, clinical_trials, faers, literature, molecular, verdicts }
    }
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ReportOrchestrator {
    ctx: Arc<ReportContext>,
}

impl ReportOrchestrator {
    pub fn new(ctx: Arc<ReportContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ReportContext {
        &self.ctx
    }

    /// Fetch and assemble the report for a staged disease id.
    #[instrument(skip(self))]
    pub async fn build_report(&self, disease_id: &str) -> Result<DiseaseReport> {
        let id = sanitize_disease_id(disease_id)?;
        let docs = self.ctx.fetch_documents(&id).await;
        debug!(available = docs.available(), "documents fetched");
        Ok(assemble_report(&id, &docs))
    }
}

fn truthy_number(doc: Option<&Value>, keys: &[&str]) -> f64 {
    doc.and_then(|d| first_truthy(d, keys)).map(|v| number_or(Some(v), 0.0)).unwrap_or(0.0)
}

fn report_meta(docs: &DiseaseDocuments, total_faers: u64) -> ReportMeta {
    let cand = docs.candidates.as_ref();
    let cand_obj = cand.filter(|c| c.is_object());
    let row_count = cand.and_then(|c| kg::candidate_rows(c).ok()).map_or(0, <[Value]>::len);

    let total_scored = match truthy_number(cand_obj, &["total_compounds_scored", "total_scored"]) {
        n if n > 0.0 => n as u64,
        _ => row_count as u64,
    };
    let dropped_count = match cand_obj.and_then(|c| field(c, "stats")) {
        Some(stats) => number_or(field(stats, "dropped"), 0.0) as u64,
        None => cand.map_or(0, kg::dropped_count) as u64,
    };

    let summary = docs.summary.as_ref();
    let literature = docs.literature.as_ref();
    let from_either = |key: &str| {
        let n = truthy_number(summary, &[key]);
        if n != 0.0 { n } else { truthy_number(literature, &[key]) }
    };

    ReportMeta {
        total_scored,
        timing_ms: truthy_number(cand_obj, &["timing_ms"]).max(0.0) as u64,
        total_citations: from_either("total_citations").max(0.0) as u64,
        total_faers,
        dropped_count,
        cost_usd: from_either("total_cost_usd"),
    }
}

/// `"breast_cancer"` → `"Breast Cancer"`, preferring the documents' own name.
fn disease_label(disease_id: &str, docs: &DiseaseDocuments) -> String {
    let named = docs
        .candidates
        .as_ref()
        .filter(|c| c.is_object())
        .and_then(|c| first_truthy(c, &["disease"]))
        .or_else(|| docs.summary.as_ref().and_then(|s| first_truthy(s, &["disease"])))
        .map(safe_string)
        .unwrap_or_else(|| disease_id.to_string());
    title_label(&named)
}

/// Run every adapter and synthesizer over the fetched documents. Pure:
/// identical documents always give an identical report.
pub fn assemble_report(disease_id: &str, docs: &DiseaseDocuments) -> DiseaseReport {
    let candidates = docs.candidates.as_ref();
    let summary = docs.summary.as_ref();
    let literature = docs.literature.as_ref();
    let molecular = docs.molecular.as_ref();
    let faers_doc = docs.faers.as_ref();
    let verdicts_doc = docs.verdicts.as_ref();

    let kg_list = build_kg_list(candidates);
    let trials = build_trials(docs.clinical_trials.as_ref(), summary, literature);
    let faers = build_faers(faers_doc);
    let evidence = build_evidence(summary, literature, molecular);
    let verdicts = build_verdicts(verdicts_doc);

    let ammo = collect_ammunition(summary, literature, faers_doc, molecular, verdicts_doc);
    let debate = synthesize_debate_text(&ammo.advocate, &ammo.skeptic);

    let top_source = verdicts
        .first()
        .map(|v| v.source_name.clone())
        .or_else(|| evidence.first().map(|e| e.source_name.clone()))
        .unwrap_or_default();
    let judge_points = if top_source.is_empty() {
        Vec::new()
    } else {
        build_ruling(verdicts_doc, &top_source)
    };

    let mut tiers = upstream_tiers(summary);
    if tiers.is_empty() {
        tiers = synthesize_tiers(&verdicts);
    }

    let meta = report_meta(docs, faers.total_reports);

    let report = DiseaseReport {
        disease: disease_id.to_string(),
        disease_label: disease_label(disease_id, docs),
        meta,
        has_kg: !kg_list.is_empty(),
        has_trials: !trials.is_empty(),
        has_evidence: !evidence.is_empty() || !faers.drugs.is_empty(),
        has_court: !debate.is_empty() && !verdicts.is_empty(),
        top_drug: display_name(&top_source),
        top_drug_verdict: verdicts.first().cloned(),
        kg_list,
        trials,
        faers,
        evidence,
        verdicts,
        debate,
        judge_points,
        tiers,
    };

    info!(
        disease = %report.disease,
        candidates = report.kg_list.len(),
        trials = report.trials.len(),
        evidence = report.evidence.len(),
        verdicts = report.verdicts.len(),
        debate = report.debate.len(),
        "report assembled"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rescuerx_test_utils::{
        depression_candidates, depression_faers, depression_literature, depression_molecular,
        glioblastoma_candidates, glioblastoma_summary, glioblastoma_trials, glioblastoma_verdicts,
    };
    use serde_json::json;

    fn glioblastoma_docs() -> DiseaseDocuments {
        DiseaseDocuments {
            candidates: Some(glioblastoma_candidates()),
            summary: Some(glioblastoma_summary()),
            clinical_trials: Some(glioblastoma_trials()),
            verdicts: Some(glioblastoma_verdicts()),
            ..DiseaseDocuments::default()
        }
    }

    #[test]
    fn test_meta_from_candidates_and_summary() {
        let report = assemble_report("glioblastoma", &glioblastoma_docs());
        assert_eq!(
            report.meta,
            ReportMeta {
                total_scored: 1520,
                timing_ms: 842,
                total_citations: 64,
                total_faers: 0,
                dropped_count: 2,
                cost_usd: 3.75,
            }
        );
        assert_eq!(report.disease_label, "Glioblastoma");
    }

    #[test]
    fn test_top_drug_and_ruling() {
        let report = assemble_report("glioblastoma", &glioblastoma_docs());
        assert_eq!(report.top_drug, "Bevacizumab");
        assert_eq!(report.top_drug_verdict.as_ref().map(|v| v.score), Some(75.0));
        assert_eq!(report.judge_points.len(), 7);
        assert!(report.has_court);
        assert!(report.tiers.contains_key("tier_1_prime_candidates"));
    }

    #[test]
    fn test_split_layout_meta_falls_back() {
        let docs = DiseaseDocuments {
            candidates: Some(depression_candidates()),
            literature: Some(depression_literature()),
            molecular: Some(depression_molecular()),
            faers: Some(depression_faers()),
            ..DiseaseDocuments::default()
        };
        let report = assemble_report("major_depression", &docs);
        assert_eq!(report.meta.total_scored, 3);
        assert_eq!(report.meta.total_citations, 41);
        assert_eq!(report.meta.cost_usd, 1.2);
        assert_eq!(report.meta.total_faers, 182000);
        assert_eq!(report.disease_label, "Major Depression");
        // No verdicts: top drug comes from the evidence wall.
        assert_eq!(report.top_drug, "Pramipexole");
        assert!(report.judge_points.is_empty());
        assert!(!report.has_court);
        assert!(report.has_evidence);
    }

    #[test]
    fn test_nothing_available() {
        let report = assemble_report("unknown", &DiseaseDocuments::default());
        assert!(!report.has_kg && !report.has_trials && !report.has_evidence && !report.has_court);
        assert_eq!(report.top_drug, "");
        assert_eq!(report.meta, ReportMeta::default());
        assert_eq!(report.disease_label, "Unknown");
    }

    #[test]
    fn test_upstream_tiers_win() {
        let mut docs = glioblastoma_docs();
        docs.summary = Some(json!({ "candidates_by_tier": { "tier_2_strong_candidates": ["Chloroquine"] } }));
        let report = assemble_report("glioblastoma", &docs);
        assert_eq!(report.tiers.keys().collect::<Vec<_>>(), vec!["tier_2_strong_candidates"]);
    }
}
