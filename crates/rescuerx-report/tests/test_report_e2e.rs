//! End-to-end report assembly over in-memory document sources.

use async_trait::async_trait;
use rescuerx_common::error::{RescueError, Result};
use rescuerx_common::models::{DebateSide, JudgeLabel};
use rescuerx_report::{DocumentSource, MemorySource, ReportContext, ReportOrchestrator, ReportSession, SelectionOutcome};
use pretty_assertions::assert_eq;
use rescuerx_test_utils::{
    depression_candidates, depression_faers, depression_literature, depression_molecular,
    glioblastoma_candidates, glioblastoma_summary, glioblastoma_trials, glioblastoma_verdicts,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn manifest() -> Value {
    json!({
        "generated": "2026-02-14T09:12:00Z",
        "diseases": [
            { "id": "glioblastoma", "label": "Glioblastoma", "hasEvidence": true, "hasCourt": true, "hasTrials": true },
            { "id": "major_depression", "label": "Major depression", "hasEvidence": true, "hasCourt": false, "hasTrials": false }
        ]
    })
}

fn staged() -> MemorySource {
    MemorySource::new()
        .with("manifest.json", manifest())
        .with("glioblastoma/candidates.json", glioblastoma_candidates())
        .with("glioblastoma/evidence/summary.json", glioblastoma_summary())
        .with("glioblastoma/evidence/clinical_trials.json", glioblastoma_trials())
        .with("glioblastoma/court/verdict_scores.json", glioblastoma_verdicts())
        .with("major_depression/candidates.json", depression_candidates())
        .with("major_depression/evidence/literature.json", depression_literature())
        .with("major_depression/evidence/molecular.json", depression_molecular())
        .with("major_depression/evidence/faers_signals.json", depression_faers())
}

fn orchestrator(source: impl DocumentSource + 'static) -> ReportOrchestrator {
    ReportOrchestrator::new(Arc::new(ReportContext::new(Arc::new(source))))
}

#[tokio::test]
async fn test_glioblastoma_full_report() {
    let report = orchestrator(staged()).build_report("glioblastoma").await.unwrap();

    assert_eq!(report.disease_label, "Glioblastoma");
    assert_eq!(report.kg_list.len(), 5);
    assert!(report.has_kg && report.has_trials && report.has_evidence && report.has_court);

    assert_eq!(report.trials[0].nct_id, "NCT01351740");
    assert!(report.trials[0].is_prime_signal);

    assert_eq!(report.top_drug, "Bevacizumab");
    assert_eq!(report.judge_points[0].label, JudgeLabel::Ruling);
    assert_eq!(report.judge_points.last().map(|p| p.label), Some(JudgeLabel::FinalOrder));

    assert_eq!(report.debate.first().map(|d| d.side), Some(DebateSide::Advocate));
    assert_eq!(report.debate.last().map(|d| d.side), Some(DebateSide::Advocate));
    assert_eq!(report.meta.total_scored, 1520);
}

#[tokio::test]
async fn test_candidates_and_verdicts_only() {
    let source = MemorySource::new()
        .with("als/candidates.json", glioblastoma_candidates())
        .with("als/court/verdict_scores.json", glioblastoma_verdicts());
    let report = orchestrator(source).build_report("als").await.unwrap();

    assert!(!report.kg_list.is_empty());
    assert!(!report.verdicts.is_empty());
    assert!(report.trials.is_empty());
    assert!(report.evidence.is_empty());
    assert!(!report.has_trials);
    assert!(!report.has_evidence);
    // Verdict strengths and risks still feed the debate.
    assert!(report.has_court);
}

#[tokio::test]
async fn test_report_is_deterministic() {
    let orch = orchestrator(staged());
    let a = orch.build_report("major_depression").await.unwrap();
    let b = orch.build_report("major_depression").await.unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[tokio::test]
async fn test_invalid_disease_id_rejected() {
    let err = orchestrator(staged()).build_report("../glioblastoma").await.unwrap_err();
    assert!(matches!(err, RescueError::InvalidDiseaseId(_)));
}

#[tokio::test]
async fn test_unknown_disease_gives_empty_report() {
    let report = orchestrator(staged()).build_report("psoriasis").await.unwrap();
    assert!(!report.has_kg && !report.has_trials && !report.has_evidence && !report.has_court);
    assert_eq!(report.disease_label, "Psoriasis");
}

/// Fails every FAERS fetch with a parse error and counts manifest reads.
struct FlakySource {
    inner: MemorySource,
    manifest_reads: AtomicUsize,
    fail_manifest: bool,
}

#[async_trait]
impl DocumentSource for FlakySource {
    async fn fetch(&self, path: &str) -> Result<Value> {
        if path == "manifest.json" {
            self.manifest_reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_manifest {
                return Err(RescueError::UnrecognizedSchema("manifest".into()));
            }
        }
        if path.ends_with("faers_signals.json") {
            return Err(RescueError::UnrecognizedSchema(path.to_string()));
        }
        self.inner.fetch(path).await
    }

    fn describe(&self) -> String {
        "flaky".into()
    }
}

#[tokio::test]
async fn test_failed_document_treated_as_absent() {
    let source = FlakySource { inner: staged(), manifest_reads: AtomicUsize::new(0), fail_manifest: false };
    let report = orchestrator(source).build_report("major_depression").await.unwrap();
    assert!(report.faers.drugs.is_empty());
    assert_eq!(report.meta.total_faers, 0);
    // Literature and molecular still populate the wall.
    assert!(report.has_evidence);
}

#[tokio::test]
async fn test_manifest_cached_only_on_success() {
    let failing = Arc::new(FlakySource { inner: staged(), manifest_reads: AtomicUsize::new(0), fail_manifest: true });
    let ctx = ReportContext::new(failing.clone());
    assert!(ctx.manifest().await.is_err());
    assert!(ctx.manifest().await.is_err());
    assert_eq!(failing.manifest_reads.load(Ordering::SeqCst), 2);

    let healthy = Arc::new(FlakySource { inner: staged(), manifest_reads: AtomicUsize::new(0), fail_manifest: false });
    let ctx = ReportContext::new(healthy.clone());
    assert_eq!(ctx.resolve("glio").await.unwrap().id, "glioblastoma");
    assert_eq!(ctx.resolve("depression").await.unwrap().id, "major_depression");
    assert!(matches!(ctx.resolve("psoriasis").await, Err(RescueError::NoMatch(_))));
    assert_eq!(healthy.manifest_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stale_selection_discarded() {
    let orch = orchestrator(staged());
    let session = ReportSession::new();

    let slow = session.begin("glioblastoma");
    let fast = session.begin("major_depression");

    let fast_report = orch.build_report(&fast.disease_id).await.unwrap();
    assert!(matches!(session.complete(fast, fast_report), SelectionOutcome::Applied(_)));

    let slow_report = orch.build_report(&slow.disease_id).await.unwrap();
    assert!(matches!(session.complete(slow, slow_report), SelectionOutcome::Superseded { .. }));

    let current = session.current().unwrap();
    assert_eq!(current.disease_id, "major_depression");
    assert_eq!(current.report.disease_label, "Major Depression");

    let SelectionOutcome::Applied(sel) = session.select(&orch, "glioblastoma").await.unwrap() else {
        panic!("a lone selection applies");
    };
    assert_eq!(sel.generation, 3);
}
