//! Shared fixtures for RescueRx tests.
//!
//! Two upstream pipelines produce the documents the adapters read:
//!
//! - the summary-centric layout (`glioblastoma_*`): one `evidence/summary.json`
//!   carrying `evidence_per_drug`, plus a structured trial registry;
//! - the split layout (`depression_*`, `breast_cancer_*`): separate
//!   literature / molecular / FAERS documents keyed under `results` or
//!   per-bucket maps.

use serde_json::{json, Value};

// ── Summary-centric pipeline ─────────────────────────────────────────────────

pub fn glioblastoma_candidates() -> Value {
    json!({
        "disease": "glioblastoma",
        "total_compounds_scored": 1520,
        "timing_ms": 842,
        "stats": { "dropped": 2 },
        "candidates": [
            { "drug_name": "BEVACIZUMAB", "kg_percentile": 99.1, "kg_z_score": 3.4, "kg_rank": 1, "status": "dropped" },
            { "drug_name": "VALPROIC ACID", "kg_percentile": 97.8, "kg_z_score": 2.9, "kg_rank": 2, "status": "active" },
            { "drug_name": "CHLOROQUINE", "kg_percentile": 95.2, "kg_z_score": 2.5, "kg_rank": 3, "status": "active" },
            { "drug_name": "DISULFIRAM", "kg_percentile": 93.0, "kg_z_score": 2.2, "kg_rank": 4, "status": "dropped" },
            { "drug_name": "METFORMIN", "kg_percentile": 90.4, "kg_z_score": 1.9, "kg_rank": 5, "status": "active" }
        ]
    })
}

pub fn glioblastoma_summary() -> Value {
    json!({
        "disease": "glioblastoma",
        "total_citations": 64,
        "total_cost_usd": 3.75,
        "evidence_per_drug": {
            "BEVACIZUMAB": {
                "kg_percentile": 99.1,
                "literature": {
                    "evidence_level": "STRONG",
                    "mechanism": "Anti-VEGF antibody normalizes tumour vasculature",
                    "safety": "Hemorrhage risk in 2-5% of patients",
                    "key_findings": ["Median PFS improved to 10.6 months in AVAglio"],
                    "ongoing_trials_2024_2026": [
                        "NCT04704154 (Phase II combination with lomustine)",
                        "ChiCTR2100045566 low-dose regimen"
                    ]
                },
                "molecular": { "estimated_tanimoto": 0.12, "class": "Monoclonal antibody" },
                "strengths": ["Response rate of 28% in recurrent GBM"],
                "weaknesses": ["No overall survival benefit in Phase III"],
                "advocate_ammunition": ["FDA accelerated approval in 2009 for recurrent GBM"],
                "skeptic_ammunition": ["AVAglio and RTOG 0825 both failed on overall survival"]
            },
            "VALPROIC ACID": {
                "kg_percentile": 97.8,
                "literature": { "evidence_level": "MODERATE", "citation_count": 12 },
                "strengths": ["HDAC inhibition sensitizes GBM cells to temozolomide"],
                "weaknesses": ["Retrospective survival signal only"]
            }
        },
        "court_recommendations": {
            "advocate_ammunition": ["Business-driven termination of NCT01234567 left efficacy untested"],
            "skeptic_ammunition": "Blood-brain barrier penetration is poor for antibodies"
        }
    })
}

pub fn glioblastoma_trials() -> Value {
    json!({
        "results": {
            "BEVACIZUMAB": {
                "classification": "SAFETY",
                "interpretation": "Multiple trials halted for bleeding",
                "trials": [
                    { "nct_id": "NCT00345163", "phases": ["PHASE2"], "status": "COMPLETED", "failure_category": "NONE" },
                    { "nct_id": "NCT00943826", "phases": ["PHASE3"], "status": "TERMINATED", "failure_category": "SAFETY", "why_stopped": "Hemorrhage events" },
                    { "nct_id": "NCT01351740", "phases": ["PHASE1", "PHASE2"], "status": "TERMINATED", "failure_category": "BUSINESS/LOGISTICS", "why_stopped": "Sponsor merger" }
                ]
            },
            "DISULFIRAM": {
                "classification": "NO_TRIALS",
                "interpretation": "No registered trials for glioblastoma",
                "trials": []
            }
        }
    })
}

pub fn glioblastoma_verdicts() -> Value {
    json!({
        "disease": "glioblastoma",
        "verdicts": [
            {
                "drug_name": "BEVACIZUMAB",
                "rescue_score": 75,
                "verdict": "RECOMMEND FOR RESCUE",
                "dimension_scores": { "kg_signal": 91, "trial_safety": 60, "faers_signal": 70, "literature": 85, "molecular": 40 },
                "strengths": ["Strong KG signal at the 99th percentile", "Phase II response rate of 28%"],
                "risks": ["Hemorrhage risk", "No overall survival benefit"],
                "confidence": "80%",
                "timeline_estimate": "3-5 years",
                "next_steps": ["Run a biomarker-selected Phase II", "Characterise BBB penetration", "Model dosing"],
                "investment_recommendation": "Fund a biomarker-driven Phase II study"
            },
            {
                "drug_name": "VALPROIC ACID",
                "rescue_score": 55,
                "verdict": "CONDITIONAL",
                "dimension_scores": { "kg_signal": 80, "literature": 60 },
                "strengths": ["Cheap and widely available"],
                "risks": ["Hepatotoxicity at high doses"],
                "confidence": 0.6,
                "next_steps": ["Retrospective cohort analysis"]
            },
            {
                "drug_name": "DISULFIRAM",
                "rescue_score": 0,
                "verdict": "INSUFFICIENT DATA"
            }
        ],
        "dissenting_notes": {
            "disagreement_with_skeptic": "The survival endpoint is not the only relevant endpoint",
            "disagreement_with_advocate": ["Accelerated approval does not imply efficacy"]
        }
    })
}

// ── Split-document pipeline ──────────────────────────────────────────────────

pub fn depression_candidates() -> Value {
    json!([
        { "drug": "KETAMINE", "percentile": 98.5, "z_score": 3.1, "rank": 1 },
        { "drug": "PSILOCYBIN", "percentile": 96.0, "z_score": 2.7, "rank": 2 },
        { "drug": "PRAMIPEXOLE", "percentile": 92.3, "z_score": 2.0, "rank": 3 }
    ])
}

pub fn depression_literature() -> Value {
    json!({
        "total_citations": 41,
        "total_cost_usd": 1.2,
        "results": {
            "PRAMIPEXOLE": {
                "evidence_level": "MODERATE",
                "recommendation": "PURSUE",
                "mechanism": "D2/D3 agonism targets anhedonia",
                "clinical_evidence": {
                    "response_rate": "Response rate of 68% vs 20% placebo in an RCT",
                    "short": "n=20",
                    "ongoing_2024_2026": ["NCT05123456 PAX-D trial recruiting", "tiny"]
                },
                "known_clinical_data": {
                    "safety_notes": "Impulse control disorders reported in Parkinson's use",
                    "trials": ["Phase II showed rapid onset within 2 weeks", "small"]
                },
                "why_abandoned": "Patent expiry removed commercial incentive",
                "key_strengths": ["Dopaminergic mechanism addresses anhedonia directly"],
                "weaknesses": ["Small trials, underpowered"]
            }
        },
        "strategic_notes": {
            "advocate_ammunition": "PAX-D is the largest trial of a dopamine agonist in depression",
            "skeptic_ammunition": "Effect sizes shrink in larger samples",
            "court_considerations": "Consider publication bias in small RCTs"
        }
    })
}

pub fn depression_molecular() -> Value {
    json!({
        "advocate_ammunition": "Pramipexole is structurally novel among antidepressants",
        "results": {
            "PRAMIPEXOLE": {
                "smiles": "CCCNC1CCC2=C(C1)SC(=N2)N",
                "interpretation": "Aminothiazole dopamine agonist",
                "structurally_novel": true,
                "database_hits": [
                    { "drug_name": "ROPINIROLE", "tanimoto": 0.31, "interpretation": "Low similarity" },
                    { "drug_name": "PRAMIPEXOLE", "tanimoto": 1.0 },
                    { "drug_name": "ROTIGOTINE", "tanimoto": 0.42, "interpretation": "Moderate similarity" }
                ],
                "advantages": ["Oral bioavailability above 90%"],
                "disadvantages": ["Nausea in a third of patients"]
            },
            "KETAMINE": {
                "most_similar_approved_drug": "ESKETAMINE (S-enantiomer)",
                "estimated_tanimoto": 0.95,
                "structural_similarity_to_approved": "HIGH",
                "class": "NMDA antagonist"
            }
        }
    })
}

pub fn depression_faers() -> Value {
    json!({
        "total_faers_reports": 182000,
        "interpretation": "Two drugs show inverse depression signals",
        "results": {
            "KETAMINE": { "drug_total_reports": 5200, "report_count": 41, "has_inverse_signal": true, "best_ror": 0.3, "faers_interpretation": "Inverse signal", "protection_pct": 70 },
            "PRAMIPEXOLE": { "drug_total_reports": 8800, "report_count": 130, "ror": 2.1, "has_positive_signal": true, "interpretation": "Risk signal" },
            "PSILOCYBIN": { "drug_total_reports": 40, "report_count": 0, "ror": 0 }
        },
        "strategic_notes": {
            "advocate_ammunition": "Ketamine users report 70% less depression (ROR 0.3)",
            "skeptic_ammunition": "FAERS reporting bias inflates inverse signals"
        }
    })
}

pub fn breast_cancer_faers() -> Value {
    json!({
        "total_faers_reports": 91000,
        "advocate_summary": "Metformin shows a protective FAERS signal (ROR 0.45)",
        "skeptic_summary": "Healthy-user bias confounds metformin signals",
        "repurposing_candidates": {
            "METFORMIN": {
                "drug_total_reports": 12000, "report_count": 88, "ror": 0.45,
                "has_inverse_signal": true, "protection_pct": 55,
                "interpretation": "Protective",
                "advocate_ammunition": ["Protective ROR of 0.45 across 88 co-reports"],
                "skeptic_ammunition": ["Confounded by diabetes status"]
            },
            "ASPIRIN": { "drug_total_reports": 3000, "report_count": 5 },
            "note": "not a drug"
        },
        "established_drugs": {
            "TAMOXIFEN": { "drug_total_reports": 20000, "report_count": 900, "ror": 1.8, "interpretation": "Expected risk" }
        },
        "insufficient_data": {
            "STATIN X": { "drug_total_reports": 10, "report_count": 0 }
        }
    })
}

/// `n` distinct fragments long enough to pass the debate length filter.
pub fn fragments(prefix: &str, n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("{prefix} argument number {i} about the candidate"))
        .collect()
}
