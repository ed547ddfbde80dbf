//! The unified report model.
//!
//! Every adapter reduces its upstream document family to these types; the
//! rest of the system never sees raw JSON. Field names serialise in
//! camelCase so the JSON API matches what the presentation layer consumes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

// ── Knowledge-graph ranking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Active,
    Dropped,
    #[default]
    Unknown,
}

impl CandidateStatus {
    /// Map a raw upstream status. Only `dropped` is special; any other
    /// non-empty value is an active candidate.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" => CandidateStatus::Unknown,
            s if s.eq_ignore_ascii_case("dropped") => CandidateStatus::Dropped,
            s if s.eq_ignore_ascii_case("unknown") => CandidateStatus::Unknown,
            _ => CandidateStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub name: String,
    /// KG percentile, 0–100.
    pub percentile: f64,
    pub z_score: f64,
    /// 1-based.
    pub rank: u32,
    pub status: CandidateStatus,
}

// ── Clinical trials ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialStatus {
    Active,
    Terminated,
    Withdrawn,
    /// Status not reported (`?`).
    Unknown,
    /// Any other upstream status, kept verbatim.
    Other(String),
}

impl TrialStatus {
    pub fn label(&self) -> &str {
        match self {
            TrialStatus::Active => "Active",
            TrialStatus::Terminated => "Terminated",
            TrialStatus::Withdrawn => "Withdrawn",
            TrialStatus::Unknown => "?",
            TrialStatus::Other(s) => s,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "" | "?" => TrialStatus::Unknown,
            "Active" => TrialStatus::Active,
            "TERMINATED" | "Terminated" => TrialStatus::Terminated,
            "WITHDRAWN" | "Withdrawn" => TrialStatus::Withdrawn,
            other => TrialStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for TrialStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TrialStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TrialStatus::from_label(&s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    pub nct_id: String,
    pub drug_name: String,
    pub phase_label: String,
    pub status_label: TrialStatus,
    pub tag: String,
    pub rationale: String,
    /// Stopped for business or logistics reasons rather than safety/efficacy.
    pub is_prime_signal: bool,
}

// ── FAERS ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaersSignal {
    Risk,
    Protective,
    Neutral,
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaersDrugRecord {
    pub name: String,
    pub total_reports: u64,
    pub co_report_count: u64,
    pub has_signal: bool,
    pub reporting_odds_ratio: Option<f64>,
    pub interpretation: String,
    pub protection_percent: Option<f64>,
    pub signal: FaersSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FaersPanel {
    pub summary: String,
    pub total_reports: u64,
    pub drugs: Vec<FaersDrugRecord>,
}

// ── Evidence wall ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalEntry {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LiteratureEvidence {
    pub evidence_level: String,
    pub recommendation: String,
    pub citation_count: u32,
    pub mechanism: String,
    pub safety: String,
    pub regulatory: String,
    pub clinical_entries: Vec<ClinicalEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseHit {
    pub name: String,
    pub tanimoto: f64,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MolecularProfile {
    pub class: String,
    pub smiles: Option<String>,
    pub max_tanimoto_to_approved: Option<f64>,
    pub most_similar_drug: Option<String>,
    pub structurally_novel: bool,
    pub database_hits: Vec<DatabaseHit>,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    pub name: String,
    /// Drug name exactly as the upstream document spelled it.
    pub source_name: String,
    pub kg_percentile: f64,
    pub literature: LiteratureEvidence,
    pub molecular: MolecularProfile,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

// ── Court ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictRecord {
    pub name: String,
    pub source_name: String,
    /// Rescue score, 0–100.
    pub score: f64,
    pub tier: String,
    pub verdict_text: String,
    pub dimension_scores: BTreeMap<String, f64>,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    /// 0–1.
    pub confidence: f64,
    pub timeline_text: String,
    pub estimated_cost_millions: u32,
    pub estimated_years_low: u32,
    pub estimated_years_high: u32,
    pub next_steps: Vec<String>,
    pub investment_recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateSide {
    Advocate,
    Skeptic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateEntry {
    pub side: DebateSide,
    pub topic: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JudgeLabel {
    #[serde(rename = "RULING")]
    Ruling,
    #[serde(rename = "EVIDENCE ACCEPTED")]
    EvidenceAccepted,
    #[serde(rename = "EVIDENCE REJECTED")]
    EvidenceRejected,
    #[serde(rename = "CONDITIONS")]
    Conditions,
    #[serde(rename = "FINAL ORDER")]
    FinalOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgePoint {
    pub label: JudgeLabel,
    pub text: String,
}

// ── Report ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierEntry {
    pub drug_name: String,
    pub rescue_score: Option<f64>,
    pub justification: String,
}

/// Tier key (`tier_1_prime_candidates`, ...) → array of serialised
/// [`TierEntry`] values. Keys keep the order they were inserted in.
pub type TierMap = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub total_scored: u64,
    pub timing_ms: u64,
    pub total_citations: u64,
    pub total_faers: u64,
    pub dropped_count: u64,
    pub cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseReport {
    pub disease: String,
    pub disease_label: String,
    pub meta: ReportMeta,
    pub kg_list: Vec<CandidateRecord>,
    pub trials: Vec<TrialRecord>,
    pub faers: FaersPanel,
    pub evidence: Vec<EvidenceRecord>,
    pub verdicts: Vec<VerdictRecord>,
    pub debate: Vec<DebateEntry>,
    pub judge_points: Vec<JudgePoint>,
    pub top_drug: String,
    pub top_drug_verdict: Option<VerdictRecord>,
    pub tiers: TierMap,
    pub has_kg: bool,
    pub has_trials: bool,
    pub has_evidence: bool,
    pub has_court: bool,
}
