//! Topic labels for debate statements.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    WhyDropped,
    ClinicalData,
    OngoingTrials,
    Mechanism,
    Regulatory,
    BbbPenetration,
    Safety,
    KgSignal,
    FaersData,
    EfficacyGaps,
    Evidence,
}

impl Topic {
    pub fn label(self) -> &'static str {
        match self {
            Topic::WhyDropped => "Why Dropped",
            Topic::ClinicalData => "Clinical Data",
            Topic::OngoingTrials => "Ongoing Trials",
            Topic::Mechanism => "Mechanism",
            Topic::Regulatory => "Regulatory",
            Topic::BbbPenetration => "BBB Penetration",
            Topic::Safety => "Safety",
            Topic::KgSignal => "KG Signal",
            Topic::FaersData => "FAERS Data",
            Topic::EfficacyGaps => "Efficacy Gaps",
            Topic::Evidence => "Evidence",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyword groups, checked in order; the first group with a substring hit
/// wins. Order matters: "trial terminated" is Why Dropped, not Ongoing Trials.
const TOPIC_RULES: &[(Topic, &[&str])] = &[
    (Topic::WhyDropped, &["terminated", "stopped", "business", "abandon"]),
    (Topic::ClinicalData, &["response rate", "pfs", "survival", "phase ii", "remission"]),
    (Topic::OngoingTrials, &["trial", "nct", "recruiting", "2024", "2025", "ongoing"]),
    (Topic::Mechanism, &["mechanism", "pathway", "vascular", "normalize", "target"]),
    (Topic::Regulatory, &["fda", "orphan", "fast track", "designation"]),
    (Topic::BbbPenetration, &["bbb", "brain", "p-gp", "efflux", "penetrat"]),
    (Topic::Safety, &["cardiac", "herg", "toxicity", "safety", "hemorrh"]),
    (Topic::KgSignal, &["kg", "percentile", "graph", "z-score"]),
    (Topic::FaersData, &["faers", "ror", "adverse", "risk signal"]),
    (Topic::EfficacyGaps, &["single-agent", "failed", "guessing", "small n", "underpowered"]),
    // neurotransmitter systems
    (Topic::Mechanism, &["anhedonia", "dopamine", "serotonin", "5-ht"]),
];

/// Classify a fragment by case-insensitive keyword match.
pub fn classify(text: &str) -> Topic {
    let t = text.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| t.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Evidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        // Matches both Why Dropped and Ongoing Trials.
        assert_eq!(classify("The trial was terminated early"), Topic::WhyDropped);
        // Matches both Clinical Data and Ongoing Trials.
        assert_eq!(classify("Phase II trial showed 40% response rate"), Topic::ClinicalData);
    }

    #[test]
    fn test_each_group() {
        assert_eq!(classify("Recruiting in 2025"), Topic::OngoingTrials);
        assert_eq!(classify("Normalizes tumour vasculature"), Topic::Mechanism);
        assert_eq!(classify("Orphan designation granted"), Topic::Regulatory);
        assert_eq!(classify("Poor BBB crossing"), Topic::BbbPenetration);
        assert_eq!(classify("hERG liability"), Topic::Safety);
        assert_eq!(classify("Graph percentile 99"), Topic::KgSignal);
        assert_eq!(classify("Adverse event reports"), Topic::FaersData);
        assert_eq!(classify("Underpowered cohorts"), Topic::EfficacyGaps);
        assert_eq!(classify("Dopamine agonism"), Topic::Mechanism);
        assert_eq!(classify("Cheap and widely available"), Topic::Evidence);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Topic::BbbPenetration.label(), "BBB Penetration");
        assert_eq!(Topic::FaersData.to_string(), "FAERS Data");
    }
}
