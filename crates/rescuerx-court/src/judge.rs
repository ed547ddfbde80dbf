//! The judge's ruling on the top drug.

use rescuerx_common::models::{JudgeLabel, JudgePoint};
use rescuerx_common::probe::{as_number, field, first_truthy, items, text_of};
use rescuerx_common::text::{format_number, safe_string};
use serde_json::Value;

const FAVORABLE_SCORE: f64 = 70.0;
const CONDITIONAL_SCORE: f64 = 50.0;

const ACCEPTED_REMARKS: [&str; 2] = [
    "The court finds this argument materially persuasive and central to the case for repurposing.",
    "This evidence corroborates the broader mechanistic rationale and strengthens the overall case.",
];

const REJECTED_REMARKS: [&str; 2] = [
    "The court finds the Skeptic's objection on this point to be substantiated and material to the risk assessment.",
    "This concern represents a significant barrier that must be addressed before clinical advancement.",
];

fn ruling_text(score: f64) -> (&'static str, &'static str) {
    if score >= FAVORABLE_SCORE {
        ("FAVORABLE", "The evidence strongly supports clinical pursuit.")
    } else if score >= CONDITIONAL_SCORE {
        ("CONDITIONAL", "The evidence warrants further investigation under specific conditions.")
    } else {
        ("UNFAVORABLE", "The evidence is insufficient to justify clinical investment at this time.")
    }
}

fn point(label: JudgeLabel, text: String) -> JudgePoint {
    JudgePoint { label, text }
}

/// Find the verdict for `drug` (case-insensitive exact name match).
fn find_verdict<'a>(doc: &'a Value, drug: &str) -> Option<&'a Value> {
    let target = drug.to_uppercase();
    items(field(doc, "verdicts"))
        .into_iter()
        .find(|v| text_of(first_truthy(v, &["drug_name"])).to_uppercase() == target)
}

/// Labelled ruling for one drug: RULING, up to two EVIDENCE ACCEPTED and
/// two EVIDENCE REJECTED points, CONDITIONS when the drug passes and has next
/// steps, and a FINAL ORDER. Unknown drugs get no ruling.
pub fn build_ruling(verdicts_doc: Option<&Value>, drug: &str) -> Vec<JudgePoint> {
    let Some(v) = verdicts_doc.and_then(|doc| find_verdict(doc, drug)) else {
        return Vec::new();
    };
    let mut points = Vec::new();

    let score = first_truthy(v, &["rescue_score"]).and_then(as_number).unwrap_or(0.0);
    let name = first_truthy(v, &["drug_name"]).map(safe_string).unwrap_or_else(|| drug.to_string());
    let (ruling, rationale) = ruling_text(score);
    points.push(point(
        JudgeLabel::Ruling,
        format!(
            "This court renders a {ruling} verdict on {name} with a rescue score of {}/100. {rationale}",
            format_number(score)
        ),
    ));

    for (strength, remark) in items(field(v, "strengths")).into_iter().zip(ACCEPTED_REMARKS) {
        points.push(point(JudgeLabel::EvidenceAccepted, format!("{}. {remark}", safe_string(strength))));
    }
    for (risk, remark) in items(field(v, "risks")).into_iter().zip(REJECTED_REMARKS) {
        points.push(point(JudgeLabel::EvidenceRejected, format!("{}. {remark}", safe_string(risk))));
    }

    let next_steps: Vec<String> = items(field(v, "next_steps")).into_iter().take(2).map(safe_string).collect();
    if score >= CONDITIONAL_SCORE && !next_steps.is_empty() {
        points.push(point(
            JudgeLabel::Conditions,
            format!(
                "This verdict is contingent on the following: {}. Failure to meet these conditions voids this recommendation.",
                next_steps.join(". ")
            ),
        ));
    }

    let order = text_of(first_truthy(v, &["investment_recommendation", "verdict"]));
    if !order.is_empty() {
        let timeline = match first_truthy(v, &["timeline_estimate"]) {
            Some(t) => format!(" Expected timeline: {}.", safe_string(t)),
            None => String::new(),
        };
        points.push(point(JudgeLabel::FinalOrder, format!("{order}{timeline}")));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rescuerx_test_utils::glioblastoma_verdicts;
    use serde_json::json;

    fn labels(points: &[JudgePoint]) -> Vec<JudgeLabel> {
        points.iter().map(|p| p.label).collect()
    }

    #[test]
    fn test_favorable_ruling_structure() {
        let points = build_ruling(Some(&glioblastoma_verdicts()), "bevacizumab");
        use JudgeLabel::*;
        assert_eq!(
            labels(&points),
            vec![Ruling, EvidenceAccepted, EvidenceAccepted, EvidenceRejected, EvidenceRejected, Conditions, FinalOrder]
        );
        assert_eq!(
            points[0].text,
            "This court renders a FAVORABLE verdict on BEVACIZUMAB with a rescue score of 75/100. \
             The evidence strongly supports clinical pursuit."
        );
        assert_eq!(
            points[1].text,
            "Strong KG signal at the 99th percentile. The court finds this argument materially persuasive \
             and central to the case for repurposing."
        );
        assert_eq!(
            points[5].text,
            "This verdict is contingent on the following: Run a biomarker-selected Phase II. \
             Characterise BBB penetration. Failure to meet these conditions voids this recommendation."
        );
        assert_eq!(
            points[6].text,
            "Fund a biomarker-driven Phase II study Expected timeline: 3-5 years."
        );
    }

    #[test]
    fn test_conditional_ruling_without_timeline() {
        let points = build_ruling(Some(&glioblastoma_verdicts()), "VALPROIC ACID");
        assert!(points[0].text.contains("CONDITIONAL verdict on VALPROIC ACID with a rescue score of 55/100"));
        let last = points.last().unwrap();
        assert_eq!(last.label, JudgeLabel::FinalOrder);
        assert_eq!(last.text, "CONDITIONAL");
    }

    #[test]
    fn test_unfavorable_has_no_conditions() {
        let doc = json!({ "verdicts": [{
            "drug_name": "X1", "rescue_score": 32.5, "next_steps": ["More data"], "risks": ["Weak signal"]
        }] });
        let points = build_ruling(Some(&doc), "x1");
        assert_eq!(labels(&points), vec![JudgeLabel::Ruling, JudgeLabel::EvidenceRejected]);
        assert!(points[0].text.contains("UNFAVORABLE"));
        assert!(points[0].text.contains("32.5/100"));
    }

    #[test]
    fn test_zero_score_verdict_still_ruled() {
        let points = build_ruling(Some(&glioblastoma_verdicts()), "Disulfiram");
        assert_eq!(labels(&points), vec![JudgeLabel::Ruling, JudgeLabel::FinalOrder]);
        assert!(points[0].text.contains("score of 0/100"));
    }

    #[test]
    fn test_no_match() {
        assert!(build_ruling(Some(&glioblastoma_verdicts()), "Aspirin").is_empty());
        assert!(build_ruling(None, "Bevacizumab").is_empty());
        assert!(build_ruling(Some(&json!({})), "").is_empty());
    }
}
