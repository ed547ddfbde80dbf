//! Debate ammunition: raw argument fragments for each side of the court.
//!
//! Every document family carries some pre-written arguments, under
//! different keys depending on the pipeline that produced it.

use rescuerx_common::probe::{entries, field, first_truthy, items};
use rescuerx_common::text::safe_string;
use serde_json::Value;
use std::collections::HashSet;

/// Fragments this short carry no argument.
const MIN_FRAGMENT_CHARS: usize = 5;

/// Verdicts whose strengths and risks join the debate.
const VERDICTS_CONSULTED: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmmunitionPools {
    pub advocate: Vec<String>,
    pub skeptic: Vec<String>,
}

#[derive(Default)]
struct Collector<'a> {
    advocate: Vec<&'a Value>,
    skeptic: Vec<&'a Value>,
}

impl<'a> Collector<'a> {
    /// Lists are spread, truthy scalars appended.
    fn advocate(&mut self, value: Option<&'a Value>) {
        self.advocate.extend(items(value));
    }

    fn skeptic(&mut self, value: Option<&'a Value>) {
        self.skeptic.extend(items(value));
    }

    /// `advocate_ammunition` / `skeptic_ammunition` of one object.
    fn both_sides(&mut self, obj: &'a Value) {
        self.advocate(field(obj, "advocate_ammunition"));
        self.skeptic(field(obj, "skeptic_ammunition"));
    }

    /// Like [`Self::both_sides`], but each truthy value stays one fragment
    /// even when it is a list.
    fn both_sides_whole(&mut self, obj: &'a Value) {
        self.advocate.extend(first_truthy(obj, &["advocate_ammunition"]));
        self.skeptic.extend(first_truthy(obj, &["skeptic_ammunition"]));
    }

    /// Strategic notes: court considerations go to the skeptic.
    fn strategic_notes(&mut self, doc: &'a Value) {
        if let Some(notes) = first_truthy(doc, &["strategic_notes"]) {
            self.both_sides_whole(notes);
            self.skeptic.extend(first_truthy(notes, &["court_considerations"]));
        }
    }

    fn finish(self) -> AmmunitionPools {
        AmmunitionPools {
            advocate: dedupe(self.advocate),
            skeptic: dedupe(self.skeptic),
        }
    }
}

fn dedupe(raw: Vec<&Value>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(safe_string)
        .filter(|s| s.chars().count() > MIN_FRAGMENT_CHARS)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Gather advocate and skeptic fragments from every available document.
pub fn collect_ammunition(
    summary: Option<&Value>,
    literature: Option<&Value>,
    faers: Option<&Value>,
    molecular: Option<&Value>,
    verdicts: Option<&Value>,
) -> AmmunitionPools {
    let mut c = Collector::default();

    if let Some(recs) = summary.and_then(|s| field(s, "court_recommendations")) {
        c.both_sides(recs);
    }

    if let Some(lit) = literature {
        c.strategic_notes(lit);
        for (_, d) in entries(field(lit, "results")) {
            c.advocate(field(d, "strengths"));
            c.skeptic(field(d, "weaknesses"));
        }
    }

    if let Some(f) = faers {
        c.strategic_notes(f);
        for (_, d) in entries(field(f, "repurposing_candidates")).filter(|(_, d)| d.is_object()) {
            c.both_sides(d);
        }
        c.advocate.extend(first_truthy(f, &["advocate_summary"]));
        c.skeptic.extend(first_truthy(f, &["skeptic_summary"]));
    }

    if let Some(mol) = molecular {
        c.both_sides_whole(mol);
        for (_, d) in entries(field(mol, "results")) {
            c.advocate(field(d, "advantages"));
            c.skeptic(field(d, "disadvantages"));
        }
    }

    if let Some(vs) = verdicts {
        for v in items(field(vs, "verdicts")).into_iter().take(VERDICTS_CONSULTED) {
            c.advocate(field(v, "strengths"));
            c.skeptic(field(v, "risks"));
        }
        if let Some(notes) = field(vs, "dissenting_notes") {
            c.advocate(field(notes, "disagreement_with_skeptic"));
            c.skeptic(field(notes, "disagreement_with_advocate"));
        }
    }

    if let Some(sum) = summary {
        for (_, d) in entries(field(sum, "evidence_per_drug")) {
            c.both_sides(d);
            c.advocate(field(d, "strengths"));
            c.skeptic(field(d, "weaknesses"));
        }
    }

    c.finish()
}
