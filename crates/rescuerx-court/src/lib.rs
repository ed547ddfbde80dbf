//! rescuerx-court — Adversarial debate and ruling synthesis.
//!
//! Turns the advocate/skeptic fragment pools into a five-turn exchange and a
//! verdict document into the judge's labelled ruling.

pub mod debate;
pub mod judge;
pub mod scorer;
pub mod topic;

pub use debate::{synthesize_debate, synthesize_debate_text};
pub use judge::build_ruling;
pub use scorer::score_fragment;
pub use topic::{classify, Topic};
