//! rescuerx-adapters — Schema adapters for upstream pipeline documents.
//!
//! Each module normalises one document family into the typed model in
//! `rescuerx_common::models`:
//! - `kg`          candidates.json → ranked candidate list
//! - `trials`      trial registry + embedded ongoing-trial lists → trial scan
//! - `faers`       faers_signals.json buckets → FAERS panel
//! - `evidence`    summary / literature / molecular → evidence wall
//! - `verdicts`    verdict_scores.json → verdict cards
//! - `ammunition`  argument fragments for the debate, from every document
//! - `tiers`       investigation tier map
//!
//! Adapters take `Option<&Value>` and never fail.

pub mod ammunition;
pub mod evidence;
pub mod faers;
pub mod kg;
pub mod tiers;
pub mod trials;
pub mod verdicts;

pub use ammunition::{collect_ammunition, AmmunitionPools};
pub use evidence::build_evidence;
pub use faers::build_faers;
pub use kg::build_kg_list;
pub use tiers::{synthesize_tiers, upstream_tiers};
pub use trials::build_trials;
pub use verdicts::build_verdicts;
