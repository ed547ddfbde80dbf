//! rescuerx-report — Document sources, the disease manifest, and report assembly.
//!
//! ```text
//! DocumentSource ──▶ ReportContext ──▶ ReportOrchestrator ──▶ DiseaseReport
//!   (http/dir/mem)    (manifest cache)   (7 documents, adapters, court)
//! ```

pub mod manifest;
pub mod orchestrator;
pub mod session;
pub mod source;

pub use manifest::{resolve, DiseaseEntry, Manifest};
pub use orchestrator::{assemble_report, DiseaseDocuments, ReportContext, ReportOrchestrator};
pub use session::{ReportSession, Selection, SelectionOutcome, SelectionTicket};
pub use source::{DirSource, DocumentSource, HttpSource, MemorySource};
