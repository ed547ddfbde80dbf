//! The current disease selection.
//!
//! Selecting a disease starts a report build that may take a while. A newer
//! selection supersedes every older one: when an older build finishes late
//! its report is discarded instead of replacing the newer selection.

use chrono::{DateTime, Utc};
use rescuerx_common::error::Result;
use rescuerx_common::models::DiseaseReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use crate::orchestrator::ReportOrchestrator;

/// Handle for one in-flight selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    pub generation: u64,
    pub disease_id: String,
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub generation: u64,
    pub disease_id: String,
    pub applied_at: DateTime<Utc>,
    pub report: Arc<DiseaseReport>,
}

#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    Applied(Arc<Selection>),
    /// A newer selection started while this one was building.
    Superseded { generation: u64, latest: u64 },
}

#[derive(Default)]
pub struct ReportSession {
    generation: AtomicU64,
    current: Mutex<Option<Arc<Selection>>>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a selection. Every earlier ticket becomes stale.
    pub fn begin(&self, disease_id: &str) -> SelectionTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, disease_id, "selection started");
        SelectionTicket { generation, disease_id: disease_id.to_string() }
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Install a finished report if its ticket is still the latest.
    pub fn complete(&self, ticket: SelectionTicket, report: DiseaseReport) -> SelectionOutcome {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let latest = self.latest_generation();
        if ticket.generation != latest {
            info!(
                generation = ticket.generation,
                latest,
                disease_id = %ticket.disease_id,
                "stale selection discarded"
            );
            return SelectionOutcome::Superseded { generation: ticket.generation, latest };
        }
        let selection = Arc::new(Selection {
            generation: ticket.generation,
            disease_id: ticket.disease_id,
            applied_at: Utc::now(),
            report: Arc::new(report),
        });
        *current = Some(Arc::clone(&selection));
        info!(generation = selection.generation, disease_id = %selection.disease_id, "selection applied");
        SelectionOutcome::Applied(selection)
    }

    pub fn current(&self) -> Option<Arc<Selection>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Begin, build and complete a selection in one call.
    pub async fn select(&self, orchestrator: &ReportOrchestrator, disease_id: &str) -> Result<SelectionOutcome> {
        let ticket = self.begin(disease_id);
        let report = orchestrator.build_report(disease_id).await?;
        Ok(self.complete(ticket, report))
    }
}
