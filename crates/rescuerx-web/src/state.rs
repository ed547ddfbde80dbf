//! Shared application state for the web server.

use rescuerx_report::{DocumentSource, ReportContext, ReportOrchestrator, ReportSession};
use std::sync::Arc;

use crate::config::RescueConfig;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: RescueConfig,
    pub context: Arc<ReportContext>,
    pub orchestrator: ReportOrchestrator,
    pub session: ReportSession,
}

impl AppState {
    pub fn new(config: RescueConfig, source: Arc<dyn DocumentSource>) -> Self {
        let context = Arc::new(ReportContext::new(source));
        let orchestrator = ReportOrchestrator::new(Arc::clone(&context));
        Self { config, context, orchestrator, session: ReportSession::new() }
    }

    /// State backed by the document source the config names.
    pub fn from_config(config: RescueConfig) -> anyhow::Result<Self> {
        let source = config.data.build_source()?;
        Ok(Self::new(config, source))
    }
}

pub type SharedState = Arc<AppState>;
