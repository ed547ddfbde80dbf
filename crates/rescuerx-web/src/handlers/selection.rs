//! The session's current disease selection.

use axum::{
    extract::State,
    Json,
};
use chrono::{DateTime, Utc};
use rescuerx_common::error::ApiError;
use rescuerx_common::models::DiseaseReport;
use rescuerx_report::{Selection, SelectionOutcome};
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub generation: u64,
    pub disease_id: String,
    pub applied_at: DateTime<Utc>,
    pub report: DiseaseReport,
}

impl From<&Selection> for SelectionResponse {
    fn from(sel: &Selection) -> Self {
        Self {
            generation: sel.generation,
            disease_id: sel.disease_id.clone(),
            applied_at: sel.applied_at,
            report: sel.report.as_ref().clone(),
        }
    }
}

/// Resolve free text and make the match the current selection.
pub async fn select(
    State(state): State<SharedState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let entry = state.context.resolve(&req.query).await?;
    info!(query = %req.query, disease_id = %entry.id, "selecting disease");
    match state.session.select(&state.orchestrator, &entry.id).await? {
        SelectionOutcome::Applied(sel) => Ok(Json(SelectionResponse::from(sel.as_ref()))),
        SelectionOutcome::Superseded { generation, latest } => Err(ApiError::conflict(format!(
            "selection {generation} of {} was superseded by selection {latest}",
            entry.id
        ))),
    }
}

pub async fn current_selection(State(state): State<SharedState>) -> Result<Json<SelectionResponse>, ApiError> {
    state
        .session
        .current()
        .map(|sel| Json(SelectionResponse::from(sel.as_ref())))
        .ok_or_else(|| ApiError::not_found("no disease selected"))
}
