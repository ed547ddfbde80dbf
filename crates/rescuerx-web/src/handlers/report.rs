//! Report assembly for one disease.

use axum::{
    extract::{Path, State},
    Json,
};
use rescuerx_common::error::ApiError;
use rescuerx_common::models::DiseaseReport;
use crate::state::SharedState;

pub async fn disease_report(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DiseaseReport>, ApiError> {
    let report = state.orchestrator.build_report(&id).await?;
    Ok(Json(report))
}
