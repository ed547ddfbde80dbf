//! Staged diseases and free-text lookup.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use rescuerx_common::error::{ApiError, RescueError};
use rescuerx_report::{DiseaseEntry, Manifest};
use serde::Deserialize;
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct ResolveQuery {
    pub q: Option<String>,
}

/// Any manifest failure means there is nothing staged to serve.
fn manifest_unavailable(err: RescueError) -> ApiError {
    ApiError::not_found(format!("manifest unavailable: {err}"))
}

pub async fn manifest(State(state): State<SharedState>) -> Result<Json<Manifest>, ApiError> {
    let manifest = state.context.manifest().await.map_err(manifest_unavailable)?;
    Ok(Json(manifest.as_ref().clone()))
}

pub async fn resolve(
    State(state): State<SharedState>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<DiseaseEntry>, ApiError> {
    let q = params.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "query parameter `q` is required"));
    }
    let manifest = state.context.manifest().await.map_err(manifest_unavailable)?;
    manifest
        .resolve(&q)
        .cloned()
        .map(Json)
        .ok_or_else(|| RescueError::NoMatch(q).into())
}
