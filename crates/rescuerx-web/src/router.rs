//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    routing::get,
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    system::health,
    manifest::{manifest, resolve},
    report::disease_report,
    selection::{current_selection, select},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/api/health",                get(health))
        .route("/api/manifest",              get(manifest))
        .route("/api/resolve",               get(resolve))
        .route("/api/diseases/{id}/report",  get(disease_report))
        .route("/api/selection",             get(current_selection).post(select))

        // Presentation layer
        .fallback_service(static_dir)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
