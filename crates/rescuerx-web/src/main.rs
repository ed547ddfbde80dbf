//! RescueRx API server
//!
//! Run with: cargo run -p rescuerx-web --bin rescuerx-server

use rescuerx_web::{config::RescueConfig, init_tracing, router::build_router, state::AppState};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RescueConfig::load()?;
    init_tracing(&config.logging.filter);
    config.log_origin();

    info!("Starting RescueRx server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let addr: SocketAddr = config.server.bind.parse()?;
    let state = AppState::from_config(config)?;
    info!("Documents: {}", state.context.source().describe());
    info!("Static files: {}", state.config.server.static_dir);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
