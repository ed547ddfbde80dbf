//! Print one disease report as JSON.
//!
//! Usage: rescuerx-render <disease>
//!
//! `<disease>` is free text resolved against the manifest ("glio",
//! "breast cancer"); an exact staged id works even without a manifest.

use anyhow::Context;
use rescuerx_web::{config::RescueConfig, init_tracing, state::AppState};
use std::io::Write;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("usage: rescuerx-render <disease>");
    }

    let config = RescueConfig::load()?;
    init_tracing(&config.logging.filter);
    config.log_origin();
    let state = AppState::from_config(config)?;

    let disease_id = match state.context.resolve(&query).await {
        Ok(entry) => {
            info!(query = %query, disease_id = %entry.id, "resolved");
            entry.id
        }
        Err(e) => {
            warn!(query = %query, error = %e, "manifest lookup failed, using the query as the disease id");
            query.trim().to_string()
        }
    };

    let report = state
        .orchestrator
        .build_report(&disease_id)
        .await
        .with_context(|| format!("cannot build report for {disease_id:?}"))?;

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
