//! rescuerx-web — JSON API over assembled disease reports
//! Provides:
//!   - Disease manifest and free-text resolution
//!   - Per-disease report assembly
//!   - A selection session that drops superseded builds
//!   - Static hosting for the presentation layer

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Structured logging to stderr. RUST_LOG wins over the configured filter.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
