//! Liveness scaffolds for the market pipeline and strategy engine.
//!
//! Each binary is a single HTTP listener that answers `GET /health` with a
//! fixed plaintext body. The two differ only in their [`Service`] identity:
//!
//! | Binary            | Default port | Body                       |
//! |-------------------|--------------|----------------------------|
//! | `market-pipeline` | 8080         | `Pipeline service healthy` |
//! | `strategy-engine` | 8081         | `Strategy service healthy` |
//!
//! `PORT` overrides the default. A port that cannot be bound ends the
//! process with a logged error and a non-zero exit status.

pub mod api;
pub mod config;
pub mod error;
pub mod probe;
pub mod server;
pub mod service;
pub mod telemetry;

use anyhow::Context;
use tracing::error;

pub use config::ListenConfig;
pub use error::ServeError;
pub use service::Service;

/// Process entry point shared by both binaries.
///
/// Runs the container healthcheck probe when invoked with `--healthcheck`,
/// otherwise initialises tracing and serves until the listener fails. Only
/// returns on failure; `main` turns the error into exit status 1.
pub async fn run(service: Service) -> anyhow::Result<()> {
    if probe::requested(std::env::args()) {
        let config = ListenConfig::from_env(service)?;
        return probe::check(&probe::health_url(config.port)).await;
    }

    telemetry::init();

    let config = ListenConfig::from_env(service).inspect_err(|e| {
        error!(service = %service, error = %e, "invalid listen configuration");
    })?;

    server::run(config)
        .await
        .inspect_err(|e| error!(service = %service, error = %e, "server terminated"))
        .with_context(|| format!("{service} failed on port {}", config.port))
}
