//! Listener lifecycle: bind, announce, serve.
//!
//! There are two states. A service is *starting* until [`bind`] succeeds and
//! *serving* from then on. Serving only ends if the accept loop fails; there
//! is no shutdown path.

use tokio::net::TcpListener;
use tracing::info;

use crate::{api, config::ListenConfig, error::ServeError, service::Service};

/// Acquire the listener for `config`.
pub async fn bind(config: &ListenConfig) -> Result<TcpListener, ServeError> {
    let addr = config.addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

/// Serve `service` on an already-bound listener.
///
/// Only returns if the underlying accept loop fails.
pub async fn serve(listener: TcpListener, service: Service) -> Result<(), ServeError> {
    axum::serve(listener, api::app(service)).await?;
    Ok(())
}

/// Resolve the port, bind, log the announcement line, and serve forever.
///
/// `configured_port` is the raw `PORT` value, if any. Fails with
/// [`ServeError::InvalidPort`] or [`ServeError::Bind`] before serving.
pub async fn start(service: Service, configured_port: Option<&str>) -> Result<(), ServeError> {
    let config = ListenConfig::new(service, configured_port)?;
    run(config).await
}

/// Bind and serve an already-resolved configuration.
pub async fn run(config: ListenConfig) -> Result<(), ServeError> {
    info!(
        service = %config.service,
        port = config.port,
        "{} starting on port {}",
        config.service.label(),
        config.port
    );

    let listener = bind(&config).await?;
    serve(listener, config.service).await
}
