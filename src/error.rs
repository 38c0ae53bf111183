//! Startup failures for the liveness server.
//!
//! Every variant is fatal: nothing retries, nothing falls back to another
//! port. Errors travel up with `?` to the binary, which logs them and exits
//! with a non-zero status.
//!
//! Handlers have no error path, so there is no `IntoResponse` impl here.

use std::net::SocketAddr;

/// The listener could not be acquired or stopped accepting connections.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// `PORT` was set to something that is not a port in `1..=65535`.
    #[error("invalid port `{value}`: {reason}")]
    InvalidPort { value: String, reason: String },

    /// The OS refused the bind (address in use, permission denied, ...).
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop returned an error after a successful bind.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
