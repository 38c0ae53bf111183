//! Listen configuration for a liveness service.
//!
//! The environment is read exactly once, at startup, and turned into a
//! [`ListenConfig`] that is passed by value into the server. Nothing reads
//! `PORT` after that.
//!
//! ```text
//! PORT=9090 market-pipeline     # listens on 0.0.0.0:9090
//! PORT=     strategy-engine     # empty, listens on the default 0.0.0.0:8081
//! ```

use std::net::{Ipv4Addr, SocketAddr};

use crate::{error::ServeError, service::Service};

/// Environment variable that overrides the default listen port.
pub const PORT_ENV: &str = "PORT";

/// Where a service listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenConfig {
    pub service: Service,
    pub port: u16,
}

impl ListenConfig {
    /// Build the configuration from the process environment.
    pub fn from_env(service: Service) -> Result<Self, ServeError> {
        let raw = std::env::var(PORT_ENV).ok();
        Self::new(service, raw.as_deref())
    }

    /// Build the configuration from an optional port override.
    pub fn new(service: Service, configured_port: Option<&str>) -> Result<Self, ServeError> {
        let port = resolve_port(configured_port, service.default_port())?;
        Ok(Self { service, port })
    }

    /// Socket address the listener binds: every IPv4 interface.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Pick the listen port from an optional override.
///
/// `None` and `Some("")` fall back to `default`. Anything else is taken
/// verbatim and must parse as a port in `1..=65535`; surrounding whitespace
/// is not stripped.
pub fn resolve_port(configured: Option<&str>, default: u16) -> Result<u16, ServeError> {
    let value = match configured {
        None | Some("") => return Ok(default),
        Some(v) => v,
    };

    let invalid = |reason: String| ServeError::InvalidPort {
        value: value.to_string(),
        reason,
    };

    match value.parse::<u16>() {
        Ok(0) => Err(invalid("port must be between 1 and 65535".into())),
        Ok(port) => Ok(port),
        Err(e) => Err(invalid(e.to_string())),
    }
}
