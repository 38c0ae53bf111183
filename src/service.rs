//! Identity of the deployable services.
//!
//! Both binaries run the same liveness server; a [`Service`] is the only thing
//! that tells them apart.

/// One of the independently deployed liveness processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Market data pipeline scaffold (`market-pipeline`, default port 8080).
    MarketPipeline,
    /// Strategy engine scaffold (`strategy-engine`, default port 8081).
    StrategyEngine,
}

impl Service {
    /// Port used when `PORT` is unset or empty.
    pub const fn default_port(self) -> u16 {
        match self {
            Self::MarketPipeline => 8080,
            Self::StrategyEngine => 8081,
        }
    }

    /// Plaintext body returned by `GET /health`.
    pub const fn health_body(self) -> &'static str {
        match self {
            Self::MarketPipeline => "Pipeline service healthy",
            Self::StrategyEngine => "Strategy service healthy",
        }
    }

    /// Human-facing label used in log lines, e.g. "Pipeline service".
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarketPipeline => "Pipeline service",
            Self::StrategyEngine => "Strategy service",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MarketPipeline => "market-pipeline",
            Self::StrategyEngine => "strategy-engine",
        })
    }
}
