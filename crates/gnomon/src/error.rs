//! Error types for the Gnomon facade.

use thiserror::Error;

/// Result type for Gnomon host operations.
pub type Result<T> = std::result::Result<T, SubstrateError>;

/// Errors raised while assembling a [`Substrate`](crate::Substrate) from configuration.
#[derive(Debug, Error)]
pub enum SubstrateError {
    /// The configuration failed its own consistency checks.
    #[error("invalid configuration: {0}")]
    Config(#[from] gnomon_config::ConfigError),

    /// `clock.fixed_time` is not an RFC 3339 instant.
    #[error("invalid clock.fixed_time: {0}")]
    FixedTime(#[from] gnomon_time::ParseError),

    /// `logging.filter` is not a valid `tracing` filter directive.
    #[error("invalid logging.filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
}
