//! Tracing subscriber setup for hosts.
//!
//! The library crates only emit events; a host calls [`init`] once at startup
//! to print them.

use gnomon_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Installs a global fmt subscriber configured by `config`.
///
/// `RUST_LOG`, when set and valid, takes precedence over `config.filter`.
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one is left in place.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi);

    let installed = match config.format {
        LogFormat::Full => builder.try_init().is_ok(),
        LogFormat::Compact => builder.compact().try_init().is_ok(),
    };
    Ok(installed)
}

/// The filter [`init`] would install.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| configured_filter(&config.filter))
}

fn configured_filter(directive: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::try_new(directive)?)
}
