//! Logging setup.

use soxshell_core::config::LoggingConfig;
use soxshell_core::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `config.filter` is used.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Internal(format!("failed to install subscriber: {e}")))
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| Error::Validation(format!("invalid log filter {directives:?}: {e}")))
}
