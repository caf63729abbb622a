// src/logging.rs
//! Structured logging setup for host applications embedding the crate.
//! Thin wrapper over the `tracing` subscriber registry; library code only
//! ever emits events and never installs a subscriber itself.

use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Environment variable consulted for filter directives.
pub const LOG_FILTER_ENV: &str = "VESTING_WALLET_LOG";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to initialize logging: {0}")]
    Initialization(String),
}

/// Install a global fmt subscriber filtered by `VESTING_WALLET_LOG`
/// (falling back to `default_directives`, e.g. `"vesting_wallet=info"`).
/// Call once at startup; a second call fails.
pub fn init(default_directives: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true).with_level(true));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::Initialization(e.to_string()))
}
