//! Tracing setup for the `batchrun` binary.
//!
//! Events go to stderr so stdout stays clean for batch output.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt};

static INIT_RESULT: OnceLock<Result<(), LoggingError>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(String),
}

/// Install the global subscriber. `RUST_LOG` overrides the default level.
///
/// Only the first call installs anything; later calls, from any thread,
/// return that first outcome.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    INIT_RESULT.get_or_init(|| install(verbose)).clone()
}

fn install(verbose: bool) -> Result<(), LoggingError> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| LoggingError::SetGlobal(err.to_string()))?;

    tracing::debug!("Logging initialized");
    Ok(())
}
