//! Logging setup. Logs go to stderr, so they never mix with console lines on stdout.

use crate::error::ReplError;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) -> Result<(), ReplError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| ReplError::Logger { filter: level.to_string(), reason: err.to_string() })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ReplError::Logger { filter: level.to_string(), reason: err.to_string() })
}
