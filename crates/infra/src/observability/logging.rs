//! Tracing subscriber setup.

use hrcal_domain::{HrCalError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG` when set, else from `config.filter`.
///
/// # Errors
/// Returns `HrCalError::Config` when the configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| HrCalError::Config(format!("Invalid log filter '{}': {}", config.filter, e))),
    }
}

/// Install the global subscriber: plain or JSON lines on stderr.
///
/// # Errors
/// Returns `HrCalError::Config` for an invalid filter and
/// `HrCalError::Internal` when a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).try_init()
    };

    installed.map_err(|e| HrCalError::Internal(format!("tracing already initialized: {}", e)))
}
