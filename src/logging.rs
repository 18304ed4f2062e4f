//! Logging setup wrapping `tracing` initialisation

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "QR_GENERATOR_LOG";
pub const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber writing to stderr. The filter comes from
/// `QR_GENERATOR_LOG` when set, otherwise `default_level`.
///
/// Subsequent calls are ignored.
pub fn init(default_level: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter = filter_for(&level)?;

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

fn filter_for(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}
