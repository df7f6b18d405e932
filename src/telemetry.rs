//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Default directives when `RUST_LOG` is not set
#[must_use]
pub fn default_directives(level: &str) -> String {
    format!("climate_api={level},tower_http={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the config.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
