//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber once at startup
//! - Pick the output format from the running environment
//!
//! # Design Decisions
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured level

use std::path::Path;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, Environment};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(config: &AppConfig) -> String {
    let level = config.observability.log_level.to_ascii_lowercase();
    format!("api_pipeline={level},audit={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init_logging(config: &AppConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);

    match config.environment {
        Environment::Development => registry.with(fmt::layer().pretty()).try_init(),
        Environment::Production => registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(false))
            .try_init(),
        Environment::Test => registry.with(fmt::layer().compact().with_test_writer()).try_init(),
    }
}

/// Record the resolved configuration. Call after [`init_logging`] so the
/// event reaches the installed subscriber.
pub fn log_startup(config: &AppConfig, config_path: Option<&Path>) {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_path = ?config_path,
        environment = %config.environment,
        bind_address = %config.listener.bind_address(),
        prefix = %config.api.prefix,
        "api-pipeline starting"
    );
}
