//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that deserialize fine but
//! cannot produce a working pipeline. All problems are reported at once.

use axum::http::HeaderValue;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a loaded configuration, returning every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    let prefix = &config.api.prefix;
    if !prefix.starts_with('/') {
        errors.push(ValidationError::new("api.prefix", "must start with '/'"));
    } else if prefix.len() == 1 || prefix.ends_with('/') {
        errors.push(ValidationError::new(
            "api.prefix",
            "must name a path segment and not end with '/'",
        ));
    }

    for origin in &config.cors.allowed_origins {
        if origin.trim().is_empty() {
            errors.push(ValidationError::new("cors.allowed_origins", "origin must not be empty"));
        } else if origin == "*" {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                "use an empty list to allow any origin",
            ));
        } else if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                format!("`{origin}` is not a valid header value"),
            ));
        }
    }

    if config.cors.allow_credentials && config.cors.allowed_origins.is_empty() {
        errors.push(ValidationError::new(
            "cors.allow_credentials",
            "credentials require an explicit origin list",
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than zero"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("`{}` is not one of {}", config.observability.log_level, LOG_LEVELS.join(", ")),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a socket address when metrics are enabled",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
