//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{AppConfig, UnknownEnvironment};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the running mode.
pub const ENV_MODE: &str = "APP_ENV";
/// Environment variable overriding the listener port.
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("APP_ENV: {0}")]
    Environment(#[from] UnknownEnvironment),
    #[error("PORT: `{0}` is not a valid port")]
    Port(String),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the startup configuration: file (if any), then `APP_ENV` / `PORT`
/// from the process environment, then validation.
pub fn load_from_env(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(mode) = lookup(ENV_MODE) {
        config.environment = mode.parse()?;
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Port(port))?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Environment;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_mode_and_port() {
        let config = apply_env_overrides(
            AppConfig::default(),
            vars(&[("APP_ENV", "production"), ("PORT", "8081")]),
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.listener.port, 8081);
    }

    #[test]
    fn missing_variables_keep_file_values() {
        let mut base = AppConfig::default();
        base.environment = Environment::Test;
        let config = apply_env_overrides(base, vars(&[])).unwrap();
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.listener.port, 4040);
    }

    #[test]
    fn rejects_bad_port() {
        let err = apply_env_overrides(AppConfig::default(), vars(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Port(ref p) if p == "http"));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = apply_env_overrides(AppConfig::default(), vars(&[("APP_ENV", "staging")])).unwrap_err();
        assert!(matches!(err, ConfigError::Environment(_)));
    }

    #[test]
    fn load_config_reports_validation_errors() {
        let dir = std::env::temp_dir().join(format!("api-pipeline-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        fs::write(&path, "[api]\nprefix = \"api\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("api.prefix"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
