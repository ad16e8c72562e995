//! Configuration loading.
//!
//! Sources are layered in order, later wins: defaults, TOML file, `PORT`
//! environment variable, command-line override. The result is validated once
//! and never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("PORT={value:?} is not a valid port number")]
    InvalidPort { value: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file into a configuration without validating it.
pub fn load_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the effective configuration from the process environment.
pub fn load_config(
    file: Option<&Path>,
    port_override: Option<u16>,
) -> Result<ServiceConfig, ConfigError> {
    load_config_with_env(file, port_override, |key| std::env::var(key).ok())
}

/// Resolve the effective configuration with an injectable environment lookup.
pub fn load_config_with_env<F>(
    file: Option<&Path>,
    port_override: Option<u16>,
    env: F,
) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match file {
        Some(path) => load_file(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(raw) = env(PORT_ENV) {
        config.listener.port = parse_port(&raw)?;
    }

    if let Some(port) = port_override {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
        value: raw.to_string(),
    })
}
