// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration loading.
//!
//! An optional TOML file named by `SPINOP_CONFIG`, then environment
//! overrides. Everything has a default, so no file is needed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounts::{AccountType, KubernetesAccountType};
use crate::k8s::{FailOnError, IntOrString, SpinnakerValidation, ValidationSetting};

pub const CONFIG_PATH_ENV: &str = "SPINOP_CONFIG";
pub const LOG_LEVEL_ENV: &str = "SPINOP_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "SPINOP_LOG_JSON";
pub const FREQUENCY_ENV: &str = "SPINOP_VALIDATION_FREQUENCY";
pub const FAIL_ON_ERROR_ENV: &str = "SPINOP_FAIL_ON_ERROR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub logging: LoggingConfig,
    /// Service-wide validation block, same shape as in a SpinnakerService.
    pub validation: SpinnakerValidation,
}

impl CoreConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply overrides from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Some(json) = lookup(LOG_JSON_ENV) {
            self.logging.json = parse_bool(LOG_JSON_ENV, &json)?;
        }
        if let Some(freq) = lookup(FREQUENCY_ENV) {
            let secs: i64 = freq.trim().parse().map_err(|_| invalid(FREQUENCY_ENV, &freq))?;
            self.validation.frequency_seconds = IntOrString::Int(secs);
        }
        if let Some(fail) = lookup(FAIL_ON_ERROR_ENV) {
            self.validation.fail_on_error = FailOnError::from(Some(parse_bool(FAIL_ON_ERROR_ENV, &fail)?));
        }
        Ok(())
    }

    /// Validation policy for `provider`, or the service-wide one when no
    /// provider is named or none matches.
    pub fn validation_policy(&self, provider: Option<&str>) -> ValidationSetting {
        let kubernetes = KubernetesAccountType::default();
        match provider {
            Some(name) if name.eq_ignore_ascii_case(kubernetes.account_type().as_str()) => {
                kubernetes.validation_settings(&self.validation)
            }
            Some(name) => self
                .validation
                .provider(name)
                .cloned()
                .unwrap_or_else(|| self.validation.get_validation_settings()),
            None => self.validation.get_validation_settings(),
        }
    }
}

/// Load configuration from `SPINOP_CONFIG` and the environment.
pub fn load() -> Result<CoreConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => CoreConfig::from_file(Path::new(&path))?,
        _ => CoreConfig::default(),
    };
    config.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
