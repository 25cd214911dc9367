use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::{Config, OracleProvider};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Invalid oracle provider: {0}. Must be one of: anthropic_api, rule_based, mock, disabled"
    )]
    InvalidOracleProvider(String),

    #[error("Oracle base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .samsara/config.yaml (project config)
    /// 3. .samsara/local.yaml (project local overrides, optional)
    /// 4. Environment variables (SAMSARA_* prefix, highest priority)
    ///
    /// Configuration is always project-local (pwd/.samsara/) so several
    /// games on one machine keep separate oracles.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            // 1. Programmatic defaults as the base layer
            .merge(Serialized::defaults(Config::default()))
            // 2. Project config
            .merge(Yaml::file(".samsara/config.yaml"))
            // 3. Local overrides (optional, gitignored)
            .merge(Yaml::file(".samsara/local.yaml"))
            // 4. Environment variables win
            .merge(Env::prefixed("SAMSARA_").split("__"))
            .extract()
            .context("Failed to extract merged configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate a loaded configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if OracleProvider::from_str(&config.oracle.provider).is_none() {
            return Err(ConfigError::InvalidOracleProvider(
                config.oracle.provider.clone(),
            ));
        }

        if config.oracle.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.oracle.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.oracle.timeout_secs));
        }

        if config.oracle.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.oracle.max_tokens));
        }

        let known_levels = ["trace", "debug", "info", "warn", "error"];
        if !known_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let known_formats = ["json", "pretty"];
        if !known_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
