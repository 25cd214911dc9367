//! Structured logging built on tracing.

use std::io;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::models::config::LoggingConfig;

/// Initialize the global subscriber from logging configuration.
///
/// The configured level is the default directive; `RUST_LOG` still
/// overrides it. Fails if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let default_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    match config.format.as_str() {
        "json" => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stdout)
                .with_target(true)
                .with_filter(env_filter);

            tracing_subscriber::registry()
                .with(stdout_layer)
                .try_init()
                .context("Failed to set global tracing subscriber")?;
        }
        "pretty" => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stdout)
                .with_target(true)
                .with_filter(env_filter);

            tracing_subscriber::registry()
                .with(stdout_layer)
                .try_init()
                .context("Failed to set global tracing subscriber")?;
        }
        other => anyhow::bail!("Invalid log format: {other}"),
    }

    tracing::info!(
        level = %config.level,
        format = %config.format,
        "logger initialized"
    );

    Ok(())
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn};
