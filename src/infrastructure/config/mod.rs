//! Configuration management
//!
//! Hierarchical configuration using figment: programmatic defaults,
//! project YAML files, then environment overrides, with validation on
//! top of the merged result.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
