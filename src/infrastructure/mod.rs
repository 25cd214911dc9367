//! Infrastructure layer module
//!
//! Cross-cutting plumbing shared by the engine and its hosts:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
