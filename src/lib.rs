//! Samsara - Karmic Ledger and Oracle Engine
//!
//! Samsara keeps a morally weighted ledger of player actions, analyzes the
//! recent pattern of behavior, and turns it into predictions and advice,
//! with an optional external oracle for generated divinations and a
//! reincarnation lifecycle that carries past lives forward.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic, models and ports
//! - **Service Layer** (`services`): Ledger, analysis, prediction, advice
//! - **Adapters Layer** (`adapters`): Oracle implementations behind the port
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use samsara::adapters::oracles::OracleRegistry;
//! use samsara::domain::models::KarmaRegistry;
//! use samsara::infrastructure::config::ConfigLoader;
//! use samsara::services::KarmaEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     samsara::infrastructure::logging::init(&config.logging)?;
//!
//!     let registry = Arc::new(KarmaRegistry::builtin());
//!     let mut engine = KarmaEngine::new(registry);
//!     if let Some(oracle) = OracleRegistry::create_from_config(&config.oracle) {
//!         engine = engine.with_oracle(oracle);
//!     }
//!
//!     engine.record_action("HELP_STRANGER", Default::default()).await?;
//!     let prediction = engine.predict(None).await;
//!     println!("{}", prediction.message);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ActionDefinition, AdviceBundle, Category, CategoryDefinition, Config, Forecast, KarmaRegistry,
    KarmaStats, KarmaTier, KarmaTrend, KarmicEntry, LedgerSnapshot, LifeSnapshot, LoggingConfig,
    OracleConfig, OracleMessage, OracleProvider, PatternSummary, Prediction, PredictionConfig,
    PredictionInsights, PredictionKind, PredictionResult, PredictionSource,
};
pub use domain::ports::{Oracle, OracleFactory, OraclePrompt};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    KarmaEngine, KarmicAdvisor, KarmicLedger, KarmicPredictor, PatternAnalyzer, ORACLE_WINDOW,
    PREDICTION_WINDOW,
};
