//! Core services: ledger bookkeeping, pattern analysis, prediction,
//! advice and the engine facade that ties them together.

pub mod advisor;
pub mod analyzer;
pub mod engine;
pub mod ledger;
pub mod predictor;

pub use advisor::KarmicAdvisor;
pub use analyzer::{PatternAnalyzer, ORACLE_WINDOW, PREDICTION_WINDOW};
pub use engine::KarmaEngine;
pub use ledger::KarmicLedger;
pub use predictor::KarmicPredictor;
