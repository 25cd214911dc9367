pub mod action;
pub mod advice;
pub mod config;
pub mod entry;
pub mod life;
pub mod patterns;
pub mod prediction;
pub mod registry;
pub mod stats;
pub mod tier;

pub use action::{ActionDefinition, Category, CategoryDefinition};
pub use advice::AdviceBundle;
pub use config::{Config, LoggingConfig, OracleConfig, OracleProvider, PredictionConfig};
pub use entry::KarmicEntry;
pub use life::{LedgerSnapshot, LifeSnapshot};
pub use patterns::{Dominance, PatternSummary};
pub use prediction::{
    CategoryFrequency, Forecast, OracleMessage, Prediction, PredictionInsights, PredictionKind,
    PredictionResult, PredictionSource,
};
pub use registry::KarmaRegistry;
pub use stats::{KarmaStats, KarmaTrend};
pub use tier::KarmaTier;
