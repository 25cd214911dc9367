//! Oracle adapter implementations.

pub mod anthropic_api;
pub mod mock;
pub mod registry;
pub mod rule_based;

pub use anthropic_api::{AnthropicOracle, AnthropicOracleConfig};
pub use mock::{MockOracle, MockResponse};
pub use registry::OracleRegistry;
pub use rule_based::RuleBasedOracle;
