//! Oracle registry and factory.

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::{OracleConfig, OracleProvider};
use crate::domain::ports::{Oracle, OracleFactory};

use super::anthropic_api::{AnthropicOracle, AnthropicOracleConfig};
use super::mock::MockOracle;
use super::rule_based::RuleBasedOracle;

/// Registry of available oracles.
pub struct OracleRegistry {
    anthropic_config: Option<AnthropicOracleConfig>,
    rule_seed: Option<u64>,
}

impl OracleRegistry {
    pub fn new() -> Self {
        Self {
            anthropic_config: Some(AnthropicOracleConfig::default()),
            rule_seed: None,
        }
    }

    pub fn with_anthropic_config(mut self, config: AnthropicOracleConfig) -> Self {
        self.anthropic_config = Some(config);
        self
    }

    pub fn with_rule_seed(mut self, seed: u64) -> Self {
        self.rule_seed = Some(seed);
        self
    }

    /// Create an oracle by provider.
    ///
    /// `Disabled` yields no oracle; the engine then always takes the
    /// deterministic fallback path.
    pub fn create_by_provider(&self, provider: OracleProvider) -> Option<Arc<dyn Oracle>> {
        match provider {
            OracleProvider::AnthropicApi => {
                let config = self.anthropic_config.clone().unwrap_or_default();
                // If we can't create the API oracle, fall back to rule-based
                match AnthropicOracle::new(config) {
                    Ok(oracle) => Some(Arc::new(oracle)),
                    Err(_) => Some(self.rule_based()),
                }
            }
            OracleProvider::RuleBased => Some(self.rule_based()),
            OracleProvider::Mock => Some(Arc::new(MockOracle::new())),
            OracleProvider::Disabled => None,
        }
    }

    /// Create an oracle from an `OracleConfig`, resolving the provider name.
    ///
    /// Unknown provider names yield no oracle, with a warning.
    pub fn create_from_config(config: &OracleConfig) -> Option<Arc<dyn Oracle>> {
        let Some(provider) = OracleProvider::from_str(&config.provider) else {
            warn!(provider = %config.provider, "unknown oracle provider, predictions will use fallback");
            return None;
        };

        let registry = Self::new().with_anthropic_config(AnthropicOracleConfig::from(config));
        registry.create_by_provider(provider)
    }

    fn rule_based(&self) -> Arc<dyn Oracle> {
        match self.rule_seed {
            Some(seed) => Arc::new(RuleBasedOracle::with_seed(seed)),
            None => Arc::new(RuleBasedOracle::new()),
        }
    }
}

impl Default for OracleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OracleFactory for OracleRegistry {
    fn create(&self, provider: &str) -> Option<Arc<dyn Oracle>> {
        OracleProvider::from_str(provider).and_then(|p| self.create_by_provider(p))
    }

    fn available_providers(&self) -> Vec<&'static str> {
        vec!["anthropic_api", "rule_based", "mock", "disabled"]
    }
}
