//! Rule-based oracle implementation.
//!
//! Composes divinations offline from the per-tier phrase pools, optionally
//! appending the dominant category's insight sentence. Used as the
//! deterministic stand-in when no remote oracle is configured and as the
//! fallback when a remote call fails.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{Oracle, OraclePrompt};

/// Offline oracle drawing from fixed phrase pools.
pub struct RuleBasedOracle {
    rng: Mutex<StdRng>,
}

impl RuleBasedOracle {
    /// Create an oracle seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create an oracle with a fixed seed, for deterministic phrase selection.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RuleBasedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Oracle for RuleBasedOracle {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    async fn is_available(&self) -> DomainResult<bool> {
        Ok(true)
    }

    async fn divine(&self, prompt: &OraclePrompt) -> DomainResult<String> {
        let pool = prompt.tier.foretellings();
        let base = {
            let mut rng = self.rng.lock().await;
            pool[rng.random_range(0..pool.len())]
        };

        let text = match prompt.dominant_category.and_then(|category| category.insight()) {
            Some(insight) => format!("{base} {insight}"),
            None => base.to_string(),
        };

        Ok(text)
    }
}
