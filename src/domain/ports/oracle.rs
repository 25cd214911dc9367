//! Oracle port - interface for external text generators.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Category, KarmaTier};

/// Structured prompt handed to an oracle.
///
/// The oracle only ever sees this small summary of the seeker's state; it
/// returns free-form text the engine treats as opaque (trim only).
#[derive(Debug, Clone, PartialEq)]
pub struct OraclePrompt {
    /// Tier at the time of the call.
    pub tier: KarmaTier,
    /// Dominant category of the analyzed window, if any.
    pub dominant_category: Option<Category>,
    /// Karma sum over the analyzed window.
    pub window_karma: f64,
    /// Volatility of the analyzed window.
    pub volatility: f64,
}

impl OraclePrompt {
    /// Render the prompt as the text sent to the oracle.
    pub fn render(&self) -> String {
        let force = self
            .dominant_category
            .map_or("neutral", |category| category.as_str());

        format!(
            "The seeker's karmic essence reveals:\n\
             - Their soul resonates at the {} level\n\
             - Their path is guided by the {} force\n\
             - Their cosmic balance stands at {}\n\
             - Their journey's volatility measures {:.2}\n\n\
             Speak to them of what the threads of fate weave for their future. \
             Be mysterious and poetic, but offer genuine insight about potential \
             consequences of their current path.",
            self.tier.as_str(),
            force,
            self.window_karma,
            self.volatility
        )
    }
}

/// Trait for oracle implementations.
///
/// An oracle is the external collaborator that phrases predictions. Different
/// oracles may call a remote API or compose text offline; the engine treats
/// all of them as a single-attempt text-in/text-out boundary.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Get the oracle provider name.
    fn name(&self) -> &'static str;

    /// Check if the oracle is available and properly configured.
    async fn is_available(&self) -> DomainResult<bool>;

    /// Produce divination text for the given prompt.
    async fn divine(&self, prompt: &OraclePrompt) -> DomainResult<String>;
}

/// Factory for creating oracle instances.
pub trait OracleFactory: Send + Sync {
    /// Create an oracle for the given provider name.
    fn create(&self, provider: &str) -> Option<Arc<dyn Oracle>>;

    /// List available provider names.
    fn available_providers(&self) -> Vec<&'static str>;
}
