//! Tier-based guidance derived from the current karmic standing.

use crate::domain::models::{AdviceBundle, KarmaTier, KarmicEntry};

/// Threshold at which an extremity warning is attached to advice.
const WARNING_THRESHOLD: f64 = 150.0;

/// Stateless advice generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct KarmicAdvisor;

impl KarmicAdvisor {
    /// Create an advisor.
    pub fn new() -> Self {
        Self
    }

    /// Build advice from the running score and the most recent entry.
    ///
    /// General guidance follows the tier the score maps to; the specific
    /// line reacts to the sign of the latest action and is omitted for
    /// neutral actions or an empty ledger; the warning appears only at
    /// score extremes (|score| >= 150).
    pub fn advise(&self, score: f64, most_recent: Option<&KarmicEntry>) -> AdviceBundle {
        let tier = KarmaTier::from_score(score);

        let general = match tier {
            KarmaTier::Enlightened => {
                "Continue walking the path of light. Your example inspires others."
            }
            KarmaTier::Benevolent => {
                "Your kindness is your strength. Trust in the goodness you spread."
            }
            KarmaTier::Neutral => {
                "The balance is delicate. Each choice matters more than you know."
            }
            KarmaTier::Shadowed => {
                "The path to redemption lies in acts of genuine contrition."
            }
            KarmaTier::Corrupted => {
                "Even the darkest soul can find light. Begin with a single act of kindness."
            }
        };

        let specific = most_recent.and_then(|entry| {
            if entry.karma_value < 0.0 {
                Some(
                    "Consider how you might balance your recent actions with acts of kindness."
                        .to_string(),
                )
            } else if entry.karma_value > 0.0 {
                Some("Your recent good deeds create ripples of positive change.".to_string())
            } else {
                None
            }
        });

        let warning = if score <= -WARNING_THRESHOLD {
            Some("The shadows grow darker. Choose your next actions with great care.".to_string())
        } else if score >= WARNING_THRESHOLD {
            Some("Great power brings great responsibility. Use your influence wisely.".to_string())
        } else {
            None
        };

        AdviceBundle {
            general: general.to_string(),
            specific,
            warning,
        }
    }
}
