//! Karma tier domain model.
//!
//! The tier is the five-level qualitative band derived from the running
//! score. It is always recomputed from the total, never adjusted
//! incrementally.

use serde::{Deserialize, Serialize};

/// Qualitative karma band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KarmaTier {
    Enlightened,
    Benevolent,
    #[default]
    Neutral,
    Shadowed,
    Corrupted,
}

impl KarmaTier {
    /// Derive the tier from a total score.
    ///
    /// Thresholds: score ≥ 200 enlightened, 100 ≤ score < 200 benevolent,
    /// −100 < score < 100 neutral, −200 < score ≤ −100 shadowed,
    /// score ≤ −200 corrupted.
    pub fn from_score(score: f64) -> Self {
        if score >= 200.0 {
            Self::Enlightened
        } else if score >= 100.0 {
            Self::Benevolent
        } else if score <= -200.0 {
            Self::Corrupted
        } else if score <= -100.0 {
            Self::Shadowed
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enlightened => "enlightened",
            Self::Benevolent => "benevolent",
            Self::Neutral => "neutral",
            Self::Shadowed => "shadowed",
            Self::Corrupted => "corrupted",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enlightened" => Some(Self::Enlightened),
            "benevolent" => Some(Self::Benevolent),
            "neutral" => Some(Self::Neutral),
            "shadowed" => Some(Self::Shadowed),
            "corrupted" => Some(Self::Corrupted),
            _ => None,
        }
    }

    /// Foretelling phrases the rule-based oracle draws from for this tier.
    pub fn foretellings(&self) -> [&'static str; 3] {
        match self {
            Self::Enlightened => [
                "The light within you shines so brightly that even the stars pause to witness your journey. A great blessing approaches...",
                "Your compassion has awakened ancient forces of benevolence. They prepare to aid you in ways unseen...",
                "The cosmic scales tip in your favor. A guardian of light watches over your path...",
            ],
            Self::Benevolent => [
                "Your kindness echoes through the realms. Good fortune flows toward you like a gentle stream...",
                "The spirits of the land recognize your gentle heart. They will reveal hidden paths to you...",
                "Your positive karma attracts benevolent energies. Expect unexpected help from strangers...",
            ],
            Self::Neutral => [
                "The threads of fate remain balanced. Your choices now will determine which path opens before you...",
                "The cosmic winds are still. This is a moment of potential - choose wisely...",
                "Destiny's hand hovers, waiting for your next action to reveal its direction...",
            ],
            Self::Shadowed => [
                "Dark clouds gather on your horizon. The consequences of past actions begin to manifest...",
                "The shadows you've cast return to you. Be prepared for challenges ahead...",
                "Karmic debts come due. The universe seeks balance through trials...",
            ],
            Self::Corrupted => [
                "The darkness within you calls to forces of chaos. They hunt you now...",
                "Your negative karma has awakened ancient evils. They answer with malevolent intent...",
                "The cosmic balance demands retribution. Prepare for the storm that approaches...",
            ],
        }
    }
}
