//! Ledger statistics models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::action::Category;
use crate::domain::models::tier::KarmaTier;

/// Direction of the recent karma trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KarmaTrend {
    Improving,
    Declining,
    #[default]
    Stable,
}

impl KarmaTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

/// Summary statistics over the current life's entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KarmaStats {
    /// Total entries recorded in this life.
    pub total_actions: usize,
    /// Entries with karma value > 0.
    pub positive_actions: usize,
    /// Entries with karma value < 0.
    pub negative_actions: usize,
    /// Entries with karma value exactly 0.
    pub neutral_actions: usize,
    /// Count of entries per category.
    pub category_breakdown: HashMap<Category, usize>,
    /// Trend over the last 10 entries: sum > 20 improving, < −20 declining.
    pub recent_trend: KarmaTrend,
    /// Current running score.
    pub current_score: f64,
    /// Tier derived from the running score.
    pub tier: KarmaTier,
}
