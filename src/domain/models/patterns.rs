//! Pattern analysis models.
//!
//! Outputs of the pattern analyzer over a window of recent entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::action::Category;

/// Dominant categories within a window.
///
/// `primary` is the most frequent category, `secondary` the second most
/// frequent if any. Ties are broken by first appearance in the window.
/// Both are absent for an empty window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dominance {
    pub primary: Option<Category>,
    pub secondary: Option<Category>,
}

/// Windowed statistics over recent ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Sum of karma values over the window.
    pub window_karma: f64,
    /// Count of entries per category within the window.
    pub category_frequency: HashMap<Category, usize>,
    /// Most frequent categories.
    pub dominance: Dominance,
    /// Population standard deviation of karma values; 0 for windows with
    /// fewer than 2 entries.
    pub volatility: f64,
    /// Consecutive-entry time deltas in seconds (window length − 1).
    pub temporal_gaps: Vec<i64>,
}

impl PatternSummary {
    /// Number of distinct categories touched by the window.
    pub fn distinct_categories(&self) -> usize {
        self.category_frequency.len()
    }
}
