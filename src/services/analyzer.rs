//! Pattern analyzer service.
//!
//! Pure windowed statistics over ledger entries: karma sum, category
//! frequency and dominance, volatility, and temporal gaps. The analyzer
//! holds no state and never fails; degenerate windows produce well-defined
//! zero/absent values.

use std::collections::HashMap;

use crate::domain::models::{Category, Dominance, KarmicEntry, PatternSummary};

/// Window size for the prediction rule table.
pub const PREDICTION_WINDOW: usize = 20;

/// Window size for the oracle and advice paths.
pub const ORACLE_WINDOW: usize = 10;

/// Service computing windowed statistics over karmic entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a window of entries.
    pub fn analyze(&self, window: &[KarmicEntry]) -> PatternSummary {
        let window_karma: f64 = window.iter().map(|entry| entry.karma_value).sum();

        // Counts in first-seen order so dominance ties resolve deterministically
        let mut ordered_counts: Vec<(Category, usize)> = Vec::new();
        for entry in window {
            match ordered_counts
                .iter_mut()
                .find(|(category, _)| *category == entry.category)
            {
                Some((_, count)) => *count += 1,
                None => ordered_counts.push((entry.category, 1)),
            }
        }

        let category_frequency: HashMap<Category, usize> =
            ordered_counts.iter().copied().collect();

        // Stable sort keeps first-seen order among equal counts
        let mut ranked = ordered_counts;
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let dominance = Dominance {
            primary: ranked.first().map(|(category, _)| *category),
            secondary: ranked.get(1).map(|(category, _)| *category),
        };

        let volatility = Self::volatility(window);

        let temporal_gaps = window
            .windows(2)
            .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_seconds())
            .collect();

        PatternSummary {
            window_karma,
            category_frequency,
            dominance,
            volatility,
            temporal_gaps,
        }
    }

    /// Population standard deviation of karma values; 0 for fewer than 2
    /// entries.
    fn volatility(window: &[KarmicEntry]) -> f64 {
        if window.len() < 2 {
            return 0.0;
        }

        let n = window.len() as f64;
        let mean = window.iter().map(|entry| entry.karma_value).sum::<f64>() / n;
        let variance = window
            .iter()
            .map(|entry| (entry.karma_value - mean).powi(2))
            .sum::<f64>()
            / n;
        variance.sqrt()
    }

    /// The most recent `size` entries of a slice, oldest first.
    pub fn window(entries: &[KarmicEntry], size: usize) -> &[KarmicEntry] {
        let start = entries.len().saturating_sub(size);
        &entries[start..]
    }
}
