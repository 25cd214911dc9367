//! Prediction and oracle message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::action::Category;
use crate::domain::models::tier::KarmaTier;

/// Direction of a rule-derived prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    Favorable,
    Unfavorable,
    NeutralForetelling,
}

/// A structured, probabilistic forward-looking statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique prediction id.
    pub id: Uuid,
    /// Direction of the prediction.
    pub kind: PredictionKind,
    /// Probability in [0, 1].
    pub probability: f64,
    /// Human-readable timeframe label.
    pub timeframe: String,
    /// Flavor description of the predicted consequence.
    pub description: String,
    /// Label of the rule that fired.
    pub trigger: String,
}

/// Cryptic message composed from the active predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleMessage {
    /// Flavor text drawn from the phrase pool.
    pub message: String,
    /// Hint copied from the strongest prediction, or the generic text.
    pub hint: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Timeframe label, "unknown" when no prediction fired.
    pub timeframe: String,
}

/// How a prediction result's text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// External oracle produced the text.
    Generated,
    /// Deterministic rule-based fallback produced the text.
    RuleBased,
    /// Last-known cached message; no fresh analysis was possible.
    Cached,
}

/// Result of a full `predict` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Unique result id.
    pub id: Uuid,
    /// The divined text.
    pub message: String,
    /// Where the text came from.
    pub source: PredictionSource,
    /// Confidence attached to the source: 0.8 generated, 0.6 rule-based,
    /// 0.5 cached.
    pub confidence: f64,
    /// Confidence derived from the analyzed pattern window.
    pub pattern_confidence: f64,
    /// Tier at the time of the call.
    pub tier: KarmaTier,
    /// Dominant category of the analyzed window, if any.
    pub dominant_category: Option<Category>,
    /// When the result was produced.
    pub generated_at: DateTime<Utc>,
}

/// Category with its occurrence count, for insight rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFrequency {
    pub category: Category,
    pub count: usize,
}

/// Aggregate view over recent prediction results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionInsights {
    /// Mean pattern confidence over the last 10 results; 0 with no history.
    pub average_confidence: f64,
    /// Up to three most common dominant categories, most frequent first.
    pub top_categories: Vec<CategoryFrequency>,
}

/// Rule predictions plus the message composed from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub predictions: Vec<Prediction>,
    pub message: OracleMessage,
}
