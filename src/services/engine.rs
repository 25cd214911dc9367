//! Karma engine facade.
//!
//! Owns the ledger behind async locks and coordinates the analyzer,
//! predictor, advisor and the optional oracle collaborator. All mutating
//! operations serialize through a single write lock; `predict` is the only
//! operation that awaits an external call, and it does so without holding
//! any ledger lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::models::{
    AdviceBundle, Category, CategoryFrequency, Forecast, KarmaRegistry, KarmaStats, KarmaTier,
    KarmicEntry, LedgerSnapshot, LifeSnapshot, OracleMessage, PatternSummary, Prediction,
    PredictionInsights, PredictionResult, PredictionSource,
};
use crate::domain::ports::{Oracle, OraclePrompt};
use crate::domain::DomainResult;
use crate::services::advisor::KarmicAdvisor;
use crate::services::analyzer::{PatternAnalyzer, ORACLE_WINDOW, PREDICTION_WINDOW};
use crate::services::ledger::KarmicLedger;
use crate::services::predictor::KarmicPredictor;

/// Default bound on a single oracle divination attempt.
const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 10;

/// How many recent prediction results feed [`KarmaEngine::insights`].
const INSIGHT_WINDOW: usize = 10;

/// Async facade over the karmic ledger and its collaborators.
pub struct KarmaEngine {
    ledger: RwLock<KarmicLedger>,
    predictor: Mutex<KarmicPredictor>,
    advisor: KarmicAdvisor,
    analyzer: PatternAnalyzer,
    oracle: Option<Arc<dyn Oracle>>,
    oracle_timeout: Duration,
    /// Most recent forecast's predictions, replaced wholesale per forecast.
    predictions: RwLock<Vec<Prediction>>,
    /// Ordered log of every forecast message this life.
    messages: RwLock<Vec<OracleMessage>>,
    /// Every `predict` result, across lives.
    history: RwLock<Vec<PredictionResult>>,
}

impl KarmaEngine {
    /// Create an engine with no oracle; `predict` uses the fallback path.
    pub fn new(registry: Arc<KarmaRegistry>) -> Self {
        Self {
            ledger: RwLock::new(KarmicLedger::new(registry)),
            predictor: Mutex::new(KarmicPredictor::new()),
            advisor: KarmicAdvisor::new(),
            analyzer: PatternAnalyzer::new(),
            oracle: None,
            oracle_timeout: Duration::from_secs(DEFAULT_ORACLE_TIMEOUT_SECS),
            predictions: RwLock::new(Vec::new()),
            messages: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Attach an oracle collaborator for `predict`.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn Oracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Seed the predictor's RNG for deterministic flavor text.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.predictor = Mutex::new(KarmicPredictor::with_seed(seed));
        self
    }

    /// Bound the single oracle attempt made by `predict`.
    #[must_use]
    pub fn with_timeout(mut self, oracle_timeout: Duration) -> Self {
        self.oracle_timeout = oracle_timeout;
        self
    }

    /// Record an action against the current life.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::UnknownAction`] for unregistered ids.
    pub async fn record_action(
        &self,
        action_id: &str,
        context: HashMap<String, serde_json::Value>,
    ) -> DomainResult<KarmicEntry> {
        let mut ledger = self.ledger.write().await;
        ledger.record_action(action_id, context)
    }

    /// Aggregate statistics for the current life.
    pub async fn stats(&self) -> KarmaStats {
        self.ledger.read().await.stats()
    }

    /// Entries recorded within the last `days` days.
    pub async fn entries_since(&self, days: u32) -> Vec<KarmicEntry> {
        self.ledger.read().await.entries_since(days)
    }

    /// Analyze the most recent `window` entries (default 20).
    pub async fn analyze(&self, window: Option<usize>) -> PatternSummary {
        let ledger = self.ledger.read().await;
        let window =
            PatternAnalyzer::window(ledger.entries(), window.unwrap_or(PREDICTION_WINDOW));
        self.analyzer.analyze(window)
    }

    /// Run the prediction rule table and compose an oracle message.
    ///
    /// The predictions replace the cached set and the message is appended
    /// to the per-life log.
    pub async fn forecast(&self) -> Forecast {
        let entries = {
            let ledger = self.ledger.read().await;
            ledger.entries().to_vec()
        };

        let (predictions, message) = {
            let mut predictor = self.predictor.lock().await;
            let predictions = predictor.predictions(&entries);
            let message = predictor.generate_message(&predictions);
            (predictions, message)
        };

        *self.predictions.write().await = predictions.clone();
        self.messages.write().await.push(message.clone());

        debug!(
            prediction_count = predictions.len(),
            confidence = message.confidence,
            "forecast generated"
        );

        Forecast {
            predictions,
            message,
        }
    }

    /// Divine a prediction for the most recent `window` entries (default 10).
    ///
    /// Consults the configured oracle once, bounded by the engine timeout;
    /// any failure, timeout or empty reply falls back to the deterministic
    /// tier foretelling. On an empty ledger the last logged oracle message
    /// (or the tier's first pool phrase) is returned instead. This
    /// operation never errors, and it does not hold the ledger lock while
    /// awaiting the oracle.
    pub async fn predict(&self, window: Option<usize>) -> PredictionResult {
        let window = window.unwrap_or(ORACLE_WINDOW);

        // Point-in-time copy; concurrent recordings don't block on the oracle.
        let (entries, tier) = {
            let ledger = self.ledger.read().await;
            (ledger.recent(window).to_vec(), ledger.tier())
        };

        if entries.is_empty() {
            let message = {
                let messages = self.messages.read().await;
                messages.last().map_or_else(
                    || tier.foretellings()[0].to_string(),
                    |last| last.message.clone(),
                )
            };
            let result = PredictionResult {
                id: Uuid::new_v4(),
                message,
                source: PredictionSource::Cached,
                confidence: 0.5,
                pattern_confidence: 0.5,
                tier,
                dominant_category: None,
                generated_at: Utc::now(),
            };
            return self.remember(result).await;
        }

        let summary = self.analyzer.analyze(&entries);
        let dominant = summary.dominance.primary;
        let pattern_confidence = {
            let predictor = self.predictor.lock().await;
            predictor.confidence(&summary)
        };

        let prompt = OraclePrompt {
            tier,
            dominant_category: dominant,
            window_karma: summary.window_karma,
            volatility: summary.volatility,
        };

        if let Some(oracle) = &self.oracle {
            match timeout(self.oracle_timeout, oracle.divine(&prompt)).await {
                Ok(Ok(text)) if !text.trim().is_empty() => {
                    let result = PredictionResult {
                        id: Uuid::new_v4(),
                        message: text.trim().to_string(),
                        source: PredictionSource::Generated,
                        confidence: 0.8,
                        pattern_confidence,
                        tier,
                        dominant_category: dominant,
                        generated_at: Utc::now(),
                    };
                    return self.remember(result).await;
                }
                Ok(Ok(_)) => {
                    warn!(oracle = oracle.name(), "oracle returned empty text, using fallback");
                }
                Ok(Err(error)) => {
                    warn!(
                        oracle = oracle.name(),
                        %error,
                        "oracle divination failed, using fallback"
                    );
                }
                Err(_) => {
                    warn!(
                        oracle = oracle.name(),
                        timeout_secs = self.oracle_timeout.as_secs(),
                        "oracle divination timed out, using fallback"
                    );
                }
            }
        }

        let message = {
            let mut predictor = self.predictor.lock().await;
            predictor.foretell(tier, dominant)
        };
        let result = PredictionResult {
            id: Uuid::new_v4(),
            message,
            source: PredictionSource::RuleBased,
            confidence: 0.6,
            pattern_confidence,
            tier,
            dominant_category: dominant,
            generated_at: Utc::now(),
        };
        self.remember(result).await
    }

    /// Advice for the current standing and latest action.
    pub async fn advise(&self) -> AdviceBundle {
        let ledger = self.ledger.read().await;
        self.advisor.advise(ledger.running_score(), ledger.last_entry())
    }

    /// Close the current life and begin a fresh one.
    ///
    /// Cached predictions and the message log belong to the closed life and
    /// are cleared; the prediction history spans lives and is kept.
    pub async fn reincarnate(&self) -> LifeSnapshot {
        let snapshot = {
            let mut ledger = self.ledger.write().await;
            ledger.reincarnate()
        };
        self.predictions.write().await.clear();
        self.messages.write().await.clear();
        snapshot
    }

    /// Clear the current life's entries without closing it.
    pub async fn reset(&self) {
        {
            let mut ledger = self.ledger.write().await;
            ledger.reset();
        }
        self.predictions.write().await.clear();
        self.messages.write().await.clear();
    }

    /// Durable state of the ledger.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.read().await.snapshot()
    }

    /// Replace the ledger with a previously captured snapshot.
    ///
    /// Cached predictions and messages describe the replaced state and are
    /// cleared.
    pub async fn restore(&self, snapshot: LedgerSnapshot) {
        {
            let mut ledger = self.ledger.write().await;
            let registry = ledger.registry();
            *ledger = KarmicLedger::restore(registry, snapshot);
        }
        self.predictions.write().await.clear();
        self.messages.write().await.clear();
    }

    /// Predictions cached by the most recent forecast.
    pub async fn predictions(&self) -> Vec<Prediction> {
        self.predictions.read().await.clone()
    }

    /// The current life's forecast message log, oldest first.
    pub async fn oracle_messages(&self) -> Vec<OracleMessage> {
        self.messages.read().await.clone()
    }

    /// Summary of the last 10 prediction results.
    pub async fn insights(&self) -> PredictionInsights {
        let history = self.history.read().await;
        if history.is_empty() {
            return PredictionInsights::default();
        }

        let start = history.len().saturating_sub(INSIGHT_WINDOW);
        let recent = &history[start..];

        let average_confidence = recent
            .iter()
            .map(|result| result.pattern_confidence)
            .sum::<f64>()
            / recent.len() as f64;

        // Counts in first-seen order so ranking ties stay stable
        let mut counts: Vec<(Category, usize)> = Vec::new();
        for result in recent {
            if let Some(category) = result.dominant_category {
                match counts.iter_mut().find(|(seen, _)| *seen == category) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((category, 1)),
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let top_categories = counts
            .into_iter()
            .take(3)
            .map(|(category, count)| CategoryFrequency { category, count })
            .collect();

        PredictionInsights {
            average_confidence,
            top_categories,
        }
    }

    /// Running score of the current life.
    pub async fn running_score(&self) -> f64 {
        self.ledger.read().await.running_score()
    }

    /// Tier of the current life.
    pub async fn tier(&self) -> KarmaTier {
        self.ledger.read().await.tier()
    }

    /// Identifier of the current life.
    pub async fn life_id(&self) -> Uuid {
        self.ledger.read().await.life_id()
    }

    /// Number of completed reincarnations.
    pub async fn life_count(&self) -> u32 {
        self.ledger.read().await.life_count()
    }

    /// Snapshots of every completed life, oldest first.
    pub async fn past_lives(&self) -> Vec<LifeSnapshot> {
        self.ledger.read().await.past_lives().to_vec()
    }

    /// Carryover modifier computed by the most recent reincarnation.
    pub async fn carryover_modifier(&self) -> f64 {
        self.ledger.read().await.carryover_modifier()
    }

    async fn remember(&self, result: PredictionResult) -> PredictionResult {
        self.history.write().await.push(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PredictionKind;

    fn engine() -> KarmaEngine {
        KarmaEngine::new(Arc::new(KarmaRegistry::builtin())).with_seed(42)
    }

    async fn record_many(engine: &KarmaEngine, action_id: &str, times: usize) {
        for _ in 0..times {
            engine
                .record_action(action_id, HashMap::new())
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_record_action_rejects_unknown_id() {
        tokio_test::block_on(async {
            let engine = engine();
            let result = engine.record_action("ASCEND", HashMap::new()).await;
            assert!(result.is_err());
            assert_eq!(engine.stats().await.total_actions, 0);
        });
    }

    #[tokio::test]
    async fn test_forecast_caches_predictions_and_logs_message() {
        let engine = engine();
        record_many(&engine, "SAVE_LIFE", 2).await; // 120 karma

        let forecast = engine.forecast().await;
        assert_eq!(forecast.predictions.len(), 1);
        assert_eq!(forecast.predictions[0].kind, PredictionKind::Favorable);

        assert_eq!(engine.predictions().await.len(), 1);
        let messages = engine.oracle_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, forecast.message.message);

        // A later quiet forecast replaces the cache and extends the log
        engine.reset().await;
        record_many(&engine, "LIE", 1).await;
        engine.forecast().await;
        assert!(engine.predictions().await.is_empty());
        assert_eq!(engine.oracle_messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_forecast_caches() {
        let engine = engine();
        record_many(&engine, "DONATE", 15).await;
        engine.forecast().await;

        engine.reset().await;
        assert!(engine.predictions().await.is_empty());
        assert!(engine.oracle_messages().await.is_empty());
        assert_eq!(engine.stats().await.total_actions, 0);
        // Reset is administrative; no life ended
        assert_eq!(engine.life_count().await, 0);
    }

    #[tokio::test]
    async fn test_predict_without_oracle_uses_fallback() {
        let engine = engine();
        record_many(&engine, "KILL_INNOCENT", 2).await; // -300, corrupted

        let result = engine.predict(None).await;
        assert_eq!(result.source, PredictionSource::RuleBased);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.tier, KarmaTier::Corrupted);
        assert_eq!(result.dominant_category, Some(Category::Violence));
        assert!(KarmaTier::Corrupted
            .foretellings()
            .iter()
            .any(|phrase| result.message.starts_with(phrase)));
    }

    #[tokio::test]
    async fn test_predict_on_empty_ledger_returns_cached() {
        let engine = engine();

        let result = engine.predict(None).await;
        assert_eq!(result.source, PredictionSource::Cached);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.pattern_confidence, 0.5);
        assert_eq!(result.tier, KarmaTier::Neutral);
        assert_eq!(
            result.message,
            "The threads of fate remain balanced. Your choices now will determine which path opens before you..."
        );

        // Once a forecast has run, its message becomes the cached text
        engine.forecast().await;
        let logged = engine.oracle_messages().await[0].message.clone();
        let result = engine.predict(None).await;
        assert_eq!(result.source, PredictionSource::Cached);
        assert_eq!(result.message, logged);
    }

    #[tokio::test]
    async fn test_reincarnate_clears_caches_but_keeps_history() {
        let engine = engine();
        record_many(&engine, "HEAL", 3).await;
        engine.forecast().await;
        engine.predict(None).await;

        let closed = engine.reincarnate().await;
        assert_eq!(closed.action_count, 3);
        assert!(engine.predictions().await.is_empty());
        assert!(engine.oracle_messages().await.is_empty());
        assert_eq!(engine.life_count().await, 1);

        // Insights still see the pre-reincarnation prediction
        let insights = engine.insights().await;
        assert_eq!(insights.top_categories.len(), 1);
        assert_eq!(insights.top_categories[0].category, Category::Healing);
    }

    #[tokio::test]
    async fn test_insights_summarize_recent_predictions() {
        let engine = engine();
        assert_eq!(engine.insights().await, PredictionInsights::default());

        record_many(&engine, "STEAL", 2).await;
        engine.predict(None).await;
        engine.predict(None).await;

        let insights = engine.insights().await;
        assert_eq!(insights.top_categories.len(), 1);
        assert_eq!(insights.top_categories[0].category, Category::Greed);
        assert_eq!(insights.top_categories[0].count, 2);
        assert!(insights.average_confidence > 0.0);
    }

    #[tokio::test]
    async fn test_analyze_defaults_to_prediction_window() {
        let engine = engine();
        record_many(&engine, "DONATE", 25).await;

        let summary = engine.analyze(None).await;
        assert_eq!(summary.window_karma, 220.0); // 20 of 25 entries

        let summary = engine.analyze(Some(5)).await;
        assert_eq!(summary.window_karma, 55.0);
    }

    #[tokio::test]
    async fn test_advise_reflects_ledger_state() {
        let engine = engine();
        let advice = engine.advise().await;
        assert!(advice.specific.is_none());

        record_many(&engine, "STEAL", 1).await;
        let advice = engine.advise().await;
        assert!(advice.specific.is_some());
    }

    #[tokio::test]
    async fn test_snapshot_restore_round_trip() {
        let engine = engine();
        record_many(&engine, "FORGIVE", 2).await;
        engine.reincarnate().await;
        record_many(&engine, "HELP_STRANGER", 1).await;
        engine.forecast().await;

        let snapshot = engine.snapshot().await;

        let other = KarmaEngine::new(Arc::new(KarmaRegistry::builtin()));
        other.restore(snapshot.clone()).await;

        assert_eq!(other.running_score().await, 15.0);
        assert_eq!(other.life_count().await, 1);
        assert_eq!(other.past_lives().await.len(), 1);
        assert_eq!(other.snapshot().await, snapshot);
        // Transient state does not travel with the snapshot
        assert!(other.oracle_messages().await.is_empty());
    }
}
