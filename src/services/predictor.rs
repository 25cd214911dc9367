//! Karmic predictor service.
//!
//! Turns pattern analysis into structured predictions via a fixed rule
//! table, composes cryptic oracle messages from them, and provides the
//! deterministic fallback text used when no external oracle answers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::domain::models::{
    Category, KarmaTier, KarmicEntry, OracleMessage, PatternSummary, Prediction, PredictionKind,
};
use crate::services::analyzer::{PatternAnalyzer, PREDICTION_WINDOW};

/// Flavor phrases the oracle message draws from.
const ORACLE_PHRASES: [&str; 8] = [
    "The threads of fate weave patterns unseen...",
    "Echoes of your choices ripple through time...",
    "The mirror of memory reflects what is to come...",
    "Karmic currents flow toward destiny's shore...",
    "The balance of light and shadow shifts...",
    "Ancient forces respond to your essence...",
    "The cosmic ledger records your journey...",
    "Destiny's hand moves in mysterious ways...",
];

/// Hint used when no prediction rule fired.
const UNCLEAR_FUTURE: &str = "The future remains shrouded in mystery...";

/// Rule-driven prediction generator with a seedable random source.
#[derive(Debug)]
pub struct KarmicPredictor {
    analyzer: PatternAnalyzer,
    rng: StdRng,
}

impl KarmicPredictor {
    /// Create a predictor seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            analyzer: PatternAnalyzer::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a predictor with a fixed seed, for deterministic phrase
    /// selection in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            analyzer: PatternAnalyzer::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Evaluate the rule table over the most recent 20 entries.
    ///
    /// Rules fire independently; several predictions may be returned at
    /// once, in rule-evaluation order.
    pub fn predictions(&self, entries: &[KarmicEntry]) -> Vec<Prediction> {
        let window = PatternAnalyzer::window(entries, PREDICTION_WINDOW);
        let summary = self.analyzer.analyze(window);

        let mut predictions = Vec::new();

        if summary.window_karma > 100.0 {
            predictions.push(Prediction {
                id: Uuid::new_v4(),
                kind: PredictionKind::Favorable,
                probability: 0.8,
                timeframe: "2–5 hours".to_string(),
                description: "A benevolent force will aid you in your journey".to_string(),
                trigger: "high_positive_karma".to_string(),
            });
        } else if summary.window_karma < -100.0 {
            predictions.push(Prediction {
                id: Uuid::new_v4(),
                kind: PredictionKind::Unfavorable,
                probability: 0.7,
                timeframe: "1–3 hours".to_string(),
                description: "Dark forces gather against you".to_string(),
                trigger: "high_negative_karma".to_string(),
            });
        }

        let count = |category: Category| {
            summary
                .category_frequency
                .get(&category)
                .copied()
                .unwrap_or(0)
        };

        if count(Category::Violence) > 3 {
            predictions.push(Prediction {
                id: Uuid::new_v4(),
                kind: PredictionKind::Unfavorable,
                probability: 0.6,
                timeframe: "3–6 hours".to_string(),
                description: "The spirits of the fallen seek retribution".to_string(),
                trigger: "violence_pattern".to_string(),
            });
        }

        if count(Category::Compassion) > 5 {
            predictions.push(Prediction {
                id: Uuid::new_v4(),
                kind: PredictionKind::Favorable,
                probability: 0.7,
                timeframe: "1–4 hours".to_string(),
                description: "A guardian angel watches over you".to_string(),
                trigger: "compassion_pattern".to_string(),
            });
        }

        predictions
    }

    /// Compose a cryptic message from the active predictions.
    ///
    /// The flavor line is drawn from the phrase pool; hint, confidence and
    /// timeframe come from the strongest prediction (ties keep the first in
    /// rule order), or the generic unclear-future values when none fired.
    pub fn generate_message(&mut self, predictions: &[Prediction]) -> OracleMessage {
        let phrase = ORACLE_PHRASES[self.rng.random_range(0..ORACLE_PHRASES.len())];

        let strongest = predictions.iter().fold(None::<&Prediction>, |best, current| {
            match best {
                Some(best) if current.probability > best.probability => Some(current),
                Some(best) => Some(best),
                None => Some(current),
            }
        });

        match strongest {
            Some(prediction) => OracleMessage {
                message: phrase.to_string(),
                hint: prediction.description.clone(),
                confidence: prediction.probability,
                timeframe: prediction.timeframe.clone(),
            },
            None => OracleMessage {
                message: phrase.to_string(),
                hint: UNCLEAR_FUTURE.to_string(),
                confidence: 0.3,
                timeframe: "unknown".to_string(),
            },
        }
    }

    /// Confidence derived from the shape of the analyzed window.
    ///
    /// Base 0.5; +0.2 for more than 3 distinct categories, +0.1 when both
    /// dominance slots are filled, −0.2 when volatility exceeds 50; clamped
    /// to [0.1, 0.9].
    pub fn confidence(&self, summary: &PatternSummary) -> f64 {
        let mut confidence: f64 = 0.5;

        if summary.distinct_categories() > 3 {
            confidence += 0.2;
        }

        if summary.dominance.primary.is_some() && summary.dominance.secondary.is_some() {
            confidence += 0.1;
        }

        if summary.volatility > 50.0 {
            confidence -= 0.2;
        }

        confidence.clamp(0.1, 0.9)
    }

    /// Deterministic fallback divination for a tier.
    ///
    /// Draws one of the tier's three foretelling phrases and appends the
    /// dominant category's insight sentence when one exists.
    pub fn foretell(&mut self, tier: KarmaTier, dominant: Option<Category>) -> String {
        let pool = tier.foretellings();
        let base = pool[self.rng.random_range(0..pool.len())];

        match dominant.and_then(|category| category.insight()) {
            Some(insight) => format!("{base} {insight}"),
            None => base.to_string(),
        }
    }
}

impl Default for KarmicPredictor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::collections::HashMap;

    fn entry(karma_value: f64, category: Category, offset_secs: i64) -> KarmicEntry {
        KarmicEntry {
            id: Uuid::new_v4(),
            action_id: "TEST".to_string(),
            karma_value,
            category,
            description: String::new(),
            context: HashMap::new(),
            timestamp: Utc::now() + Duration::seconds(offset_secs),
            life_id: Uuid::nil(),
        }
    }

    fn repeat_entries(karma_value: f64, category: Category, count: usize) -> Vec<KarmicEntry> {
        (0..count)
            .map(|i| entry(karma_value, category, i as i64))
            .collect()
    }

    #[test]
    fn test_no_rules_fire_on_quiet_window() {
        let predictor = KarmicPredictor::with_seed(1);
        let entries = repeat_entries(5.0, Category::Wisdom, 4); // 20 karma, no thresholds

        assert!(predictor.predictions(&entries).is_empty());
        assert!(predictor.predictions(&[]).is_empty());
    }

    #[test]
    fn test_high_positive_karma_rule() {
        let predictor = KarmicPredictor::with_seed(1);
        let entries = repeat_entries(60.0, Category::Compassion, 2); // 120 karma

        let predictions = predictor.predictions(&entries);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].trigger, "high_positive_karma");
        assert_eq!(predictions[0].kind, PredictionKind::Favorable);
        assert_eq!(predictions[0].probability, 0.8);
        assert_eq!(predictions[0].timeframe, "2–5 hours");
    }

    #[test]
    fn test_high_negative_karma_rule() {
        let predictor = KarmicPredictor::with_seed(1);
        let entries = repeat_entries(-64.0, Category::Treachery, 2); // -128 karma

        let predictions = predictor.predictions(&entries);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].trigger, "high_negative_karma");
        assert_eq!(predictions[0].probability, 0.7);
        assert_eq!(predictions[0].timeframe, "1–3 hours");
    }

    #[test]
    fn test_violence_pattern_rule() {
        let predictor = KarmicPredictor::with_seed(1);
        // Four violence entries, karma kept inside the +-100 band
        let entries = repeat_entries(-20.0, Category::Violence, 4);

        let predictions = predictor.predictions(&entries);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].trigger, "violence_pattern");
        assert_eq!(predictions[0].probability, 0.6);
        assert_eq!(predictions[0].timeframe, "3–6 hours");
        assert_eq!(
            predictions[0].description,
            "The spirits of the fallen seek retribution"
        );
    }

    #[test]
    fn test_compassion_pattern_needs_more_than_five() {
        let predictor = KarmicPredictor::with_seed(1);

        let five = repeat_entries(10.0, Category::Compassion, 5);
        assert!(predictor.predictions(&five).is_empty());

        let six = repeat_entries(10.0, Category::Compassion, 6);
        let predictions = predictor.predictions(&six);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].trigger, "compassion_pattern");
    }

    #[test]
    fn test_multiple_rules_fire_together() {
        let predictor = KarmicPredictor::with_seed(1);
        // Six compassion entries at 60 karma each: window karma 360 and
        // compassion count 6 both cross their thresholds
        let entries = repeat_entries(60.0, Category::Compassion, 6);

        let predictions = predictor.predictions(&entries);
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].trigger, "high_positive_karma");
        assert_eq!(predictions[1].trigger, "compassion_pattern");
    }

    #[test]
    fn test_rules_only_see_the_window() {
        let predictor = KarmicPredictor::with_seed(1);
        // 25 old violence entries followed by 20 quiet ones: the window
        // holds only the quiet tail
        let mut entries = repeat_entries(-20.0, Category::Violence, 25);
        entries.extend(repeat_entries(1.0, Category::Discovery, 20));

        assert!(predictor.predictions(&entries).is_empty());
    }

    #[test]
    fn test_message_copies_strongest_prediction() {
        let mut predictor = KarmicPredictor::with_seed(3);
        let entries = repeat_entries(60.0, Category::Compassion, 6);
        let predictions = predictor.predictions(&entries);

        let message = predictor.generate_message(&predictions);
        assert_eq!(message.confidence, 0.8);
        assert_eq!(message.timeframe, "2–5 hours");
        assert_eq!(message.hint, "A benevolent force will aid you in your journey");
        assert!(ORACLE_PHRASES.contains(&message.message.as_str()));
    }

    #[test]
    fn test_message_tie_keeps_rule_order() {
        let mut predictor = KarmicPredictor::with_seed(3);
        // high_negative_karma (0.7) fires before compassion_pattern (0.7)
        // is impossible simultaneously, so craft the tie directly
        let tied = vec![
            Prediction {
                id: Uuid::new_v4(),
                kind: PredictionKind::Unfavorable,
                probability: 0.7,
                timeframe: "1–3 hours".to_string(),
                description: "Dark forces gather against you".to_string(),
                trigger: "high_negative_karma".to_string(),
            },
            Prediction {
                id: Uuid::new_v4(),
                kind: PredictionKind::Favorable,
                probability: 0.7,
                timeframe: "1–4 hours".to_string(),
                description: "A guardian angel watches over you".to_string(),
                trigger: "compassion_pattern".to_string(),
            },
        ];

        let message = predictor.generate_message(&tied);
        assert_eq!(message.hint, "Dark forces gather against you");
        assert_eq!(message.timeframe, "1–3 hours");
    }

    #[test]
    fn test_message_without_predictions() {
        let mut predictor = KarmicPredictor::with_seed(3);
        let message = predictor.generate_message(&[]);

        assert_eq!(message.hint, UNCLEAR_FUTURE);
        assert_eq!(message.confidence, 0.3);
        assert_eq!(message.timeframe, "unknown");
        assert!(ORACLE_PHRASES.contains(&message.message.as_str()));
    }

    #[test]
    fn test_seeded_messages_are_deterministic() {
        let mut first = KarmicPredictor::with_seed(17);
        let mut second = KarmicPredictor::with_seed(17);

        for _ in 0..5 {
            assert_eq!(
                first.generate_message(&[]).message,
                second.generate_message(&[]).message
            );
        }
    }

    #[test]
    fn test_confidence_adjustments() {
        let predictor = KarmicPredictor::with_seed(1);
        let analyzer = PatternAnalyzer::new();

        // Empty window: no dominance, one category short of the bonus
        let base = predictor.confidence(&analyzer.analyze(&[]));
        assert!((base - 0.5).abs() < 1e-9);

        // Two categories: dominance bonus only
        let window = [
            entry(15.0, Category::Kindness, 0),
            entry(-5.0, Category::Deception, 10),
        ];
        let both = predictor.confidence(&analyzer.analyze(&window));
        assert!((both - 0.6).abs() < 1e-9);

        // Four categories: diversity and dominance bonuses
        let window = [
            entry(15.0, Category::Kindness, 0),
            entry(-5.0, Category::Deception, 10),
            entry(5.0, Category::Wisdom, 20),
            entry(1.4, Category::Discovery, 30),
        ];
        let diverse = predictor.confidence(&analyzer.analyze(&window));
        assert!((diverse - 0.8).abs() < 1e-9);

        // Wild swings: volatility penalty applies
        let window = [
            entry(150.0, Category::Compassion, 0),
            entry(-150.0, Category::Violence, 10),
        ];
        let volatile = predictor.confidence(&analyzer.analyze(&window));
        assert!((volatile - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_stays_clamped() {
        let predictor = KarmicPredictor::with_seed(1);
        let analyzer = PatternAnalyzer::new();

        // Single repeated category with huge swings cannot go below 0.1
        let window = [
            entry(500.0, Category::Violence, 0),
            entry(-500.0, Category::Violence, 10),
            entry(500.0, Category::Violence, 20),
        ];
        let summary = analyzer.analyze(&window);
        let confidence = predictor.confidence(&summary);
        assert!(confidence >= 0.1);
        assert!(confidence <= 0.9);
    }

    #[test]
    fn test_foretell_uses_tier_pool_and_insight() {
        let mut predictor = KarmicPredictor::with_seed(5);

        let text = predictor.foretell(KarmaTier::Corrupted, None);
        assert!(KarmaTier::Corrupted.foretellings().contains(&text.as_str()));

        let text = predictor.foretell(KarmaTier::Shadowed, Some(Category::Greed));
        assert!(text.ends_with("What you take from others, others will take from you..."));
    }
}
