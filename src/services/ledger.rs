//! Karmic ledger service.
//!
//! The ledger is the single owner of a life's mutable state: the append-only
//! entry log, the running score and tier derived from it, and the history of
//! past lives. All mutations are whole transitions; derived state is
//! recomputed from scratch on every append so no incremental drift can
//! accumulate.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    KarmaRegistry, KarmaStats, KarmaTier, KarmaTrend, KarmicEntry, LedgerSnapshot, LifeSnapshot,
};

/// Number of trailing entries considered for the recent trend.
const TREND_WINDOW: usize = 10;

/// Append-only ledger of karmic entries with derived totals and lifecycle.
#[derive(Debug, Clone)]
pub struct KarmicLedger {
    registry: Arc<KarmaRegistry>,
    entries: Vec<KarmicEntry>,
    running_score: f64,
    tier: KarmaTier,
    life_id: Uuid,
    life_count: u32,
    past_lives: Vec<LifeSnapshot>,
    carryover_modifier: f64,
    last_timestamp: Option<DateTime<Utc>>,
}

impl KarmicLedger {
    /// Create an empty ledger for a fresh life.
    pub fn new(registry: Arc<KarmaRegistry>) -> Self {
        Self {
            registry,
            entries: Vec::new(),
            running_score: 0.0,
            tier: KarmaTier::Neutral,
            life_id: Uuid::new_v4(),
            life_count: 0,
            past_lives: Vec::new(),
            carryover_modifier: 0.0,
            last_timestamp: None,
        }
    }

    /// Record an action, appending an entry and recomputing derived state.
    ///
    /// Fails with `UnknownAction` for unregistered ids, leaving the ledger
    /// untouched. Entry timestamps are clamped to be monotonically
    /// non-decreasing within the ledger.
    pub fn record_action(
        &mut self,
        action_id: &str,
        context: HashMap<String, serde_json::Value>,
    ) -> DomainResult<KarmicEntry> {
        let action = self
            .registry
            .action(action_id)
            .ok_or_else(|| DomainError::UnknownAction(action_id.to_string()))?;

        let category = action.category;
        let description = action.description.clone();
        let karma_value = self.registry.karma_value(action_id)?;

        let now = Utc::now();
        let timestamp = self.last_timestamp.map_or(now, |last| now.max(last));

        let entry = KarmicEntry {
            id: Uuid::new_v4(),
            action_id: action_id.to_string(),
            karma_value,
            category,
            description,
            context,
            timestamp,
            life_id: self.life_id,
        };

        self.entries.push(entry.clone());
        self.last_timestamp = Some(timestamp);
        self.recompute();

        debug!(
            action_id,
            karma_value,
            running_score = self.running_score,
            tier = self.tier.as_str(),
            "recorded karmic action"
        );

        Ok(entry)
    }

    /// Recompute the running score and tier from the full entry log.
    fn recompute(&mut self) {
        self.running_score = self.entries.iter().map(|entry| entry.karma_value).sum();
        self.tier = KarmaTier::from_score(self.running_score);
    }

    /// Summary statistics over the current life.
    pub fn stats(&self) -> KarmaStats {
        let mut category_breakdown: HashMap<_, usize> = HashMap::new();
        for entry in &self.entries {
            *category_breakdown.entry(entry.category).or_default() += 1;
        }

        let recent_karma: f64 = self
            .recent(TREND_WINDOW)
            .iter()
            .map(|entry| entry.karma_value)
            .sum();
        let recent_trend = if recent_karma > 20.0 {
            KarmaTrend::Improving
        } else if recent_karma < -20.0 {
            KarmaTrend::Declining
        } else {
            KarmaTrend::Stable
        };

        KarmaStats {
            total_actions: self.entries.len(),
            positive_actions: self.entries.iter().filter(|e| e.is_positive()).count(),
            negative_actions: self.entries.iter().filter(|e| e.is_negative()).count(),
            neutral_actions: self.entries.iter().filter(|e| e.is_neutral()).count(),
            category_breakdown,
            recent_trend,
            current_score: self.running_score,
            tier: self.tier,
        }
    }

    /// Entries recorded within the last `days` days, in chronological order.
    pub fn entries_since(&self, days: u32) -> Vec<KarmicEntry> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        self.entries
            .iter()
            .filter(|entry| entry.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// Clear entries and derived state without snapshotting.
    ///
    /// Administrative operation, distinct from reincarnation: lives, life
    /// count and the current life id are untouched.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.recompute();
    }

    /// End the current life: snapshot it, then reset into a fresh one.
    ///
    /// Always succeeds; a life with zero actions snapshots `action_count: 0`.
    pub fn reincarnate(&mut self) -> LifeSnapshot {
        let snapshot = LifeSnapshot {
            id: Uuid::new_v4(),
            life_id: self.life_id,
            tier: self.tier,
            final_score: self.running_score,
            action_count: self.entries.len(),
            timestamp: Utc::now(),
        };

        // Scale karma to a reasonable modifier for the next life
        self.carryover_modifier = self.running_score / 1000.0;

        info!(
            life_id = %snapshot.life_id,
            final_score = snapshot.final_score,
            tier = snapshot.tier.as_str(),
            action_count = snapshot.action_count,
            "reincarnating into a new life"
        );

        self.past_lives.push(snapshot.clone());
        self.entries.clear();
        self.recompute();
        self.life_count += 1;
        self.life_id = Uuid::new_v4();

        snapshot
    }

    /// The durable-state view of this ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            entries: self.entries.clone(),
            running_score: self.running_score,
            tier: self.tier,
            life_count: self.life_count,
            past_lives: self.past_lives.clone(),
            life_id: self.life_id,
        }
    }

    /// Rebuild a ledger from a previously stored snapshot.
    pub fn restore(registry: Arc<KarmaRegistry>, snapshot: LedgerSnapshot) -> Self {
        let last_timestamp = snapshot.entries.last().map(|entry| entry.timestamp);
        Self {
            registry,
            entries: snapshot.entries,
            running_score: snapshot.running_score,
            tier: snapshot.tier,
            life_id: snapshot.life_id,
            life_count: snapshot.life_count,
            past_lives: snapshot.past_lives,
            carryover_modifier: 0.0,
            last_timestamp,
        }
    }

    /// Entries of the current life, in chronological order.
    pub fn entries(&self) -> &[KarmicEntry] {
        &self.entries
    }

    /// The most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[KarmicEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// The most recently recorded entry, if any.
    pub fn last_entry(&self) -> Option<&KarmicEntry> {
        self.entries.last()
    }

    pub fn running_score(&self) -> f64 {
        self.running_score
    }

    pub fn tier(&self) -> KarmaTier {
        self.tier
    }

    pub fn life_id(&self) -> Uuid {
        self.life_id
    }

    pub fn life_count(&self) -> u32 {
        self.life_count
    }

    pub fn past_lives(&self) -> &[LifeSnapshot] {
        &self.past_lives
    }

    /// Modifier computed at the last reincarnation (`final_score / 1000`).
    ///
    /// Stored for future use by new-life setup; nothing consumes it yet.
    pub fn carryover_modifier(&self) -> f64 {
        self.carryover_modifier
    }

    /// Shared handle to the registry this ledger validates against.
    pub fn registry(&self) -> Arc<KarmaRegistry> {
        Arc::clone(&self.registry)
    }
}
