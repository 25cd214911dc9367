//! Life snapshot and durable ledger state models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::entry::KarmicEntry;
use crate::domain::models::tier::KarmaTier;

/// Record of a completed life, appended by `reincarnate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeSnapshot {
    /// Unique snapshot id.
    pub id: Uuid,
    /// The life that ended.
    pub life_id: Uuid,
    /// Tier at the moment of reincarnation.
    pub tier: KarmaTier,
    /// Running score at the moment of reincarnation.
    pub final_score: f64,
    /// Number of entries recorded during the life.
    pub action_count: usize,
    /// When the reincarnation happened.
    pub timestamp: DateTime<Utc>,
}

/// The exact durable-state shape an external persistence collaborator
/// stores and restores verbatim.
///
/// Transient state (active predictions, cached oracle messages) is
/// deliberately excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Entries of the current life, in chronological order.
    pub entries: Vec<KarmicEntry>,
    /// Sum of karma values over `entries`.
    pub running_score: f64,
    /// Tier derived from `running_score`.
    pub tier: KarmaTier,
    /// Number of completed reincarnations.
    pub life_count: u32,
    /// Snapshots of completed lives, oldest first.
    pub past_lives: Vec<LifeSnapshot>,
    /// Identifier of the current life.
    pub life_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_shape_is_exactly_six_fields() {
        let snapshot = LedgerSnapshot {
            entries: vec![],
            running_score: 0.0,
            tier: KarmaTier::Neutral,
            life_count: 0,
            past_lives: vec![],
            life_id: Uuid::new_v4(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 6);
        for field in [
            "entries",
            "running_score",
            "tier",
            "life_count",
            "past_lives",
            "life_id",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }
    }

    #[test]
    fn test_snapshot_round_trips() {
        let snapshot = LedgerSnapshot {
            entries: vec![],
            running_score: 135.5,
            tier: KarmaTier::Benevolent,
            life_count: 2,
            past_lives: vec![LifeSnapshot {
                id: Uuid::new_v4(),
                life_id: Uuid::new_v4(),
                tier: KarmaTier::Corrupted,
                final_score: -240.0,
                action_count: 7,
                timestamp: Utc::now(),
            }],
            life_id: Uuid::new_v4(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.life_count, 2);
        assert_eq!(back.past_lives.len(), 1);
        assert_eq!(back.tier, KarmaTier::Benevolent);
    }
}
