//! Karmic entry domain model.
//!
//! Entries are the append-only events of the ledger. They are created only
//! by `record_action`, never mutated, and removed only by a full reset.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::action::Category;

/// One recorded action with its computed score contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarmicEntry {
    /// Unique entry id.
    pub id: Uuid,
    /// Registered action id that produced this entry.
    pub action_id: String,
    /// Weighted karma value, computed once at creation.
    pub karma_value: f64,
    /// Category of the action.
    pub category: Category,
    /// Description copied from the action definition.
    pub description: String,
    /// Opaque caller-supplied metadata.
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    /// Creation time; monotonically non-decreasing within a life.
    pub timestamp: DateTime<Utc>,
    /// Life this entry belongs to.
    pub life_id: Uuid,
}

impl KarmicEntry {
    pub fn is_positive(&self) -> bool {
        self.karma_value > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.karma_value < 0.0
    }

    pub fn is_neutral(&self) -> bool {
        self.karma_value == 0.0
    }
}
