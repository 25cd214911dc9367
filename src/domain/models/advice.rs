//! Advice bundle model.

use serde::{Deserialize, Serialize};

/// Guidance text derived from tier and recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceBundle {
    /// One fixed sentence per tier.
    pub general: String,
    /// Present only when the ledger has entries; reflects the sign of the
    /// most recent entry's karma value, absent when it is exactly 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific: Option<String>,
    /// Present only at score extremes (≤ −150 or ≥ 150).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
