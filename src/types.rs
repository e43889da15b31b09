//! Core type definitions for the swarmcoord engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionId(Uuid);

impl MissionId {
    /// Create a new random mission ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a mission ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for MissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a worker within a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(Uuid);

impl WorkerId {
    /// Create a new random worker ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a worker ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority attached to a delegated mission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Background work
    Low,
    /// Default priority
    #[default]
    Normal,
    /// Elevated priority
    High,
    /// Drop-everything priority
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Token accounting for a completed mission
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStats {
    /// Total budget granted to the mission
    pub allocated: u64,
    /// Tokens consumed by successful workers
    pub used: u64,
    /// Tokens left over, `allocated - used` (never negative)
    pub saved: u64,
    /// Percentage of the budget saved, in `[0, 100]`
    pub efficiency_pct: f64,
}

impl TokenStats {
    /// Compute stats from an allocation and the tokens actually consumed.
    ///
    /// A zero budget yields zero efficiency rather than a division by zero.
    pub fn from_usage(allocated: u64, used: u64) -> Self {
        let saved = allocated.saturating_sub(used);
        let efficiency_pct = if allocated > 0 {
            (saved as f64 / allocated as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            allocated,
            used,
            saved,
            efficiency_pct,
        }
    }
}
