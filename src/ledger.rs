//! Mission history and coordinator progression
//!
//! The ledger owns the bounded mission history, the cumulative coordinator
//! statistics, and the promotion state machine. Rank only ever moves
//! forward: a promotion fires when the mission count crosses a threshold
//! while the running average efficiency clears that rank's floor.

use crate::aggregate::MissionResult;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Coordinator progression rank, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Starting rank
    Novice,
    /// First promotion
    Intermediate,
    /// Second promotion
    Senior,
    /// Terminal rank
    Expert,
}

impl Rank {
    /// The rank after this one, or `None` at the terminal rank
    pub fn next(&self) -> Option<Rank> {
        match self {
            Rank::Novice => Some(Rank::Intermediate),
            Rank::Intermediate => Some(Rank::Senior),
            Rank::Senior => Some(Rank::Expert),
            Rank::Expert => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Novice => "novice",
            Rank::Intermediate => "intermediate",
            Rank::Senior => "senior",
            Rank::Expert => "expert",
        };
        write!(f, "{s}")
    }
}

/// Promotion gate for one rank
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankThreshold {
    /// Rank this gate promotes into
    pub rank: Rank,
    /// Missions completed required for promotion
    pub missions: u64,
    /// Minimum running average efficiency required for promotion
    pub min_avg_efficiency: f64,
}

/// Ledger configuration: history bound and promotion gates
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Maximum retained history entries; oldest evicted beyond this
    pub history_cap: usize,
    /// Promotion gates, in ascending rank order
    pub thresholds: Vec<RankThreshold>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            history_cap: 50,
            thresholds: vec![
                RankThreshold {
                    rank: Rank::Intermediate,
                    missions: 5,
                    min_avg_efficiency: 25.0,
                },
                RankThreshold {
                    rank: Rank::Senior,
                    missions: 20,
                    min_avg_efficiency: 40.0,
                },
                RankThreshold {
                    rank: Rank::Expert,
                    missions: 50,
                    min_avg_efficiency: 60.0,
                },
            ],
        }
    }
}

impl LedgerConfig {
    /// Set the history cap
    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    /// Replace the promotion gates
    pub fn with_thresholds(mut self, thresholds: Vec<RankThreshold>) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn threshold_for(&self, rank: Rank) -> Option<&RankThreshold> {
        self.thresholds.iter().find(|t| t.rank == rank)
    }
}

/// Cumulative coordinator statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CoordinatorStats {
    /// Missions recorded to the ledger
    pub missions_completed: u64,
    /// Tokens saved across all recorded missions
    pub total_tokens_saved: u64,
    /// Running mean of recorded efficiency percentages
    pub average_efficiency: f64,
    /// Workers dispatched across all recorded missions
    pub workers_created: u64,
}

/// Mutable per-coordinator state: rank, stats, and bounded history.
///
/// Not a global: construct one per coordinator instance and serialize
/// mutation externally (the engine holds it behind a mutex).
#[derive(Debug, Clone)]
pub struct CoordinatorState {
    /// Coordinator display name
    pub name: String,
    /// Current rank; monotonically non-decreasing
    pub rank: Rank,
    /// Cumulative statistics
    pub stats: CoordinatorStats,
    history: VecDeque<MissionResult>,
    config: LedgerConfig,
}

impl CoordinatorState {
    /// Create a fresh coordinator at the lowest rank
    pub fn new(name: impl Into<String>, config: LedgerConfig) -> Self {
        Self {
            name: name.into(),
            rank: Rank::Novice,
            stats: CoordinatorStats::default(),
            history: VecDeque::new(),
            config,
        }
    }

    /// Record a completed mission: append to history, fold the stats, and
    /// advance rank if a promotion gate is cleared.
    pub fn record(&mut self, result: &MissionResult) {
        self.history.push_back(result.clone());
        while self.history.len() > self.config.history_cap {
            self.history.pop_front();
        }

        let completed = self.stats.missions_completed + 1;
        self.stats.missions_completed = completed;
        self.stats.total_tokens_saved += result.token_stats.saved;
        self.stats.workers_created += u64::from(result.worker_count);
        // Running mean over every recorded efficiency, including the new one.
        self.stats.average_efficiency +=
            (result.token_stats.efficiency_pct - self.stats.average_efficiency) / completed as f64;

        self.advance_rank();
    }

    fn advance_rank(&mut self) {
        while let Some(next) = self.rank.next() {
            let Some(gate) = self.config.threshold_for(next) else {
                break;
            };
            if self.stats.missions_completed >= gate.missions
                && self.stats.average_efficiency >= gate.min_avg_efficiency
            {
                tracing::info!(coordinator = %self.name, rank = %next, "coordinator promoted");
                self.rank = next;
            } else {
                break;
            }
        }
    }

    /// Most recent mission results, newest first, at most `limit` entries.
    /// A limit of zero yields an empty list.
    pub fn recent(&self, limit: usize) -> Vec<MissionResult> {
        self.history.iter().rev().take(limit).cloned().collect()
    }

    /// Number of retained history entries
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
