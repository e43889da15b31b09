//! Aggregation of worker results into a mission record

use crate::catalog::PatternKind;
use crate::mission::{Mission, WorkerResult};
use crate::types::{MissionId, TokenStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only aggregate of one completed mission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionResult {
    /// Mission this aggregate describes
    pub mission_id: MissionId,
    /// Coordination pattern that ran the mission
    pub pattern: PatternKind,
    /// Number of workers dispatched
    pub worker_count: u32,
    /// Workers that reached `Completed`
    pub successful_workers: u32,
    /// Workers that failed, timed out, or were dispelled
    pub failed_workers: u32,
    /// Token accounting for the mission
    pub token_stats: TokenStats,
    /// When aggregation finished
    pub completed_at: DateTime<Utc>,
}

/// Fold settled worker results into the mission aggregate.
///
/// Tokens are summed over successful workers only; failed workers are
/// accounted as consuming nothing. Efficiency is the saved share of the
/// budget, never negative, and zero when the budget itself is zero.
pub fn aggregate(mission: &Mission, results: &[WorkerResult]) -> MissionResult {
    let successful_workers = results.iter().filter(|r| r.is_success()).count() as u32;
    let failed_workers = results.len() as u32 - successful_workers;
    let used: u64 = results
        .iter()
        .filter(|r| r.is_success())
        .map(|r| r.tokens_used)
        .sum();

    MissionResult {
        mission_id: mission.id,
        pattern: mission.pattern,
        worker_count: results.len() as u32,
        successful_workers,
        failed_workers,
        token_stats: TokenStats::from_usage(mission.token_budget, used),
        completed_at: Utc::now(),
    }
}
