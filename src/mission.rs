//! Mission and worker data model
//!
//! A mission is one user-submitted unit of work; workers are the units of
//! delegated execution it fans out to. Workers are owned by their mission's
//! execution and never outlive the fold into the mission aggregate.

use crate::catalog::PatternKind;
use crate::types::{MissionId, Priority, WorkerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    /// Created, workers not yet dispatched
    Pending,
    /// Workers are executing
    Running,
    /// All workers settled and the result was aggregated
    Completed,
}

/// One user-submitted unit of work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    /// Unique mission identifier
    pub id: MissionId,
    /// Free-text task description
    pub description: String,
    /// Total token budget for the mission
    pub token_budget: u64,
    /// Mission priority
    pub priority: Priority,
    /// Coordination pattern selected for this mission
    pub pattern: PatternKind,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Current lifecycle state
    pub status: MissionStatus,
}

impl Mission {
    /// Create a new pending mission
    pub fn new(
        description: impl Into<String>,
        token_budget: u64,
        priority: Priority,
        pattern: PatternKind,
    ) -> Self {
        Self {
            id: MissionId::new(),
            description: description.into(),
            token_budget,
            priority,
            pattern,
            created_at: Utc::now(),
            status: MissionStatus::Pending,
        }
    }

    /// Mark workers as dispatched
    pub fn mark_running(&mut self) {
        self.status = MissionStatus::Running;
    }

    /// Mark the mission as completed
    pub fn mark_completed(&mut self) {
        self.status = MissionStatus::Completed;
    }
}

/// Lifecycle of a single worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    /// Allocated but not yet dispatched
    Created,
    /// Currently executing its assignment
    Executing,
    /// Finished with output
    Completed,
    /// Failed, timed out, or was dispelled
    Failed,
}

/// One unit of delegated execution within a mission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier
    pub id: WorkerId,
    /// Mission that owns this worker
    pub mission_id: MissionId,
    /// Sub-task assigned to this worker
    pub assignment: String,
    /// Tokens allocated to this worker
    pub tokens_allocated: u64,
    /// Current lifecycle state
    pub status: WorkerStatus,
}

impl Worker {
    /// Create a new worker for a mission
    pub fn new(mission_id: MissionId, assignment: impl Into<String>, tokens_allocated: u64) -> Self {
        Self {
            id: WorkerId::new(),
            mission_id,
            assignment: assignment.into(),
            tokens_allocated,
            status: WorkerStatus::Created,
        }
    }
}

/// Terminal outcome of one worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResult {
    /// Worker that produced this result
    pub worker_id: WorkerId,
    /// Terminal status: `Completed` or `Failed`
    pub status: WorkerStatus,
    /// Tokens actually consumed; zero for failed workers
    pub tokens_used: u64,
    /// Output text for a completed worker
    pub output: Option<String>,
    /// Failure reason for a failed worker
    pub failure: Option<String>,
}

impl WorkerResult {
    /// Result for a worker that finished its assignment
    pub fn completed(worker_id: WorkerId, tokens_used: u64, output: impl Into<String>) -> Self {
        Self {
            worker_id,
            status: WorkerStatus::Completed,
            tokens_used,
            output: Some(output.into()),
            failure: None,
        }
    }

    /// Result for a worker that failed, timed out, or was dispelled.
    ///
    /// Failed workers are accounted as consuming zero tokens.
    pub fn failed(worker_id: WorkerId, reason: impl Into<String>) -> Self {
        Self {
            worker_id,
            status: WorkerStatus::Failed,
            tokens_used: 0,
            output: None,
            failure: Some(reason.into()),
        }
    }

    /// Whether the worker reached `Completed`
    pub fn is_success(&self) -> bool {
        self.status == WorkerStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_lifecycle() {
        let mut mission = Mission::new("notify the team", 500, Priority::Normal, PatternKind::Broadcast);
        assert_eq!(mission.status, MissionStatus::Pending);
        mission.mark_running();
        assert_eq!(mission.status, MissionStatus::Running);
        mission.mark_completed();
        assert_eq!(mission.status, MissionStatus::Completed);
    }

    #[test]
    fn test_failed_worker_consumes_nothing() {
        let result = WorkerResult::failed(WorkerId::new(), "provider unreachable");
        assert_eq!(result.tokens_used, 0);
        assert!(!result.is_success());
        assert!(result.output.is_none());
    }

    #[test]
    fn test_completed_worker_carries_output() {
        let result = WorkerResult::completed(WorkerId::new(), 42, "done");
        assert!(result.is_success());
        assert_eq!(result.output.as_deref(), Some("done"));
        assert!(result.failure.is_none());
    }
}
