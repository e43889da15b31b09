//! Delegation engine: the coordinator service behind the tool surface
//!
//! Ties the pure pieces together: classify a description, size the
//! workforce, allocate tokens, run the workers, aggregate the results, and
//! record the mission to the coordinator ledger. Multiple missions may run
//! concurrently against one engine; ledger mutation is serialized behind a
//! mutex so no update is lost.

use crate::aggregate::{aggregate, MissionResult};
use crate::catalog::{spec_for, PatternKind};
use crate::classify::classify;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::ledger::{CoordinatorState, CoordinatorStats, Rank};
use crate::mission::Mission;
use crate::provider::{ModelProvider, SimulatedProvider};
use crate::simulator::ExecutionSimulator;
use crate::sizing::{allocate_per_worker, size_workforce};
use crate::types::{MissionId, Priority, TokenStats};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to delegate one task to the swarm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationRequest {
    /// Free-text task description
    pub description: String,
    /// Total token budget for the mission
    pub token_budget: u64,
    /// Optional priority, defaults to normal
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Optional pattern override; skips classification when set
    #[serde(default)]
    pub pattern_hint: Option<PatternKind>,
}

impl DelegationRequest {
    /// Create a request with default priority and no pattern hint
    pub fn new(description: impl Into<String>, token_budget: u64) -> Self {
        Self {
            description: description.into(),
            token_budget,
            priority: None,
            pattern_hint: None,
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Force a specific coordination pattern
    pub fn with_pattern_hint(mut self, pattern: PatternKind) -> Self {
        self.pattern_hint = Some(pattern);
        self
    }
}

/// Response returned to the caller after a mission completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationReport {
    /// Mission identifier, usable for status lookups
    pub mission_id: MissionId,
    /// Pattern the mission ran under
    pub pattern: PatternKind,
    /// Workers dispatched
    pub worker_count: u32,
    /// Token accounting for the mission
    pub token_stats: TokenStats,
    /// Human-readable outcome summary
    pub summary: String,
}

/// Snapshot returned by status lookups
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusSnapshot {
    /// Coordinator-level snapshot
    Coordinator {
        /// Coordinator display name
        name: String,
        /// Current rank
        rank: Rank,
        /// Cumulative statistics
        stats: CoordinatorStats,
        /// Workers currently executing
        active_workers: usize,
    },
    /// Single-mission snapshot
    Mission {
        /// The mission
        mission: Mission,
    },
}

/// The task-delegation engine
pub struct DelegationEngine {
    state: Arc<Mutex<CoordinatorState>>,
    missions: DashMap<MissionId, Mission>,
    simulator: ExecutionSimulator,
    config: EngineConfig,
}

impl DelegationEngine {
    /// Create an engine executing through the deterministic simulated
    /// provider. Use [`DelegationEngine::with_provider`] to plug in a real
    /// model client.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_provider(config, Arc::new(SimulatedProvider::new()))
    }

    /// Create an engine executing through the given provider
    pub fn with_provider(config: EngineConfig, provider: Arc<dyn ModelProvider>) -> Self {
        let state = CoordinatorState::new(config.coordinator_name.clone(), config.ledger.clone());
        let simulator = ExecutionSimulator::new(provider, config.worker_timeout);
        Self {
            state: Arc::new(Mutex::new(state)),
            missions: DashMap::new(),
            simulator,
            config,
        }
    }

    /// Delegate a task: classify, size, allocate, execute, aggregate, record.
    ///
    /// Rejects empty descriptions and zero budgets before any worker is
    /// spawned. Worker failures are absorbed into the result counts; a
    /// mission whose workers all fail still completes and is recorded.
    pub async fn delegate_task(&self, request: DelegationRequest) -> Result<DelegationReport> {
        if request.description.trim().is_empty() {
            return Err(Error::invalid_input("task description must not be empty"));
        }
        if request.token_budget == 0 {
            return Err(Error::invalid_input("token budget must be positive"));
        }

        let pattern = request
            .pattern_hint
            .unwrap_or_else(|| classify(&request.description));
        let spec = spec_for(pattern);
        let worker_count = size_workforce(spec, &request.description);
        let per_worker = allocate_per_worker(request.token_budget, spec, worker_count);

        let mut mission = Mission::new(
            request.description,
            request.token_budget,
            request.priority.unwrap_or_default(),
            pattern,
        );
        mission.mark_running();
        self.missions.insert(mission.id, mission.clone());

        tracing::info!(
            mission = %mission.id,
            pattern = %pattern,
            workers = worker_count,
            per_worker_tokens = per_worker,
            "delegating task"
        );

        let worker_results = self
            .simulator
            .run_workers(&mission, worker_count, per_worker)
            .await;
        let result = aggregate(&mission, &worker_results);

        mission.mark_completed();
        self.missions.insert(mission.id, mission);

        {
            let mut state = self.state.lock();
            state.record(&result);
        }

        let summary = format!(
            "Delegated to {} workers using the {} pattern: {} succeeded, {} failed, {:.1}% of the budget saved",
            result.worker_count,
            result.pattern,
            result.successful_workers,
            result.failed_workers,
            result.token_stats.efficiency_pct,
        );
        tracing::info!(mission = %result.mission_id, "{summary}");

        Ok(DelegationReport {
            mission_id: result.mission_id,
            pattern: result.pattern,
            worker_count: result.worker_count,
            token_stats: result.token_stats,
            summary,
        })
    }

    /// Status snapshot: the coordinator when no ID is given, otherwise the
    /// identified mission. Unknown IDs yield [`Error::NotFound`].
    pub fn get_status(&self, mission_id: Option<MissionId>) -> Result<StatusSnapshot> {
        match mission_id {
            Some(id) => {
                let mission = self
                    .missions
                    .get(&id)
                    .map(|entry| entry.value().clone())
                    .ok_or_else(|| Error::not_found(format!("mission {id} not found")))?;
                Ok(StatusSnapshot::Mission { mission })
            }
            None => {
                let state = self.state.lock();
                Ok(StatusSnapshot::Coordinator {
                    name: state.name.clone(),
                    rank: state.rank,
                    stats: state.stats,
                    active_workers: self.simulator.active_workers(),
                })
            }
        }
    }

    /// Completed missions, most recent first. `limit` defaults to the
    /// configured history limit; an explicit zero yields an empty list.
    pub fn list_history(&self, limit: Option<usize>) -> Vec<MissionResult> {
        let limit = limit.unwrap_or(self.config.default_history_limit);
        self.state.lock().recent(limit)
    }

    /// Cancel all in-flight workers without blocking.
    ///
    /// Dispelled workers count as failed in their mission's aggregate.
    /// Always succeeds; returns the number of workers cancelled.
    pub fn dispel_all(&self) -> usize {
        let cancelled = self.simulator.dispel_all();
        if cancelled > 0 {
            tracing::info!(cancelled, "dispelled in-flight workers");
        }
        cancelled
    }

    /// Number of missions this engine has seen, any status
    pub fn mission_count(&self) -> usize {
        self.missions.len()
    }
}
