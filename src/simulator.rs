//! Fan-out/fan-in execution of mission workers
//!
//! All workers for a mission are spawned before any is awaited, and
//! aggregation waits for every one to reach a terminal state. A single
//! worker's failure (provider error, timeout, panic, dispel) is folded into
//! that worker's result and never aborts its siblings.

use crate::catalog::spec_for;
use crate::error::Error;
use crate::mission::{Mission, Worker, WorkerResult, WorkerStatus};
use crate::provider::ModelProvider;
use crate::types::WorkerId;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;

/// Dispatches workers and collects their settled results
#[derive(Clone)]
pub struct ExecutionSimulator {
    provider: Arc<dyn ModelProvider>,
    worker_timeout: Duration,
    /// Abort handles of in-flight workers, kept so a dispel can cancel them
    /// without blocking the dispatching mission.
    active: Arc<DashMap<WorkerId, AbortHandle>>,
}

impl ExecutionSimulator {
    /// Create a simulator executing through the given provider
    pub fn new(provider: Arc<dyn ModelProvider>, worker_timeout: Duration) -> Self {
        Self {
            provider,
            worker_timeout,
            active: Arc::new(DashMap::new()),
        }
    }

    /// Run `worker_count` workers for a mission and wait for all of them.
    ///
    /// Returns exactly one result per worker; dispatch happens before the
    /// first await, and the join is a barrier over every spawned worker.
    pub async fn run_workers(
        &self,
        mission: &Mission,
        worker_count: u32,
        per_worker_budget: u64,
    ) -> Vec<WorkerResult> {
        let spec = spec_for(mission.pattern);

        let mut handles = Vec::with_capacity(worker_count as usize);
        for index in 0..worker_count {
            let mut worker = Worker::new(
                mission.id,
                spec.assignment(&mission.description, index),
                per_worker_budget,
            );
            worker.status = WorkerStatus::Executing;
            let worker_id = worker.id;

            let provider = Arc::clone(&self.provider);
            let timeout = self.worker_timeout;
            let handle = tokio::spawn(async move { execute_worker(provider, worker, timeout).await });
            self.active.insert(worker_id, handle.abort_handle());
            handles.push((worker_id, handle));
        }

        let (ids, handles): (Vec<WorkerId>, Vec<_>) = handles.into_iter().unzip();
        let settled = futures::future::join_all(handles).await;

        let mut results = Vec::with_capacity(settled.len());
        for (worker_id, outcome) in ids.into_iter().zip(settled) {
            let result = match outcome {
                Ok(result) => result,
                Err(join_error) if join_error.is_cancelled() => {
                    WorkerResult::failed(worker_id, "dispelled")
                }
                Err(join_error) => {
                    tracing::warn!(worker = %worker_id, "worker task panicked: {join_error}");
                    WorkerResult::failed(worker_id, format!("worker panicked: {join_error}"))
                }
            };
            self.active.remove(&worker_id);
            results.push(result);
        }
        results
    }

    /// Cancel every in-flight worker without blocking.
    ///
    /// Dispelled workers settle as failed at their mission's join barrier.
    /// Returns the number of workers cancelled; zero active workers is not
    /// an error.
    pub fn dispel_all(&self) -> usize {
        let mut cancelled = 0;
        self.active.retain(|_, handle| {
            handle.abort();
            cancelled += 1;
            false
        });
        cancelled
    }

    /// Number of workers currently executing
    pub fn active_workers(&self) -> usize {
        self.active.len()
    }
}

async fn execute_worker(
    provider: Arc<dyn ModelProvider>,
    worker: Worker,
    timeout: Duration,
) -> WorkerResult {
    let prompt = format!(
        "You are one worker in a coordinated swarm. Complete this sub-task concisely:\n\n{}",
        worker.assignment
    );

    match tokio::time::timeout(timeout, provider.invoke(&prompt, worker.tokens_allocated)).await {
        Ok(Ok(response)) => WorkerResult::completed(worker.id, response.tokens_used, response.text),
        Ok(Err(error)) => {
            tracing::warn!(worker = %worker.id, "worker execution failed: {error}");
            WorkerResult::failed(worker.id, error.to_string())
        }
        Err(_) => {
            let error = Error::worker_failure(
                worker.id.to_string(),
                format!("execution exceeded {timeout:?}"),
            );
            tracing::warn!("{error}");
            WorkerResult::failed(worker.id, error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternKind;
    use crate::error::Result;
    use crate::provider::{ProviderResponse, SimulatedProvider};
    use crate::types::Priority;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn mission(pattern: PatternKind) -> Mission {
        Mission::new("analyze the ingest pipeline", 1000, Priority::Normal, pattern)
    }

    fn simulator(provider: Arc<dyn ModelProvider>) -> ExecutionSimulator {
        ExecutionSimulator::new(provider, Duration::from_secs(5))
    }

    /// Fails every `fail_every`-th invocation, succeeds otherwise.
    struct FlakyProvider {
        calls: AtomicUsize,
        fail_every: usize,
    }

    #[async_trait]
    impl ModelProvider for FlakyProvider {
        async fn invoke(&self, _prompt: &str, max_tokens: u64) -> Result<ProviderResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call % self.fail_every == 0 {
                return Err(Error::provider("injected failure"));
            }
            Ok(ProviderResponse {
                text: "ok".to_string(),
                tokens_used: max_tokens / 2,
            })
        }

        fn provider_type(&self) -> &str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_all_workers_settle() {
        let sim = simulator(Arc::new(SimulatedProvider::new()));
        let results = sim.run_workers(&mission(PatternKind::Decompose), 4, 100).await;

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.is_success()));
        assert!(results.iter().all(|r| r.tokens_used == 50));
        assert_eq!(sim.active_workers(), 0);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_siblings() {
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
            fail_every: 4,
        });
        let sim = simulator(provider);
        let results = sim.run_workers(&mission(PatternKind::Decompose), 4, 100).await;

        let successes = results.iter().filter(|r| r.is_success()).count();
        let failures = results.iter().filter(|r| !r.is_success()).count();
        assert_eq!(successes, 3);
        assert_eq!(failures, 1);
    }

    #[tokio::test]
    async fn test_stalled_worker_times_out() {
        let provider = Arc::new(SimulatedProvider::new().with_latency(Duration::from_secs(60)));
        let sim = ExecutionSimulator::new(provider, Duration::from_millis(10));
        let results = sim.run_workers(&mission(PatternKind::Broadcast), 1, 100).await;

        assert_eq!(results.len(), 1);
        assert!(!results[0].is_success());
        let reason = results[0].failure.as_deref().unwrap();
        assert!(reason.contains("exceeded"), "got {reason}");
    }

    #[tokio::test]
    async fn test_dispel_cancels_in_flight_workers() {
        let provider = Arc::new(SimulatedProvider::new().with_latency(Duration::from_secs(60)));
        let sim = ExecutionSimulator::new(provider, Duration::from_secs(120));

        let sim_clone = sim.clone();
        let join = tokio::spawn(async move {
            sim_clone
                .run_workers(&mission(PatternKind::Fanout), 4, 100)
                .await
        });

        // Let the workers dispatch before cancelling them.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let cancelled = sim.dispel_all();
        assert_eq!(cancelled, 4);

        let results = join.await.unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| !r.is_success()));
        assert!(results
            .iter()
            .all(|r| r.failure.as_deref() == Some("dispelled")));
    }

    #[tokio::test]
    async fn test_dispel_with_no_active_workers() {
        let sim = simulator(Arc::new(SimulatedProvider::new()));
        assert_eq!(sim.dispel_all(), 0);
    }
}
