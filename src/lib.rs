//! # Swarmcoord
//!
//! A task-delegation simulation engine built around coordination patterns
//! and token-efficiency tracking.
//!
//! A coordinator accepts a free-text task and a token budget, classifies
//! the task into one of six coordination patterns, sizes a worker swarm,
//! splits the budget across the workers, and fans the sub-tasks out
//! concurrently. Results are aggregated into a per-mission token accounting
//! and folded into a persistent coordinator ledger that drives a rank
//! progression (novice through expert).
//!
//! Workers execute through a pluggable [`ModelProvider`]: the default
//! [`SimulatedProvider`] is deterministic and offline, while
//! [`RemoteProvider`] talks to an OpenRouter-compatible chat-completions
//! API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swarmcoord::{DelegationEngine, DelegationRequest, EngineConfig};
//!
//! #[tokio::main]
//! async fn main() -> swarmcoord::Result<()> {
//!     let engine = DelegationEngine::new(EngineConfig::default());
//!
//!     let report = engine
//!         .delegate_task(DelegationRequest::new(
//!             "Analyze the system architecture",
//!             1000,
//!         ))
//!         .await?;
//!
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod mission;
pub mod provider;
pub mod remote;
pub mod simulator;
pub mod sizing;
pub mod types;

// Re-exports for convenience
pub use aggregate::MissionResult;
pub use catalog::{catalog, spec_for, PatternKind, PatternSpec, DEFAULT_PATTERN};
pub use classify::classify;
pub use config::{EngineConfig, RemoteConfig};
pub use engine::{DelegationEngine, DelegationReport, DelegationRequest, StatusSnapshot};
pub use error::{Error, Result};
pub use ledger::{CoordinatorState, CoordinatorStats, LedgerConfig, Rank, RankThreshold};
pub use mission::{Mission, MissionStatus, Worker, WorkerResult, WorkerStatus};
pub use provider::{ModelProvider, ProviderResponse, SimulatedProvider};
pub use remote::RemoteProvider;
pub use simulator::ExecutionSimulator;
pub use sizing::{allocate_per_worker, size_workforce};
pub use types::{MissionId, Priority, TokenStats, WorkerId};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::catalog::PatternKind;
    pub use crate::config::EngineConfig;
    pub use crate::engine::{DelegationEngine, DelegationRequest, StatusSnapshot};
    pub use crate::error::{Error, Result};
    pub use crate::provider::{ModelProvider, SimulatedProvider};
    pub use crate::types::*;
}

/// Initialize tracing from the `RUST_LOG` environment variable, falling
/// back to `swarmcoord=info`. Safe to call more than once.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("swarmcoord=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
