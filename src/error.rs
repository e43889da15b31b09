//! Error types for the swarmcoord engine

use thiserror::Error;

/// Result type alias for swarmcoord operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the swarmcoord engine
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input was rejected before any work was dispatched
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Lookup of a mission or resource by ID failed
    #[error("Not found: {0}")]
    NotFound(String),

    /// A single worker's execution failed; recovered locally, never fatal
    #[error("Worker failure: {worker}: {message}")]
    WorkerFailure {
        /// Identifier of the failing worker
        worker: String,
        /// What went wrong
        message: String,
    },

    /// Error from the remote model provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// An operation exceeded its bounded timeout
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a worker-failure error
    pub fn worker_failure(worker: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WorkerFailure {
            worker: worker.into(),
            message: message.into(),
        }
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an other error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
