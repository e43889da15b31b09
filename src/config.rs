//! Configuration types for the swarmcoord engine

use crate::error::{Error, Result};
use crate::ledger::LedgerConfig;
use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Engine-level configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Display name of the coordinating agent
    pub coordinator_name: String,
    /// Default number of entries returned by history listings
    pub default_history_limit: usize,
    /// Bounded timeout applied to each worker execution
    pub worker_timeout: Duration,
    /// History cap and rank promotion thresholds
    pub ledger: LedgerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coordinator_name: "coordinator".to_string(),
            default_history_limit: 10,
            worker_timeout: Duration::from_secs(30),
            ledger: LedgerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coordinator display name
    pub fn with_coordinator_name(mut self, name: impl Into<String>) -> Self {
        self.coordinator_name = name.into();
        self
    }

    /// Set the default history listing limit
    pub fn with_default_history_limit(mut self, limit: usize) -> Self {
        self.default_history_limit = limit;
        self
    }

    /// Set the per-worker execution timeout
    pub fn with_worker_timeout(mut self, timeout: Duration) -> Self {
        self.worker_timeout = timeout;
        self
    }

    /// Set the ledger configuration
    pub fn with_ledger(mut self, ledger: LedgerConfig) -> Self {
        self.ledger = ledger;
        self
    }
}

/// Remote model provider configuration
#[derive(Clone)]
pub struct RemoteConfig {
    /// API key (loaded from environment variable)
    pub api_key: SecretString,
    /// Base URL of the provider API
    pub base_url: Url,
    /// Model identifier used for worker prompts
    pub model: String,
    /// Bounded timeout per provider call
    pub timeout: Duration,
    /// App name sent with requests for provider-side tracking
    pub app_name: String,
}

impl RemoteConfig {
    /// Create a remote provider configuration from environment variables.
    ///
    /// Reads `SWARMCOORD_API_KEY` (required), `SWARMCOORD_BASE_URL` and
    /// `SWARMCOORD_MODEL` (optional). Loads `.env` first so local
    /// development picks up the key.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let api_key = std::env::var("SWARMCOORD_API_KEY")
            .map_err(|_| Error::config("SWARMCOORD_API_KEY environment variable not set"))?;

        let base_url = match std::env::var("SWARMCOORD_BASE_URL") {
            Ok(raw) => Url::parse(&raw)
                .map_err(|e| Error::config(format!("invalid SWARMCOORD_BASE_URL: {e}")))?,
            Err(_) => Url::parse("https://openrouter.ai/api/v1").expect("valid default URL"),
        };

        let model = std::env::var("SWARMCOORD_MODEL")
            .unwrap_or_else(|_| "anthropic/claude-haiku-4".to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            model,
            timeout: Duration::from_secs(60),
            app_name: "swarmcoord".to_string(),
        })
    }

    /// Create a remote provider configuration with a specific API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: Url::parse("https://openrouter.ai/api/v1").expect("valid default URL"),
            model: "anthropic/claude-haiku-4".to_string(),
            timeout: Duration::from_secs(60),
            app_name: "swarmcoord".to_string(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the API key as a string
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_key", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}
