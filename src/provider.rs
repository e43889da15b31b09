//! Model provider seam for worker execution
//!
//! Workers execute through a [`ModelProvider`]: either the HTTP-backed
//! [`crate::remote::RemoteProvider`] or the deterministic
//! [`SimulatedProvider`] used when no external client is configured.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Response from a provider invocation
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Raw response text
    pub text: String,
    /// Tokens actually consumed by the call
    pub tokens_used: u64,
}

/// Unified trait for model providers (remote and simulated)
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Execute one prompt within a token ceiling
    async fn invoke(&self, prompt: &str, max_tokens: u64) -> Result<ProviderResponse>;

    /// Provider type for logging and debugging
    fn provider_type(&self) -> &str;
}

/// Deterministic provider used when no external model client is configured.
///
/// Produces a templated response and reports consumption of half the token
/// ceiling. An optional latency models provider round-trip time; tests run
/// with zero latency.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider {
    latency: Duration,
}

impl SimulatedProvider {
    /// Create a simulated provider with no latency
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the simulated round-trip latency per invocation
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ModelProvider for SimulatedProvider {
    async fn invoke(&self, prompt: &str, max_tokens: u64) -> Result<ProviderResponse> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(ProviderResponse {
            text: format!("[simulated] Completed: {prompt}"),
            tokens_used: max_tokens / 2,
        })
    }

    fn provider_type(&self) -> &str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_provider_is_deterministic() {
        let provider = SimulatedProvider::new();
        let a = tokio_test::block_on(provider.invoke("summarize the report", 200)).unwrap();
        let b = tokio_test::block_on(provider.invoke("summarize the report", 200)).unwrap();
        assert_eq!(a.text, b.text);
        assert_eq!(a.tokens_used, 100);
        assert_eq!(b.tokens_used, 100);
    }

    #[tokio::test]
    async fn test_simulated_provider_never_overspends() {
        let provider = SimulatedProvider::new();
        for ceiling in [0u64, 1, 7, 1000] {
            let response = provider.invoke("task", ceiling).await.unwrap();
            assert!(response.tokens_used <= ceiling);
        }
    }
}
