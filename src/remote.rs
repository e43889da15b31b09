//! HTTP model provider client
//!
//! Speaks the chat-completions dialect used by OpenRouter-compatible
//! endpoints. Every call carries a bounded timeout so one stalled provider
//! request cannot block a mission indefinitely; provider errors map into
//! [`crate::error::Error`] and are absorbed at the worker boundary.

use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::provider::{ModelProvider, ProviderResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// HTTP-backed model provider
pub struct RemoteProvider {
    client: Client,
    config: RemoteConfig,
}

impl RemoteProvider {
    /// Create a remote provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(RemoteConfig::from_env()?)
    }

    /// Create a remote provider with the given configuration
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}/chat/completions");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("X-Title", &self.config.app_name)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::provider(format!(
                "Request failed with status {status}: {error_text}"
            )));
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion)
    }
}

#[async_trait]
impl ModelProvider for RemoteProvider {
    async fn invoke(&self, prompt: &str, max_tokens: u64) -> Result<ProviderResponse> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens,
        };

        // The HTTP client has its own timeout; this outer bound also covers
        // response-body stalls.
        let completion = tokio::time::timeout(self.config.timeout, self.complete(request))
            .await
            .map_err(|_| Error::timeout(format!("provider call exceeded {:?}", self.config.timeout)))??;

        let text = completion
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(ProviderResponse {
            text,
            tokens_used: completion.usage.total_tokens,
        })
    }

    fn provider_type(&self) -> &str {
        "remote"
    }
}

/// Chat completion request payload
#[derive(Debug, Clone, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u64,
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

impl Message {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response payload
#[derive(Debug, Clone, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: Message,
}

/// Token usage as reported by the provider
#[derive(Debug, Clone, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn test_config(server_url: &str) -> RemoteConfig {
        RemoteConfig::new("test-key")
            .with_base_url(Url::parse(server_url).unwrap())
            .with_model("test/model")
            .with_timeout(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_invoke_parses_text_and_usage() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "partition handled"}}],
                    "usage": {"total_tokens": 73}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = RemoteProvider::new(test_config(&server.url())).unwrap();
        let response = provider.invoke("handle one partition", 200).await.unwrap();

        assert_eq!(response.text, "partition handled");
        assert_eq!(response.tokens_used, 73);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invoke_maps_error_status_to_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream on fire")
            .create_async()
            .await;

        let provider = RemoteProvider::new(test_config(&server.url())).unwrap();
        let err = provider.invoke("handle one partition", 200).await.unwrap_err();

        assert!(matches!(err, Error::Provider(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_invoke_tolerates_missing_usage() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "ok"}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = RemoteProvider::new(test_config(&server.url())).unwrap();
        let response = provider.invoke("quick check", 50).await.unwrap();
        assert_eq!(response.tokens_used, 0);
    }
}
