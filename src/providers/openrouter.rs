use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::retry::{RetryPolicy, with_retry};
use crate::providers::{ChatProvider, ChatRequest};

/// Referer header sent with every request, as the API asks integrators to do
const HTTP_REFERER: &str = "https://github.com/noveltrans/noveltrans";

/// Application title reported to the API
const APP_TITLE: &str = "noveltrans";

/// OpenRouter client for chat-completion requests
///
/// Handles retries internally: rate limits back off linearly, credential
/// errors abort immediately, other failures retry up to the attempt ceiling.
#[derive(Debug)]
pub struct OpenRouter {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Retry policy for failed requests
    retry: RetryPolicy,
}

/// Chat-completion response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// The completion choices; the first one carries the answer
    pub choices: Vec<ChatChoice>,
}

/// Individual completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The assistant message
    pub message: ChatChoiceMessage,
}

/// Message inside a completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    /// The actual text content
    pub content: String,
}

impl OpenRouter {
    /// Create a new OpenRouter client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_config(api_key, endpoint, RetryPolicy::default(), 60)
    }

    /// Create a new OpenRouter client with retry and timeout configuration
    pub fn with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        retry: RetryPolicy,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            retry,
        }
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }

    /// Issue a single chat-completion request without retrying
    async fn complete_once(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", HTTP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenRouter API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Extract the assistant text from a completion response
    fn extract_text(response: &ChatCompletionResponse) -> Result<String, ProviderError> {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| {
                ProviderError::ParseError("response contained no choices".to_string())
            })
    }
}

#[async_trait]
impl ChatProvider for OpenRouter {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let response = with_retry(&self.retry, "OpenRouter chat completion", || {
            self.complete_once(&request)
        })
        .await?;

        Self::extract_text(&response)
    }
}
