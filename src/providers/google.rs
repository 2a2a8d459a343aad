use async_trait::async_trait;
use log::error;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::MachineTranslator;

/// Public endpoint of the free translation backend
const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Free Google Translate backend
///
/// Uses the public `translate_a/single` endpoint. The backend caps input
/// length at roughly 5000 characters per request; the translation engine
/// keeps each chunk under its character budget before calling in here.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL (overridable for self-hosted mirrors)
    endpoint: String,
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleTranslate {
    /// Create a new client against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a new client against a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Reassemble the translated text from the backend's nested-array response.
    ///
    /// The response body is a JSON array whose first element is a list of
    /// segments; each segment is `[translated, original, ...]`.
    fn extract_text(body: &serde_json::Value) -> Result<String, ProviderError> {
        let segments = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::ParseError("unexpected response shape from backend".to_string())
            })?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(piece) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(piece);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError(
                "backend returned no translated segments".to_string(),
            ));
        }

        Ok(translated)
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslate {
    async fn translate_chunk(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation backend error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_text(&body)
    }
}
