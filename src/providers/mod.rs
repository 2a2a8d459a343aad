/*!
 * Provider implementations for the translation backends.
 *
 * This module contains the client traits and implementations:
 * - OpenRouter: chat-completion API client (LLM-backed translation)
 * - GoogleTranslate: free machine-translation backend
 */

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single message in a chat-completion conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// A chat-completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model to use
    pub model: String,

    /// The messages for the conversation
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Create a new chat request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Add a system-role message
    pub fn system(self, content: impl Into<String>) -> Self {
        self.add_message("system", content)
    }

    /// Add a user-role message
    pub fn user(self, content: impl Into<String>) -> Self {
        self.add_message("user", content)
    }
}

/// Common trait for chat-completion providers
///
/// Implementations handle their own retry policy; callers see either the
/// assistant's text or the final error after retries are exhausted.
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    /// Complete a chat request and return the assistant message content
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError>;
}

/// Common trait for machine-translation backends with a request length ceiling
///
/// Callers are responsible for keeping each chunk within the backend's
/// character budget; chunking lives in the translation engine.
#[async_trait]
pub trait MachineTranslator: Send + Sync + Debug {
    /// Translate a single length-compliant chunk of text
    async fn translate_chunk(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod openrouter;
pub mod retry;
