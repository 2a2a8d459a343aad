/*!
 * Core translation engine.
 *
 * The engine is backend-agnostic at the call site: the backend is selected
 * once at construction from configuration and fixed for the session. An
 * engine without a usable backend is inert and fails loudly on use; it
 * never returns the untranslated source text.
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationService};
use crate::errors::TranslationError;
use crate::glossary::Glossary;
use crate::language_utils;
use crate::providers::google::GoogleTranslate;
use crate::providers::openrouter::OpenRouter;
use crate::providers::retry::RetryPolicy;
use crate::providers::{ChatProvider, ChatRequest, MachineTranslator};
use crate::translation::chunk::{PARAGRAPH_SEPARATOR, pack_paragraphs};
use crate::translation::metadata::{NovelMetadata, parse_metadata_response};
use crate::translation::prompts;

/// Translation backend implementation variants
enum BackendImpl {
    /// LLM chat completions with custom system prompts
    Chat {
        provider: Arc<dyn ChatProvider>,
        model: String,
    },

    /// Free machine translation with client-side chunking
    Free {
        provider: Arc<dyn MachineTranslator>,
        max_chars_per_request: usize,
    },

    /// No backend available; every translate call fails
    Inert,
}

/// A single translation request; ephemeral, one per call
pub struct TranslationRequest<'a> {
    /// Source text to translate
    pub text: &'a str,

    /// Source language code
    pub source_language: &'a str,

    /// Target language code
    pub target_language: &'a str,

    /// Glossary to condition the translation on, when available
    pub glossary: Option<&'a Glossary>,

    /// Specialized system prompt; the default body prompt applies when absent
    pub system_prompt: Option<String>,
}

impl<'a> TranslationRequest<'a> {
    /// Create a request with the default system prompt and no glossary
    pub fn new(text: &'a str, source_language: &'a str, target_language: &'a str) -> Self {
        Self {
            text,
            source_language,
            target_language,
            glossary: None,
            system_prompt: None,
        }
    }

    /// Condition the translation on a glossary
    pub fn with_glossary(mut self, glossary: &'a Glossary) -> Self {
        self.glossary = Some(glossary);
        self
    }

    /// Use a specialized system prompt instead of the default
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Main translation engine
pub struct TranslationEngine {
    backend: BackendImpl,
}

impl TranslationEngine {
    /// Create an engine with the backend selected from configuration.
    ///
    /// An OpenRouter service without an API key yields an inert engine;
    /// construction never fails so that misconfiguration surfaces as an
    /// explicit error on the first translate call instead of a silent
    /// passthrough somewhere downstream.
    pub fn new(config: &TranslationConfig) -> Self {
        let backend = match config.service {
            TranslationService::OpenRouter if !config.api_key.is_empty() => {
                let retry = RetryPolicy::new(
                    config.common.retry_count,
                    config.common.rate_limit_backoff_secs,
                );
                let client = OpenRouter::with_config(
                    &config.api_key,
                    &config.endpoint,
                    retry,
                    config.common.timeout_secs,
                );
                BackendImpl::Chat {
                    provider: Arc::new(client),
                    model: config.model.clone(),
                }
            }
            TranslationService::OpenRouter => {
                warn!("OpenRouter API key not configured; translation engine is inert");
                BackendImpl::Inert
            }
            TranslationService::Google => BackendImpl::Free {
                provider: Arc::new(GoogleTranslate::new()),
                max_chars_per_request: config.common.max_chars_per_request,
            },
        };

        Self { backend }
    }

    /// Create an engine over an arbitrary chat provider (used by tests)
    pub fn with_chat_provider(provider: Arc<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            backend: BackendImpl::Chat {
                provider,
                model: model.into(),
            },
        }
    }

    /// Create an engine over an arbitrary machine translator (used by tests)
    pub fn with_free_provider(
        provider: Arc<dyn MachineTranslator>,
        max_chars_per_request: usize,
    ) -> Self {
        Self {
            backend: BackendImpl::Free {
                provider,
                max_chars_per_request,
            },
        }
    }

    /// Create an engine with no backend
    pub fn inert() -> Self {
        Self {
            backend: BackendImpl::Inert,
        }
    }

    /// Whether this engine has a usable backend
    pub fn is_inert(&self) -> bool {
        matches!(self.backend, BackendImpl::Inert)
    }

    /// Whether this engine is backed by a chat-completion service
    pub fn is_chat_backed(&self) -> bool {
        matches!(self.backend, BackendImpl::Chat { .. })
    }

    /// Human-readable backend name for logging
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            BackendImpl::Chat { .. } => "chat completion",
            BackendImpl::Free { .. } => "free machine translation",
            BackendImpl::Inert => "none",
        }
    }

    /// Translate a text, conditioned on the request's glossary and prompt.
    ///
    /// Fails with [`TranslationError::NoBackendConfigured`] when the engine
    /// is inert; retry exhaustion and fatal provider errors propagate.
    pub async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<String, TranslationError> {
        match &self.backend {
            BackendImpl::Chat { provider, model } => {
                Self::translate_chat(provider.as_ref(), model, &request).await
            }
            BackendImpl::Free {
                provider,
                max_chars_per_request,
            } => {
                Self::translate_free(provider.as_ref(), *max_chars_per_request, &request).await
            }
            BackendImpl::Inert => Err(TranslationError::NoBackendConfigured),
        }
    }

    async fn translate_chat(
        provider: &dyn ChatProvider,
        model: &str,
        request: &TranslationRequest<'_>,
    ) -> Result<String, TranslationError> {
        let mut system_prompt = match &request.system_prompt {
            Some(prompt) => prompt.clone(),
            None => prompts::body_translation(request.source_language, request.target_language),
        };

        if let Some(glossary) = request.glossary {
            if !glossary.is_empty() {
                system_prompt.push_str(&prompts::glossary_reference(glossary));
            }
        }

        let chat_request = ChatRequest::new(model)
            .system(system_prompt)
            .user(request.text);

        Ok(provider.chat(chat_request).await?)
    }

    async fn translate_free(
        provider: &dyn MachineTranslator,
        max_chars_per_request: usize,
        request: &TranslationRequest<'_>,
    ) -> Result<String, TranslationError> {
        let source = language_utils::to_free_backend_code(request.source_language);

        let chunks = pack_paragraphs(request.text, max_chars_per_request);
        debug!("Translating {} chunk(s) via free backend", chunks.len());

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let piece = provider
                .translate_chunk(chunk, &source, request.target_language)
                .await?;
            translated.push(piece);
        }

        Ok(translated.join(PARAGRAPH_SEPARATOR))
    }

    /// Generate genre/tag metadata from a novel's title and description.
    ///
    /// Chat backend only; every failure mode degrades to empty metadata so
    /// the pipeline proceeds without it.
    pub async fn generate_metadata(&self, title: &str, description: &str) -> NovelMetadata {
        let BackendImpl::Chat { provider, model } = &self.backend else {
            return NovelMetadata::default();
        };

        let request = ChatRequest::new(model).user(prompts::metadata_generation(title, description));

        let response = match provider.chat(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Metadata generation failed: {}", e);
                return NovelMetadata::default();
            }
        };

        match parse_metadata_response(&response) {
            Some(metadata) => metadata,
            None => {
                warn!("Metadata generation returned unparseable output");
                NovelMetadata::default()
            }
        }
    }
}
