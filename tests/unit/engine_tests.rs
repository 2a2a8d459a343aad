/*!
 * Tests for the translation engine and its backend selection
 */

use std::sync::Arc;

use noveltrans::app_config::{Config, TranslationService};
use noveltrans::errors::{ProviderError, TranslationError};
use noveltrans::glossary::{Glossary, GlossaryTerm, TermKind};
use noveltrans::translation::{TranslationEngine, TranslationRequest};

use crate::common::mock_providers::{EchoTranslator, ScriptedChatProvider};

#[tokio::test]
async fn test_engine_inert_shouldFailInsteadOfPassingSourceThrough() {
    let engine = TranslationEngine::inert();

    let result = engine
        .translate(TranslationRequest::new("原文", "zh-CN", "en"))
        .await;

    assert!(matches!(result, Err(TranslationError::NoBackendConfigured)));
}

#[test]
fn test_engine_fromConfig_withoutApiKey_shouldBeInert() {
    let config = Config::default();
    assert_eq!(config.translation.service, TranslationService::OpenRouter);

    let engine = TranslationEngine::new(&config.translation);
    assert!(engine.is_inert());
}

#[test]
fn test_engine_fromConfig_withGoogleService_shouldNotBeInert() {
    let mut config = Config::default();
    config.translation.service = TranslationService::Google;

    let engine = TranslationEngine::new(&config.translation);
    assert!(!engine.is_inert());
    assert!(!engine.is_chat_backed());
}

#[tokio::test]
async fn test_engine_chatBackend_shouldEmbedGlossaryInSystemPrompt() {
    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("translated body");
    let engine = TranslationEngine::with_chat_provider(provider.clone(), "test-model");

    let mut glossary = Glossary::new();
    glossary.add(GlossaryTerm::new("李伟", "Li Wei", TermKind::Name));

    let result = engine
        .translate(
            TranslationRequest::new("章节正文", "zh-CN", "en").with_glossary(&glossary),
        )
        .await
        .unwrap();

    assert_eq!(result, "translated body");
    let request = provider.request(0);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert!(request.messages[0].content.contains("李伟: Li Wei"));
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(request.messages[1].content, "章节正文");
}

#[tokio::test]
async fn test_engine_chatBackend_withEmptyGlossary_shouldOmitReferenceBlock() {
    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("translated body");
    let engine = TranslationEngine::with_chat_provider(provider.clone(), "test-model");

    let glossary = Glossary::new();
    engine
        .translate(
            TranslationRequest::new("章节正文", "zh-CN", "en").with_glossary(&glossary),
        )
        .await
        .unwrap();

    let request = provider.request(0);
    assert!(!request.messages[0].content.contains("glossary"));
}

#[tokio::test]
async fn test_engine_chatBackend_shouldUseCallerSystemPromptWhenGiven() {
    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("Translated Title");
    let engine = TranslationEngine::with_chat_provider(provider.clone(), "test-model");

    engine
        .translate(
            TranslationRequest::new("标题", "zh-CN", "en")
                .with_system_prompt("Translate this title."),
        )
        .await
        .unwrap();

    assert_eq!(provider.request(0).messages[0].content, "Translate this title.");
}

#[tokio::test]
async fn test_engine_chatBackend_shouldPropagateProviderErrors() {
    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_err(ProviderError::AuthenticationError("bad key".to_string()));
    let engine = TranslationEngine::with_chat_provider(provider, "test-model");

    let result = engine
        .translate(TranslationRequest::new("原文", "zh-CN", "en"))
        .await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::AuthenticationError(_)))
    ));
}

#[tokio::test]
async fn test_engine_freeBackend_withLongText_shouldChunkAndPreserveParagraphs() {
    let translator = Arc::new(EchoTranslator::new());
    let engine = TranslationEngine::with_free_provider(translator.clone(), 4500);

    let paragraphs: Vec<String> = (0..3).map(|i| format!("段{} {}", i, "字".repeat(2000))).collect();
    let text = paragraphs.join("\n\n");

    let result = engine
        .translate(TranslationRequest::new(&text, "zh-CN", "en"))
        .await
        .unwrap();

    // two paragraphs fit the first chunk, the third forces a second call
    assert_eq!(translator.call_count(), 2);
    assert_eq!(result, text);
}

#[tokio::test]
async fn test_engine_freeBackend_shouldNormalizeSourceLanguageCode() {
    let translator = Arc::new(EchoTranslator::new());
    let engine = TranslationEngine::with_free_provider(translator.clone(), 4500);

    engine
        .translate(TranslationRequest::new("原文", "zh-CN", "en"))
        .await
        .unwrap();

    let (_, source, target) = translator.call(0);
    assert_eq!(source, "zh-cn");
    assert_eq!(target, "en");
}

#[tokio::test]
async fn test_engine_generateMetadata_withChatBackend_shouldParseFencedJson() {
    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("```json\n{\"genres\": [\"Xianxia\"], \"tags\": [\"Cultivation\"]}\n```");
    let engine = TranslationEngine::with_chat_provider(provider, "test-model");

    let metadata = engine.generate_metadata("Title", "Description").await;

    assert_eq!(metadata.genres, vec!["Xianxia"]);
    assert_eq!(metadata.tags, vec!["Cultivation"]);
}

#[tokio::test]
async fn test_engine_generateMetadata_onFailure_shouldReturnEmptyMetadata() {
    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_err(ProviderError::RequestFailed("timeout".to_string()));
    let engine = TranslationEngine::with_chat_provider(provider, "test-model");

    let metadata = engine.generate_metadata("Title", "Description").await;

    assert!(metadata.genres.is_empty());
    assert!(metadata.tags.is_empty());
}

#[tokio::test]
async fn test_engine_generateMetadata_withFreeBackend_shouldReturnEmptyMetadata() {
    let translator = Arc::new(EchoTranslator::new());
    let engine = TranslationEngine::with_free_provider(translator.clone(), 4500);

    let metadata = engine.generate_metadata("Title", "Description").await;

    assert!(metadata.genres.is_empty());
    assert_eq!(translator.call_count(), 0);
}
