/*!
 * Per-novel translation pipeline.
 *
 * Orchestrates the chapter loop: term extraction, body translation, title
 * translation, glossary persistence. Chapters come from a [`ChapterSource`]
 * and translated output goes to a [`PublishSink`]; both are opaque so the
 * pipeline never knows whether it is reading scraped HTML or plain files.
 *
 * Failure policy is asymmetric: a failed body translation aborts the chapter,
 * while failed extraction or metadata generation degrades silently (logged)
 * because neither may block publishing.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::Config;
use crate::glossary::Glossary;
use crate::glossary::extractor::TermExtractor;
use crate::providers::ChatProvider;
use crate::providers::openrouter::OpenRouter;
use crate::providers::retry::RetryPolicy;
use crate::translation::metadata::NovelMetadata;
use crate::translation::prompts;
use crate::translation::{TranslationEngine, TranslationRequest};

/// One untranslated chapter
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Chapter title in the source language
    pub title: String,

    /// Chapter body in the source language
    pub content: String,
}

/// One translated chapter
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedChapter {
    /// Translated chapter title
    pub title: String,

    /// Translated chapter body
    pub content: String,
}

/// Novel-level metadata in the source language
#[derive(Debug, Clone, PartialEq)]
pub struct NovelInfo {
    /// Novel title
    pub title: String,

    /// Novel description or synopsis
    pub description: String,
}

/// Translated novel-level metadata with generated classification
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedNovelInfo {
    /// Translated novel title
    pub title: String,

    /// Translated description
    pub description: String,

    /// Generated genres and tags; empty when generation was unavailable
    pub metadata: NovelMetadata,
}

/// Source of untranslated chapters, consumed in order
#[async_trait]
pub trait ChapterSource: Send {
    /// Number of chapters this source will yield
    fn chapter_count(&self) -> usize;

    /// Next chapter, or None when the source is exhausted
    async fn next_chapter(&mut self) -> Result<Option<Chapter>>;
}

/// Destination for translated output
#[async_trait]
pub trait PublishSink: Send {
    /// Publish one translated chapter
    async fn publish_chapter(&mut self, chapter: &TranslatedChapter) -> Result<()>;

    /// Publish translated novel-level metadata
    async fn publish_novel_info(&mut self, info: &TranslatedNovelInfo) -> Result<()>;
}

/// Sequential per-novel translation pipeline
pub struct Pipeline {
    engine: TranslationEngine,
    extractor: Option<TermExtractor>,
    source_language: String,
    target_language: String,
    glossary: Glossary,
    glossary_path: PathBuf,
}

impl Pipeline {
    /// Build a pipeline from configuration, loading the glossary from disk.
    ///
    /// The term extractor is only available on the chat backend; with the
    /// free backend or an inert engine the glossary passes through untouched.
    pub fn from_config(config: &Config, glossary_path: impl Into<PathBuf>) -> Result<Self> {
        let translation = &config.translation;
        let engine = TranslationEngine::new(translation);

        let extractor = if engine.is_chat_backed() {
            let retry = RetryPolicy::new(
                translation.common.retry_count,
                translation.common.rate_limit_backoff_secs,
            );
            let provider: Arc<dyn ChatProvider> = Arc::new(OpenRouter::with_config(
                &translation.api_key,
                &translation.endpoint,
                retry,
                translation.common.timeout_secs,
            ));
            Some(TermExtractor::new(provider, &translation.model))
        } else {
            None
        };

        Self::new(
            engine,
            extractor,
            &config.source_language,
            &config.target_language,
            glossary_path,
        )
    }

    /// Build a pipeline over explicit collaborators (used by tests)
    pub fn new(
        engine: TranslationEngine,
        extractor: Option<TermExtractor>,
        source_language: &str,
        target_language: &str,
        glossary_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let glossary_path = glossary_path.into();
        let glossary = Glossary::load(&glossary_path)?;
        info!(
            "Loaded glossary with {} terms ({} backend)",
            glossary.len(),
            engine.backend_name()
        );

        Ok(Self {
            engine,
            extractor,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            glossary,
            glossary_path,
        })
    }

    /// Current glossary state
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Translate one chapter, updating and persisting the glossary.
    ///
    /// The glossary is saved as soon as extraction finishes, before any
    /// translation call, so a chapter that fails mid-translation still keeps
    /// the terms it contributed.
    pub async fn process_chapter(&mut self, chapter: &Chapter) -> Result<TranslatedChapter> {
        if let Some(extractor) = &self.extractor {
            self.glossary = extractor.extract(&chapter.content, &self.glossary).await;
            debug!("Glossary now holds {} terms", self.glossary.len());
            self.glossary.save(&self.glossary_path)?;
        }

        let content = self
            .engine
            .translate(
                TranslationRequest::new(
                    &chapter.content,
                    &self.source_language,
                    &self.target_language,
                )
                .with_glossary(&self.glossary),
            )
            .await
            .with_context(|| format!("Failed to translate chapter '{}'", chapter.title))?;

        let title = self
            .engine
            .translate(
                TranslationRequest::new(
                    &chapter.title,
                    &self.source_language,
                    &self.target_language,
                )
                .with_glossary(&self.glossary)
                .with_system_prompt(prompts::title_translation(
                    &self.source_language,
                    &self.target_language,
                )),
            )
            .await
            .with_context(|| format!("Failed to translate chapter title '{}'", chapter.title))?;

        Ok(TranslatedChapter { title, content })
    }

    /// Translate the novel's title and description and generate metadata.
    ///
    /// Metadata generation works from the translated text and is best-effort;
    /// an inert or free backend yields empty metadata.
    pub async fn process_novel_info(&self, info: &NovelInfo) -> Result<TranslatedNovelInfo> {
        let title = self
            .engine
            .translate(
                TranslationRequest::new(&info.title, &self.source_language, &self.target_language)
                    .with_system_prompt(prompts::title_translation(
                        &self.source_language,
                        &self.target_language,
                    )),
            )
            .await
            .context("Failed to translate novel title")?;

        let description = self
            .engine
            .translate(
                TranslationRequest::new(
                    &info.description,
                    &self.source_language,
                    &self.target_language,
                )
                .with_system_prompt(prompts::description_translation(
                    &self.source_language,
                    &self.target_language,
                )),
            )
            .await
            .context("Failed to translate novel description")?;

        let metadata = self.engine.generate_metadata(&title, &description).await;

        Ok(TranslatedNovelInfo {
            title,
            description,
            metadata,
        })
    }

    /// Run the full chapter loop from a source into a sink
    pub async fn run(
        &mut self,
        source: &mut dyn ChapterSource,
        sink: &mut dyn PublishSink,
    ) -> Result<usize> {
        let total = source.chapter_count();
        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut published = 0;
        while let Some(chapter) = source.next_chapter().await? {
            progress.set_message(chapter.title.clone());

            let translated = self.process_chapter(&chapter).await?;
            sink.publish_chapter(&translated).await?;

            published += 1;
            progress.inc(1);
        }

        progress.finish_with_message(format!("{} chapter(s) translated", published));
        Ok(published)
    }
}
