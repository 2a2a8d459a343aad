/*!
 * End-to-end tests for the chapter translation pipeline
 */

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use noveltrans::errors::ProviderError;
use noveltrans::glossary::Glossary;
use noveltrans::glossary::extractor::TermExtractor;
use noveltrans::pipeline::{
    Chapter, ChapterSource, NovelInfo, Pipeline, PublishSink, TranslatedChapter,
    TranslatedNovelInfo,
};
use noveltrans::providers::ChatProvider;
use noveltrans::translation::TranslationEngine;

use crate::common;
use crate::common::mock_providers::ScriptedChatProvider;

/// Chapter source over an in-memory list
struct VecChapterSource {
    chapters: Vec<Chapter>,
    next: usize,
}

impl VecChapterSource {
    fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters, next: 0 }
    }
}

#[async_trait]
impl ChapterSource for VecChapterSource {
    fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    async fn next_chapter(&mut self) -> Result<Option<Chapter>> {
        let chapter = self.chapters.get(self.next).cloned();
        self.next += 1;
        Ok(chapter)
    }
}

/// Publish sink that records everything it receives
#[derive(Default)]
struct RecordingSink {
    chapters: Vec<TranslatedChapter>,
    novel_info: Vec<TranslatedNovelInfo>,
}

#[async_trait]
impl PublishSink for RecordingSink {
    async fn publish_chapter(&mut self, chapter: &TranslatedChapter) -> Result<()> {
        self.chapters.push(chapter.clone());
        Ok(())
    }

    async fn publish_novel_info(&mut self, info: &TranslatedNovelInfo) -> Result<()> {
        self.novel_info.push(info.clone());
        Ok(())
    }
}

fn chat_pipeline(
    provider: &Arc<ScriptedChatProvider>,
    glossary_path: &std::path::Path,
) -> Pipeline {
    let engine = TranslationEngine::with_chat_provider(
        Arc::clone(provider) as Arc<dyn ChatProvider>,
        "test-model",
    );
    let extractor = TermExtractor::new(
        Arc::clone(provider) as Arc<dyn ChatProvider>,
        "test-model",
    );
    Pipeline::new(engine, Some(extractor), "zh-CN", "en", glossary_path).unwrap()
}

#[tokio::test]
async fn test_pipeline_processChapter_shouldExtractTranslateAndPersistGlossary() {
    let dir = common::create_temp_dir().unwrap();
    let glossary_path = dir.path().join("glossary.json");

    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("李伟: Li Wei"); // extraction
    provider.respond_ok("Translated body"); // body
    provider.respond_ok("Chapter 1: Awakening"); // title
    let mut pipeline = chat_pipeline(&provider, &glossary_path);

    let chapter = Chapter {
        title: "第一章 觉醒".to_string(),
        content: "李伟睁开了眼睛。".to_string(),
    };
    let translated = pipeline.process_chapter(&chapter).await.unwrap();

    assert_eq!(translated.title, "Chapter 1: Awakening");
    assert_eq!(translated.content, "Translated body");
    assert_eq!(provider.call_count(), 3);

    // the freshly extracted term conditions the body translation
    let body_request = provider.request(1);
    assert!(body_request.messages[0].content.contains("李伟: Li Wei"));

    // glossary is persisted after the chapter
    let persisted = Glossary::load(&glossary_path).unwrap();
    assert!(persisted.contains("李伟"));
}

#[tokio::test]
async fn test_pipeline_run_shouldPublishEveryChapterInOrder() {
    let dir = common::create_temp_dir().unwrap();
    let glossary_path = dir.path().join("glossary.json");

    let provider = Arc::new(ScriptedChatProvider::new());
    for i in 1..=2 {
        provider.respond_ok(""); // extraction finds nothing
        provider.respond_ok(&format!("Body {}", i));
        provider.respond_ok(&format!("Title {}", i));
    }
    let mut pipeline = chat_pipeline(&provider, &glossary_path);

    let mut source = VecChapterSource::new(vec![
        Chapter {
            title: "第一章".to_string(),
            content: "正文一".to_string(),
        },
        Chapter {
            title: "第二章".to_string(),
            content: "正文二".to_string(),
        },
    ]);
    let mut sink = RecordingSink::default();

    let published = pipeline.run(&mut source, &mut sink).await.unwrap();

    assert_eq!(published, 2);
    assert_eq!(sink.chapters.len(), 2);
    assert_eq!(sink.chapters[0].title, "Title 1");
    assert_eq!(sink.chapters[1].content, "Body 2");
}

#[tokio::test]
async fn test_pipeline_processNovelInfo_shouldTranslateAndGenerateMetadata() {
    let dir = common::create_temp_dir().unwrap();
    let glossary_path = dir.path().join("glossary.json");

    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("Rise of the Fallen Star");
    provider.respond_ok("A young cultivator claws his way back.");
    provider.respond_ok(r#"{"genres": ["Xianxia"], "tags": ["Cultivation"]}"#);
    let pipeline = chat_pipeline(&provider, &glossary_path);

    let info = NovelInfo {
        title: "落星崛起".to_string(),
        description: "一个年轻修士的逆袭。".to_string(),
    };
    let translated = pipeline.process_novel_info(&info).await.unwrap();

    assert_eq!(translated.title, "Rise of the Fallen Star");
    assert_eq!(translated.description, "A young cultivator claws his way back.");
    assert_eq!(translated.metadata.genres, vec!["Xianxia"]);

    // metadata is generated from the translated title and description
    let metadata_request = provider.request(2);
    assert!(metadata_request.messages[0].content.contains("Rise of the Fallen Star"));
}

#[tokio::test]
async fn test_pipeline_withInertEngine_shouldFailChapterTranslation() {
    let dir = common::create_temp_dir().unwrap();
    let glossary_path = dir.path().join("glossary.json");

    let mut pipeline = Pipeline::new(
        TranslationEngine::inert(),
        None,
        "zh-CN",
        "en",
        &glossary_path,
    )
    .unwrap();

    let chapter = Chapter {
        title: "第一章".to_string(),
        content: "正文".to_string(),
    };

    assert!(pipeline.process_chapter(&chapter).await.is_err());
}

#[tokio::test]
async fn test_pipeline_whenTranslationFails_shouldKeepExtractedTerms() {
    let dir = common::create_temp_dir().unwrap();
    let glossary_path = dir.path().join("glossary.json");

    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("李伟: Li Wei"); // extraction succeeds
    provider.respond_err(ProviderError::AuthenticationError("bad key".to_string()));
    let mut pipeline = chat_pipeline(&provider, &glossary_path);

    let chapter = Chapter {
        title: "第一章".to_string(),
        content: "李伟睁开了眼睛。".to_string(),
    };
    assert!(pipeline.process_chapter(&chapter).await.is_err());

    // the extraction work survives the aborted chapter
    let persisted = Glossary::load(&glossary_path).unwrap();
    assert!(persisted.contains("李伟"));
}

#[tokio::test]
async fn test_pipeline_shouldResumeFromPersistedGlossary() {
    let dir = common::create_temp_dir().unwrap();
    let glossary_path = dir.path().join("glossary.json");

    let provider = Arc::new(ScriptedChatProvider::new());
    provider.respond_ok("李伟: Li Wei");
    provider.respond_ok("Body");
    provider.respond_ok("Title");
    let mut pipeline = chat_pipeline(&provider, &glossary_path);
    let chapter = Chapter {
        title: "第一章".to_string(),
        content: "正文".to_string(),
    };
    pipeline.process_chapter(&chapter).await.unwrap();
    drop(pipeline);

    // a fresh session picks the glossary up from disk
    let provider = Arc::new(ScriptedChatProvider::new());
    let pipeline = chat_pipeline(&provider, &glossary_path);
    assert!(pipeline.glossary().contains("李伟"));
}
