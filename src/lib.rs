/*!
 * # noveltrans
 *
 * A Rust library and CLI for translating serialized web novels with AI,
 * keeping terminology consistent across chapters through a persistent
 * per-novel glossary.
 *
 * ## Features
 *
 * - Translate chapter bodies, titles, and descriptions
 * - Two interchangeable backends:
 *   - LLM chat completions through an OpenRouter-style endpoint
 *   - Free machine translation with paragraph-boundary chunking
 * - Incremental, LLM-driven glossary extraction with size-bounded compaction
 * - Genre/tag metadata generation for novel listings
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `glossary`: Glossary store, term extraction, and compaction
 * - `translation`: Translation engine, prompts, chunking, and metadata
 * - `providers`: Backend clients and the shared retry policy:
 *   - `providers::openrouter`: OpenRouter chat-completion client
 *   - `providers::google`: free machine-translation backend
 * - `pipeline`: Per-novel chapter orchestration
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, TranslationService};
pub use errors::{AppError, ProviderError, TranslationError};
pub use glossary::{Glossary, GlossaryTerm, TermKind};
pub use pipeline::{Chapter, NovelInfo, Pipeline};
pub use translation::{NovelMetadata, TranslationEngine, TranslationRequest};
