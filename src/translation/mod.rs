/*!
 * Translation module for chapter bodies, titles, descriptions, and metadata.
 *
 * The [`engine::TranslationEngine`] is the single entry point; the submodules
 * hold the backend-independent pieces it composes (prompt construction,
 * paragraph chunking, metadata parsing).
 */

pub mod chunk;
pub mod engine;
pub mod metadata;
pub mod prompts;

pub use engine::{TranslationEngine, TranslationRequest};
pub use metadata::NovelMetadata;
