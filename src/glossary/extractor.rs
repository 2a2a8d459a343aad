/*!
 * LLM-backed extraction of new glossary terms from chapter text.
 *
 * Extraction is best-effort enrichment: a failed backend call returns the
 * input glossary unchanged so a chapter's translation is never blocked by
 * its extraction step.
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::glossary::compactor::GlossaryCompactor;
use crate::glossary::parse::parse_term_lines;
use crate::glossary::{Glossary, GlossaryTerm, TermKind};
use crate::providers::{ChatProvider, ChatRequest};
use crate::translation::prompts;

/// Upper bound on new terms requested per chapter
pub const MAX_NEW_TERMS: usize = 5;

/// Glossary size above which compaction kicks in after a merge.
///
/// An unbounded glossary inflates every future prompt, so extraction applies
/// backpressure once the store outgrows this bound.
pub const COMPACTION_THRESHOLD: usize = 60;

/// Extracts new terminology from chapter text against the current glossary
pub struct TermExtractor {
    provider: Arc<dyn ChatProvider>,
    model: String,
}

impl TermExtractor {
    /// Create a new extractor backed by the given chat provider
    pub fn new(provider: Arc<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Extract new terms from `text` and merge them into a copy of `glossary`.
    ///
    /// Proposals whose `original` already exists (in the input glossary or
    /// earlier in the same batch) are dropped; the first entry wins. When the
    /// merged glossary exceeds [`COMPACTION_THRESHOLD`], the compactor runs
    /// and its result is returned instead.
    pub async fn extract(&self, text: &str, glossary: &Glossary) -> Glossary {
        let prompt = prompts::term_extraction(text, glossary, MAX_NEW_TERMS);
        let request = ChatRequest::new(&self.model).user(prompt);

        let response = match self.provider.chat(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Term extraction failed, keeping glossary unchanged: {}", e);
                return glossary.clone();
            }
        };

        let mut merged = glossary.clone();
        let mut added = 0;
        for (original, translation) in parse_term_lines(&response) {
            // Glossary::add already rejects duplicates, covering both the
            // pre-existing entries and earlier lines of this batch
            if merged.add(GlossaryTerm::new(original, translation, TermKind::Term)) {
                added += 1;
            }
        }
        debug!(
            "Extracted {} new glossary terms ({} total)",
            added,
            merged.len()
        );

        if merged.len() > COMPACTION_THRESHOLD {
            let compactor = GlossaryCompactor::new(Arc::clone(&self.provider), &self.model);
            return compactor.compact(&merged).await;
        }

        merged
    }
}
