/*!
 * Size-bounded compaction of an oversized glossary.
 *
 * The model is asked to keep only the narratively important subset of the
 * glossary; its answer replaces the store. Compaction is best-effort: any
 * failure (network, auth, or a response with no usable lines) returns the
 * input glossary unchanged, because losing the glossary entirely is worse
 * than leaving it oversized.
 */

use log::{info, warn};
use std::sync::Arc;

use crate::glossary::parse::parse_term_lines;
use crate::glossary::{Glossary, GlossaryTerm, TermKind};
use crate::providers::{ChatProvider, ChatRequest};
use crate::translation::prompts;

/// Maximum entries retained by a successful compaction
pub const COMPACTION_TARGET: usize = 40;

/// Rewrites an oversized glossary down to its most important entries
pub struct GlossaryCompactor {
    provider: Arc<dyn ChatProvider>,
    model: String,
}

impl GlossaryCompactor {
    /// Create a new compactor backed by the given chat provider
    pub fn new(provider: Arc<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Produce a fresh glossary holding at most [`COMPACTION_TARGET`] entries.
    ///
    /// The result replaces the input rather than merging with it. Term kinds
    /// are recovered from the input glossary where the original matches,
    /// since the model only echoes `Original: Translation` lines.
    pub async fn compact(&self, glossary: &Glossary) -> Glossary {
        let prompt = prompts::glossary_compaction(glossary, COMPACTION_TARGET);
        let request = ChatRequest::new(&self.model).user(prompt);

        let response = match self.provider.chat(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Glossary compaction failed, keeping {} entries: {}", glossary.len(), e);
                return glossary.clone();
            }
        };

        let pairs = parse_term_lines(&response);
        if pairs.is_empty() {
            warn!("Glossary compaction returned no usable lines, keeping {} entries", glossary.len());
            return glossary.clone();
        }

        let mut compacted = Glossary::new();
        for (original, translation) in pairs {
            if compacted.len() >= COMPACTION_TARGET {
                break;
            }
            let kind = glossary
                .get(&original)
                .map(|t| t.kind)
                .unwrap_or(TermKind::Term);
            compacted.add(GlossaryTerm::new(original, translation, kind));
        }

        info!(
            "Compacted glossary from {} to {} entries",
            glossary.len(),
            compacted.len()
        );
        compacted
    }
}
