/*!
 * Persistent terminology glossary for one novel.
 *
 * A glossary is an ordered, deduplicated collection of term records
 * (`original` -> `translation`). It grows monotonically through extraction
 * and shrinks only through explicit compaction. Insertion order is preserved
 * so prompt construction stays deterministic across sessions.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod compactor;
pub mod extractor;
pub mod parse;

/// Category of a glossary term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// Character or organization name
    Name,
    /// Place name
    Location,
    /// Invented or domain-specific term
    #[default]
    Term,
}

/// A single glossary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// Source-language term; unique key within a glossary (case-sensitive)
    pub original: String,

    /// Target-language rendering
    pub translation: String,

    /// Term category
    #[serde(rename = "type", default)]
    pub kind: TermKind,
}

impl GlossaryTerm {
    /// Create a new glossary term
    pub fn new(
        original: impl Into<String>,
        translation: impl Into<String>,
        kind: TermKind,
    ) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
            kind,
        }
    }
}

/// Ordered set of glossary terms, scoped to one novel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Glossary {
    terms: Vec<GlossaryTerm>,
}

impl Glossary {
    /// Create an empty glossary
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term, preserving insertion order.
    ///
    /// Returns false without modifying anything when a term with the same
    /// `original` is already present; the first entry always wins.
    pub fn add(&mut self, term: GlossaryTerm) -> bool {
        if self.contains(&term.original) {
            return false;
        }
        self.terms.push(term);
        true
    }

    /// Membership test by exact string match on the source-language value
    pub fn contains(&self, original: &str) -> bool {
        self.terms.iter().any(|t| t.original == original)
    }

    /// Look up a term by its source-language value
    pub fn get(&self, original: &str) -> Option<&GlossaryTerm> {
        self.terms.iter().find(|t| t.original == original)
    }

    /// Current term count
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the glossary holds no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate terms in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GlossaryTerm> {
        self.terms.iter()
    }

    /// Serialize as `Original: Translation` lines in insertion order.
    ///
    /// This is the reference block embedded in translation prompts and the
    /// input format for compaction.
    pub fn to_reference_lines(&self) -> String {
        self.terms
            .iter()
            .map(|t| format!("{}: {}", t.original, t.translation))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Load a glossary from a JSON array file; an absent file yields an
    /// empty glossary (a novel's first session starts from nothing)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read glossary file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse glossary file {:?}", path))
    }

    /// Persist the glossary as a pretty-printed JSON array
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.terms)
            .context("Failed to serialize glossary")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write glossary file {:?}", path))
    }
}

impl FromIterator<GlossaryTerm> for Glossary {
    fn from_iter<I: IntoIterator<Item = GlossaryTerm>>(iter: I) -> Self {
        let mut glossary = Glossary::new();
        for term in iter {
            glossary.add(term);
        }
        glossary
    }
}
