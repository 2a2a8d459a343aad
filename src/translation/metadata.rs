/*!
 * Genre/tag metadata generated from a novel's title and description.
 *
 * Metadata is optional enrichment: any failure along the way (backend error,
 * malformed JSON) degrades to empty arrays so the publishing pipeline can
 * proceed without it.
 */

use serde::{Deserialize, Serialize};

/// Generated classification metadata for one novel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovelMetadata {
    /// Suggested genres
    #[serde(default)]
    pub genres: Vec<String>,

    /// Suggested tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Strip a surrounding markdown code fence from a model response.
///
/// Models frequently wrap requested JSON in ```json fences despite
/// instructions not to; the payload inside is usually fine.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string ("json", "JSON", ...) up to the first newline
    let body = match rest.find('\n') {
        Some(at) => &rest[at + 1..],
        None => rest,
    };

    body.trim_end().trim_end_matches("```").trim()
}

/// Parse a metadata response into genre/tag arrays; None when malformed
pub fn parse_metadata_response(content: &str) -> Option<NovelMetadata> {
    serde_json::from_str(strip_code_fences(content)).ok()
}
