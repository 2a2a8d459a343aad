/*!
 * Line grammar for model-proposed glossary terms.
 *
 * Extraction and compaction both ask the model for plain `Original:
 * Translation` lines rather than structured markup, because free-text lines
 * survive minor formatting drift that breaks JSON output. The grammar is:
 *
 * - a line qualifies iff it contains a separator (`:` or full-width `：`)
 * - the line splits on the first separator occurrence
 * - both fields are stripped of list markers and emphasis decoration
 * - pairs with an empty side after cleanup are discarded
 *
 * Lines that fail the grammar are dropped silently; partial success is
 * acceptable for noisy model output.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading list decoration: bullets, dashes, or `1.` / `1)` numbering
static LEADING_DECORATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•\s]+|\d+[.)]\s*)+").expect("valid decoration pattern"));

/// Parse every qualifying `Original: Translation` line in a model response
pub fn parse_term_lines(response: &str) -> Vec<(String, String)> {
    response.lines().filter_map(parse_term_line).collect()
}

/// Parse a single line; None when the line does not fit the grammar
pub fn parse_term_line(line: &str) -> Option<(String, String)> {
    let separator_at = line.find([':', '：'])?;
    let (raw_original, rest) = line.split_at(separator_at);

    // skip past the separator character itself (it may be multi-byte)
    let separator = rest.chars().next()?;
    let raw_translation = &rest[separator.len_utf8()..];

    let original = clean_field(raw_original);
    let translation = clean_field(raw_translation);

    if original.is_empty() || translation.is_empty() {
        return None;
    }

    Some((original, translation))
}

/// Strip bullet markers, emphasis characters, and surrounding whitespace
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_markers = LEADING_DECORATION.replace(trimmed, "");
    without_markers
        .trim_matches(|c: char| c == '*' || c == '`' || c == '"' || c.is_whitespace())
        .to_string()
}
