/*!
 * Paragraph-boundary chunking for length-capped translation backends.
 *
 * The free backend rejects oversized requests, so long chapter bodies are
 * split on paragraph boundaries (double line-break) and greedily packed into
 * chunks under a character budget, separators included. Chunks never split a
 * paragraph; a single paragraph longer than the budget becomes its own
 * oversized chunk rather than being cut mid-sentence.
 */

/// Paragraph separator used throughout the pipeline
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Greedily pack paragraphs into chunks of at most `max_chars` characters.
///
/// Paragraph order is preserved and every paragraph lands in exactly one
/// chunk. Rejoining the chunks with [`PARAGRAPH_SEPARATOR`] reproduces the
/// input's paragraph sequence.
pub fn pack_paragraphs(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        let paragraph_len = paragraph.chars().count();

        // a non-leading paragraph also costs the separator it rejoins with
        let cost = if current.is_empty() {
            paragraph_len
        } else {
            paragraph_len + PARAGRAPH_SEPARATOR.len()
        };

        if current_len + cost > max_chars && !current.is_empty() {
            chunks.push(current.join(PARAGRAPH_SEPARATOR));
            current = vec![paragraph];
            current_len = paragraph_len;
        } else {
            current.push(paragraph);
            current_len += cost;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(PARAGRAPH_SEPARATOR));
    }

    chunks
}
