/*!
 * Prompt construction for translation, term extraction, compaction, and
 * metadata generation.
 *
 * All glossary-bearing prompts serialize the glossary deterministically in
 * insertion order so identical sessions produce identical prompts.
 */

use crate::glossary::Glossary;

/// Default system prompt for chapter-body translation
pub fn body_translation(source_language: &str, target_language: &str) -> String {
    format!(
        "You are a professional translator translating {} to {}. \
         Maintain the original formatting, tone, and style. Preserve all HTML \
         tags if present. Do not add any introductory or concluding remarks, \
         just output the translation.",
        source_language, target_language
    )
}

/// System prompt for story titles: concise, title case, no commentary
pub fn title_translation(source_language: &str, target_language: &str) -> String {
    format!(
        "You are a professional translator translating a story title from {} \
         to {}. Render it in title case, keep it concise, and output only the \
         translated title with no notes or alternatives.",
        source_language, target_language
    )
}

/// System prompt for story descriptions: natural flow over literalism
pub fn description_translation(source_language: &str, target_language: &str) -> String {
    format!(
        "You are a professional translator translating a story description \
         from {} to {}. Favor natural flow, fix sentence fragments, and \
         translate the full text without summarizing. Output only the \
         translated description.",
        source_language, target_language
    )
}

/// Glossary reference block appended to a translation system prompt
pub fn glossary_reference(glossary: &Glossary) -> String {
    format!(
        "\n\nReference this glossary for consistent translation of names and terms:\n{}",
        glossary.to_reference_lines()
    )
}

/// Prompt asking the model to propose new glossary terms from chapter text.
///
/// Structured-markup output from language models is unreliable, so the
/// prompt asks for bare `Original: Translation` lines and explicitly forbids
/// JSON and markdown.
pub fn term_extraction(text: &str, glossary: &Glossary, max_new_terms: usize) -> String {
    let mut prompt = format!(
        "Analyze the following fiction text. Identify up to {} key proper \
         names (characters, locations, organizations) and specific invented \
         terms that are NOT already in the known list below. Answer with one \
         term per line in the exact form `Original: Translation`. Do not use \
         JSON, markdown, bullets, or any other markup. If there are no new \
         terms, answer with an empty line.",
        max_new_terms
    );

    if glossary.is_empty() {
        prompt.push_str("\n\nKnown terms: none yet.");
    } else {
        prompt.push_str("\n\nKnown terms (do not repeat these):\n");
        let originals: Vec<&str> = glossary.iter().map(|t| t.original.as_str()).collect();
        prompt.push_str(&originals.join("\n"));
    }

    prompt.push_str("\n\nText:\n");
    prompt.push_str(text);
    prompt
}

/// Prompt asking the model to keep only the most important glossary entries
pub fn glossary_compaction(glossary: &Glossary, target_size: usize) -> String {
    format!(
        "The following translation glossary for a serialized novel has grown \
         too large. Keep only the {} most narratively important entries: \
         protagonists, major recurring characters, major locations, and \
         recurring invented terms. Drop minor characters and one-off terms. \
         Answer with the kept entries only, one per line, in the exact form \
         `Original: Translation`, with no markup and no commentary.\n\n\
         Glossary:\n{}",
        target_size,
        glossary.to_reference_lines()
    )
}

/// Prompt asking for genre/tag metadata as strict JSON
pub fn metadata_generation(title: &str, description: &str) -> String {
    format!(
        "Based on this story's title and description, choose fitting genres \
         and tags for a web-fiction site. Answer with strict JSON of the \
         shape {{\"genres\": [\"...\"], \"tags\": [\"...\"]}} and nothing \
         else: no prose, no markdown fences.\n\nTitle: {}\n\nDescription:\n{}",
        title, description
    )
}
