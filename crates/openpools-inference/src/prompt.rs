//! Keyword extraction prompt.

use openpools_core::{Category, Source};

/// Build the system prompt listing the allowed categories.
pub fn system_prompt() -> String {
    let categories: Vec<&str> = Category::KNOWN.iter().map(|c| c.as_str()).collect();
    format!(
        "You extract professional keywords from documents about a person. \
         Respond with a single JSON object of the form \
         {{\"keywords\": [{{\"keyword\": \"...\", \"category\": \"...\"}}]}}. \
         Allowed categories: {}. \
         Use short canonical names (\"PostgreSQL\", not \"experience with PostgreSQL databases\"). \
         Do not invent keywords that the text does not support. \
         Return an empty list when nothing relevant is present.",
        categories.join(", ")
    )
}

/// Build the user message for a document of the given source.
pub fn user_prompt(text: &str, source: &Source, max_chars: usize) -> String {
    format!(
        "Source: {}\n\n{}",
        source,
        truncate_chars(text.trim(), max_chars)
    )
}

/// Truncate on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
