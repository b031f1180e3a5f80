use regex::Regex;
use std::sync::LazyLock;

// A newline, any whitespace, then another newline: at least one blank line.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

/// Split a document into trimmed, non-empty paragraphs on blank-line boundaries.
pub fn split_into_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
