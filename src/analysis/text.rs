//! Text helpers shared by the extractor, the summarizer and the scorers.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

static KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("Failed to compile keyword regex"));

/// Words ignored when building keyword sets.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "you", "your", "this", "but",
    "or", "if", "can", "could", "should", "would", "may", "might",
];

/// Keep at most `max` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Trimmed, non-empty `text` or `None`.
pub fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// True when `term` occurs in `text` as a whole term.
///
/// An alphanumeric edge of `term` must not touch another alphanumeric
/// character, except that a single trailing `s` is accepted so that plural
/// forms still match. Both arguments are expected to be lower-cased.
pub fn contains_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    let starts_alnum = term.chars().next().is_some_and(char::is_alphanumeric);
    let ends_alnum = term.chars().next_back().is_some_and(char::is_alphanumeric);

    text.match_indices(term).any(|(start, _)| {
        let before_ok = !starts_alnum
            || text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = !ends_alnum || is_term_end(&text[start + term.len()..]);
        before_ok && after_ok
    })
}

fn is_term_end(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        None => true,
        Some('s') => chars.next().map_or(true, |c| !c.is_alphanumeric()),
        Some(c) => !c.is_alphanumeric(),
    }
}

/// Any of `terms` occurs in `text` (see [`contains_term`]).
pub fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_term(text, term))
}

/// Lower-cased alphabetic words of at least three letters, minus stop words.
pub fn keyword_set(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    KEYWORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// |a ∩ b| / |a ∪ b|, zero when either side is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("ééééé", 2), "éé");
        assert_eq!(truncate_chars("", 2), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_contains_term_respects_word_edges() {
        assert!(contains_term("learn go today", "go"));
        assert!(!contains_term("google search", "go"));
        assert!(contains_term("react hooks guide", "react"));
        assert!(!contains_term("reactive streams", "react"));
        assert!(contains_term("written in c# and f#", "c#"));
        assert!(contains_term("next.js app router", "next.js"));
        assert!(contains_term("asp.net core", ".net"));
        assert!(contains_term("how to deploy", "how to"));
    }

    #[test]
    fn test_contains_term_accepts_plural() {
        assert!(contains_term("all the tools you need", "tool"));
        assert!(contains_term("neural networks explained", "neural network"));
        assert!(!contains_term("toolset", "tool"));
    }

    #[test]
    fn test_keyword_set_filters_stop_words_and_short_words() {
        let keywords = keyword_set("The Rust programming language, and it is FAST: 42 go");
        let expected: BTreeSet<String> = ["rust", "programming", "language", "fast"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_jaccard() {
        let a = keyword_set("rust programming guide");
        let b = keyword_set("python programming guide");
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-9);
        assert_eq!(jaccard(&a, &BTreeSet::new()), 0.0);
        assert!((jaccard(&a, &a) - 1.0).abs() < 1e-9);
    }
}
