//! Extractive summaries: pick the most descriptive sentences of a page.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::text::{char_len, collapse_whitespace, contains_any, contains_term, truncate_chars, word_count};

/// Descriptions longer than this are used verbatim.
const MIN_DESCRIPTION_CHARS: usize = 20;
const MIN_SENTENCE_WORDS: usize = 4;
/// Number of leading sentences considered for scoring.
const SCORING_WINDOW: usize = 10;
const MAX_SUMMARY_SENTENCES: usize = 3;
/// Budget for the summed length of the selected sentences.
const SUMMARY_BUDGET_CHARS: usize = 200;
const MAX_SUMMARY_CHARS: usize = 250;

const IDEAL_LENGTH_BONUS: f64 = 1.0;
const SHORT_LENGTH_BONUS: f64 = 0.3;
const CATEGORY_BONUS: f64 = 0.5;
const TITLE_TERM_BONUS: f64 = 0.3;
const BOILERPLATE_PENALTY: f64 = 0.5;

/// Words hinting at what kind of page this is, grouped so each group
/// counts once per sentence.
const DESCRIPTIVE_CATEGORIES: &[(&str, &[&str])] = &[
    ("learning", &["tutorial", "guide", "learn", "how to", "step", "course", "lesson"]),
    ("reference", &["documentation", "docs", "manual", "reference", "faq"]),
    ("editorial", &["article", "blog", "news", "story", "report", "information"]),
    ("product", &["tool", "service", "platform", "app", "software", "product"]),
    ("review", &["review", "comparison", "analysis", "research"]),
    ("organization", &["company", "organization", "business"]),
    ("offering", &["provides", "offers", "features", "includes", "allows", "helps"]),
];

const BOILERPLATE_WORDS: &[&str] = &["cookie", "privacy", "terms", "subscribe", "newsletter"];

const DESCRIPTIVE_VERBS: &[&str] = &["provides", "offers", "features", "helps", "allows", "about"];

static SENTENCE_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Failed to compile sentence regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    /// Built from scored content sentences.
    Smart,
    /// Meta description used as-is.
    Meta,
    /// Heuristic single sentence or title fallback.
    Basic,
    #[serde(rename = "none")]
    NoSummary,
    /// The page could not be fetched or parsed.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub summary_method: SummaryMethod,
    pub content_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            title: None,
            description: None,
            summary: None,
            summary_method: SummaryMethod::Error,
            content_length: 0,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryGenerator;

impl SummaryGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
    ) -> SummaryResult {
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let description = description.map(str::trim).filter(|d| !d.is_empty());
        let content = content.map(collapse_whitespace).filter(|c| !c.is_empty());

        let (summary, summary_method) = self.choose_summary(title, description, content.as_deref());

        SummaryResult {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            summary,
            summary_method,
            content_length: content.as_deref().map_or(0, char_len),
            error: None,
        }
    }

    fn choose_summary(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
    ) -> (Option<String>, SummaryMethod) {
        if let Some(description) = description {
            if char_len(description) > MIN_DESCRIPTION_CHARS {
                return (Some(description.to_string()), SummaryMethod::Meta);
            }
        }

        if let Some(content) = content {
            let sentences = split_sentences(content);

            if let Some(summary) = extractive_summary(&sentences, title) {
                return (Some(summary), SummaryMethod::Smart);
            }

            if let Some(sentence) = descriptive_sentence(&sentences) {
                return (Some(sentence), SummaryMethod::Basic);
            }
        }

        match title {
            Some(title) => (Some(format!("Page titled: {title}")), SummaryMethod::Basic),
            None => (None, SummaryMethod::NoSummary),
        }
    }
}

/// Sentences of at least `MIN_SENTENCE_WORDS` words, terminal punctuation
/// stripped.
fn split_sentences(content: &str) -> Vec<&str> {
    SENTENCE_END_REGEX
        .split(content)
        .map(str::trim)
        .filter(|s| word_count(s) >= MIN_SENTENCE_WORDS)
        .collect()
}

fn title_terms(title: Option<&str>) -> BTreeSet<String> {
    title
        .map(|t| {
            t.to_lowercase()
                .split_whitespace()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
                .filter(|w| w.chars().count() > 3)
                .collect()
        })
        .unwrap_or_default()
}

fn score_sentence(sentence: &str, position: usize, title_terms: &BTreeSet<String>) -> f64 {
    let lowered = sentence.to_lowercase();
    let mut score = 0.0;

    // earlier sentences carry the topic; reaches 0 at the end of the window
    score += SCORING_WINDOW.saturating_sub(position) as f64 / SCORING_WINDOW as f64;

    let words = word_count(sentence);
    if (8..=30).contains(&words) {
        score += IDEAL_LENGTH_BONUS;
    } else if words < 8 {
        score += SHORT_LENGTH_BONUS;
    }

    score += DESCRIPTIVE_CATEGORIES
        .iter()
        .filter(|(_, words)| contains_any(&lowered, words))
        .count() as f64
        * CATEGORY_BONUS;

    score += title_terms
        .iter()
        .filter(|term| contains_term(&lowered, term))
        .count() as f64
        * TITLE_TERM_BONUS;

    score -= BOILERPLATE_WORDS
        .iter()
        .filter(|word| contains_term(&lowered, word))
        .count() as f64
        * BOILERPLATE_PENALTY;

    score.max(0.0)
}

fn extractive_summary(sentences: &[&str], title: Option<&str>) -> Option<String> {
    let terms = title_terms(title);

    let mut scored: Vec<(f64, usize, &str)> = sentences
        .iter()
        .take(SCORING_WINDOW)
        .enumerate()
        .map(|(position, sentence)| (score_sentence(sentence, position, &terms), position, *sentence))
        .filter(|(score, _, _)| *score > 0.0)
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    let mut parts = Vec::new();
    let mut total = 0;
    for (_, _, sentence) in scored.iter().take(MAX_SUMMARY_SENTENCES) {
        let len = char_len(sentence);
        if total + len > SUMMARY_BUDGET_CHARS {
            break;
        }
        parts.push(*sentence);
        total += len;
    }

    if parts.is_empty() {
        return None;
    }

    Some(finish_sentence(parts.join(". ")))
}

fn descriptive_sentence(sentences: &[&str]) -> Option<String> {
    let verb_sentence = sentences
        .iter()
        .take(5)
        .find(|s| contains_any(&s.to_lowercase(), DESCRIPTIVE_VERBS));

    let sentence = verb_sentence.or_else(|| sentences.iter().take(3).find(|s| word_count(s) >= 5))?;

    Some(finish_sentence(truncate_chars(sentence, MAX_SUMMARY_CHARS - 1)))
}

fn finish_sentence(mut text: String) -> String {
    if !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarize(title: Option<&str>, description: Option<&str>, content: Option<&str>) -> SummaryResult {
        SummaryGenerator::new().summarize(title, description, content)
    }

    #[test]
    fn test_meta_description_used_verbatim() {
        let description = "A 60-character description of the page goes here now.";
        let result = summarize(None, Some(description), Some("Some other content that is long enough here."));
        assert_eq!(result.summary_method, SummaryMethod::Meta);
        assert_eq!(result.summary.as_deref(), Some(description));
    }

    #[test]
    fn test_short_description_is_not_enough() {
        let result = summarize(None, Some("exactly twenty chars"), None);
        assert_eq!(result.summary_method, SummaryMethod::NoSummary);
        assert_eq!(result.summary, None);
        assert_eq!(result.description.as_deref(), Some("exactly twenty chars"));
    }

    #[test]
    fn test_smart_summary_ranks_and_drops_boilerplate() {
        let content = "Rust is a systems programming language that runs blazingly fast and prevents segfaults. \
            Accept all cookies to continue and read our privacy policy and terms. \
            This guide helps you learn ownership step by step with many examples.";
        let result = summarize(Some("Rust Ownership Guide"), None, Some(content));

        assert_eq!(result.summary_method, SummaryMethod::Smart);
        assert_eq!(
            result.summary.as_deref(),
            Some(
                "This guide helps you learn ownership step by step with many examples. \
                 Rust is a systems programming language that runs blazingly fast and prevents segfaults."
            )
        );
    }

    #[test]
    fn test_smart_summary_respects_budget() {
        let sentence = "This sentence describes the tutorial in enough words to count as ideal length";
        let content = vec![sentence; 6].join(". ");
        let result = summarize(None, None, Some(&content));

        assert_eq!(result.summary_method, SummaryMethod::Smart);
        let summary = result.summary.unwrap();
        assert!(summary.chars().count() <= MAX_SUMMARY_CHARS);
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn test_all_boilerplate_falls_back_to_basic() {
        let content = "Subscribe to our newsletter for cookie privacy terms updates today";
        let result = summarize(None, None, Some(content));
        assert_eq!(result.summary_method, SummaryMethod::Basic);
        assert_eq!(result.summary.as_deref(), Some(format!("{content}.").as_str()));
    }

    #[test]
    fn test_basic_prefers_descriptive_verb_sentence() {
        let content = "Subscribe to our newsletter for cookie privacy terms updates today. \
            Read the cookie privacy terms and newsletter subscribe notice. \
            This notice is about cookie privacy terms newsletter subscribe rules.";
        let result = summarize(None, None, Some(content));
        assert_eq!(result.summary_method, SummaryMethod::Basic);
        assert_eq!(
            result.summary.as_deref(),
            Some("This notice is about cookie privacy terms newsletter subscribe rules.")
        );
    }

    #[test]
    fn test_short_fragment_without_title_has_no_summary() {
        let result = summarize(None, None, Some("Hello there friend"));
        assert_eq!(result.summary, None);
        assert_eq!(result.summary_method, SummaryMethod::NoSummary);
        assert_eq!(result.content_length, 18);
    }

    #[test]
    fn test_title_only_is_synthesized() {
        let result = summarize(Some("Example Domain"), None, Some("Hello there friend"));
        assert_eq!(result.summary.as_deref(), Some("Page titled: Example Domain"));
        assert_eq!(result.summary_method, SummaryMethod::Basic);
    }

    #[test]
    fn test_nothing_at_all() {
        let result = summarize(None, None, None);
        assert_eq!(result.summary, None);
        assert_eq!(result.summary_method, SummaryMethod::NoSummary);
        assert_eq!(result.content_length, 0);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let content = "Docker helps you ship apps. Containers are portable units of software. \
            Kubernetes offers orchestration for containers at scale across many machines. \
            Read the docs to get started with your first cluster today.";
        let first = summarize(Some("Containers"), Some("short"), Some(content));
        for _ in 0..5 {
            assert_eq!(summarize(Some("Containers"), Some("short"), Some(content)), first);
        }
    }

    #[test]
    fn test_failed_result() {
        let result = SummaryResult::failed("fetch failed: HTTP status 404");
        assert_eq!(result.summary_method, SummaryMethod::Error);
        assert!(result.error.is_some());
        assert!(result.title.is_none() && result.description.is_none() && result.summary.is_none());
    }

    #[test]
    fn test_method_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SummaryMethod::NoSummary).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&SummaryMethod::Smart).unwrap(), "\"smart\"");
    }
}
