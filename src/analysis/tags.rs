//! Tag suggestions by weighted voting over the keyword taxonomies.
//!
//! Each source (domain, URL path, content type, technology, topic) votes
//! independently into one `tag -> weight` map; a tag collects one vote per
//! source at most.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::taxonomy::{self, KeywordTable};
use super::text::contains_any;
use crate::fetch::netloc_and_path;

/// Hard cap on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 8;

const DOMAIN_WEIGHT: u32 = 1;
const PATH_WEIGHT: u32 = 2;
const CONTENT_WEIGHT: u32 = 3;
const TECHNOLOGY_WEIGHT: u32 = 4;
const TOPIC_WEIGHT: u32 = 3;

/// Weight floors tried in order until enough suggestions survive.
const WEIGHT_THRESHOLDS: &[u32] = &[3, 2, LOWEST_WEIGHT_THRESHOLD];
const LOWEST_WEIGHT_THRESHOLD: u32 = 1;
const MIN_CONFIDENT_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub name: String,
    pub weight: u32,
}

/// Everything known about a page when suggesting tags for it.
#[derive(Debug, Clone, Default)]
pub struct TagContext {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    /// Fetched signals that did not win a field, e.g. a fetched title when
    /// the caller supplied their own, or meta keywords.
    pub extra_context: Vec<String>,
}

impl TagContext {
    /// Lower-cased text blob; the title counts twice.
    pub fn combined_text(&self) -> String {
        let mut pieces: Vec<&str> = Vec::new();

        if let Some(title) = self.title.as_deref() {
            pieces.push(title);
            pieces.push(title);
        }
        pieces.extend(self.description.as_deref());
        pieces.extend(self.summary.as_deref());
        pieces.extend(self.extra_context.iter().map(String::as_str));
        pieces.push(&self.url);

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

#[derive(Debug, Clone)]
pub struct TagSuggester {
    max_suggestions: usize,
}

impl Default for TagSuggester {
    fn default() -> Self {
        Self::new(MAX_SUGGESTIONS)
    }
}

impl TagSuggester {
    pub fn new(max_suggestions: usize) -> Self {
        Self {
            max_suggestions: max_suggestions.clamp(1, MAX_SUGGESTIONS),
        }
    }

    /// Raw votes for every candidate tag, keyed by tag name.
    pub fn score(&self, context: &TagContext) -> BTreeMap<String, u32> {
        let mut scores = BTreeMap::new();
        let (netloc, path) = netloc_and_path(&context.url);
        let text = context.combined_text();

        vote(&mut scores, taxonomy::domain_tags(&netloc).iter().copied(), DOMAIN_WEIGHT);

        let path_tags = taxonomy::PATH_TAGS
            .iter()
            .filter(|(fragment, _)| path.contains(fragment))
            .map(|(_, tag)| *tag);
        vote(&mut scores, path_tags, PATH_WEIGHT);

        vote(&mut scores, table_matches(taxonomy::CONTENT_TAGS, &text), CONTENT_WEIGHT);
        vote(&mut scores, table_matches(taxonomy::TECHNOLOGY_TAGS, &text), TECHNOLOGY_WEIGHT);
        vote(&mut scores, table_matches(taxonomy::TOPIC_TAGS, &text), TOPIC_WEIGHT);

        scores
    }

    /// Ranked suggestions, minus anything in `existing_tags`
    /// (case-insensitive). Ties are broken alphabetically.
    pub fn suggest_scored(&self, context: &TagContext, existing_tags: &[String]) -> Vec<TagSuggestion> {
        let existing: HashSet<String> = existing_tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .collect();

        // BTreeMap iteration is alphabetical and the sort is stable
        let mut ranked: Vec<TagSuggestion> = self
            .score(context)
            .into_iter()
            .filter(|(name, _)| !existing.contains(name))
            .map(|(name, weight)| TagSuggestion { name, weight })
            .collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight));

        let floor = WEIGHT_THRESHOLDS
            .iter()
            .copied()
            .find(|floor| {
                ranked.iter().filter(|s| s.weight >= *floor).count() >= MIN_CONFIDENT_SUGGESTIONS
            })
            .unwrap_or(LOWEST_WEIGHT_THRESHOLD);

        let mut kept: Vec<TagSuggestion> = ranked
            .iter()
            .filter(|s| s.weight >= floor)
            .cloned()
            .collect();
        kept.truncate(self.max_suggestions);
        log::debug!(
            "{}: {} tag suggestions from {} candidates",
            context.url,
            kept.len(),
            ranked.len()
        );
        kept
    }

    pub fn suggest(&self, context: &TagContext, existing_tags: &[String]) -> Vec<String> {
        self.suggest_scored(context, existing_tags)
            .into_iter()
            .map(|s| s.name)
            .collect()
    }
}

fn table_matches<'a>(table: KeywordTable, text: &'a str) -> impl Iterator<Item = &'static str> + 'a {
    table
        .iter()
        .filter(move |(_, terms)| contains_any(text, terms))
        .map(|(tag, _)| *tag)
}

fn vote<'a>(scores: &mut BTreeMap<String, u32>, tags: impl Iterator<Item = &'a str>, weight: u32) {
    let unique: BTreeSet<String> = tags.map(str::to_lowercase).collect();
    for tag in unique {
        *scores.entry(tag).or_insert(0) += weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(url: &str, title: Option<&str>, description: Option<&str>) -> TagContext {
        TagContext {
            url: url.to_string(),
            title: title.map(String::from),
            description: description.map(String::from),
            ..Default::default()
        }
    }

    fn names(suggestions: &[TagSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_combined_text_weights_title_twice() {
        let ctx = TagContext {
            url: "https://Example.com/X".into(),
            title: Some("Rust Guide".into()),
            description: Some("All about it".into()),
            summary: Some("  ".into()),
            extra_context: vec!["extra".into()],
        };
        assert_eq!(
            ctx.combined_text(),
            "rust guide rust guide all about it extra https://example.com/x"
        );
    }

    #[test]
    fn test_domain_votes_weight_one() {
        let scores = TagSuggester::default().score(&context("https://github.com/foo/bar", None, None));
        assert_eq!(scores.get("development"), Some(&1));
        assert_eq!(scores.get("programming"), Some(&1));
        // "github" in the url text also triggers the topic table
        assert_eq!(scores.get("open-source"), Some(&3));
    }

    #[test]
    fn test_github_url_alone_suggests_development() {
        let tags = TagSuggester::default().suggest(&context("https://github.com/foo/bar", None, None), &[]);
        assert!(tags.contains(&"development".to_string()));
        assert_eq!(tags[0], "open-source");
    }

    #[test]
    fn test_low_weight_tags_dropped_when_three_confident() {
        let ctx = context(
            "https://github.com/acme/blog/post",
            Some("Rust and Docker deployment"),
            None,
        );
        let suggester = TagSuggester::default();
        let scores = suggester.score(&ctx);
        assert_eq!(scores.get("article"), Some(&2));
        assert_eq!(scores.get("development"), Some(&1));

        let suggestions = suggester.suggest_scored(&ctx, &[]);
        assert_eq!(names(&suggestions), vec!["docker", "rust", "deployment", "open-source"]);
        assert!(suggestions.iter().all(|s| s.weight >= 3));
    }

    #[test]
    fn test_threshold_relaxes_to_two() {
        let ctx = context("https://reddit.com/r/k8s/docs/blog", Some("Kubernetes notes"), None);
        let suggester = TagSuggester::default();
        let scores = suggester.score(&ctx);
        assert_eq!(scores.get("community"), Some(&1));

        let suggestions = suggester.suggest_scored(&ctx, &[]);
        assert_eq!(
            names(&suggestions),
            vec!["kubernetes", "reference", "article", "documentation"]
        );
        assert!(suggestions.iter().all(|s| s.weight >= 2));
    }

    #[test]
    fn test_path_votes_weight_two() {
        let scores = TagSuggester::default().score(&context("https://example.org/blog/2024/post", None, None));
        assert_eq!(scores.get("article"), Some(&2));
    }

    #[test]
    fn test_sources_accumulate() {
        let ctx = context(
            "https://acme.dev/tutorial/python-basics",
            Some("Learn Python step by step"),
            Some("A beginner tutorial covering pandas and numpy"),
        );
        let scores = TagSuggester::default().score(&ctx);
        // path (+2) and content (+3)
        assert_eq!(scores.get("tutorial"), Some(&5));
        assert_eq!(scores.get("python"), Some(&4));
    }

    #[test]
    fn test_ranked_by_weight_then_name() {
        let ctx = context(
            "https://acme.dev/post",
            Some("Deploying Rust services with Docker"),
            Some("A walkthrough of containerization and deployment"),
        );
        let suggestions = TagSuggester::default().suggest_scored(&ctx, &[]);
        assert_eq!(names(&suggestions), vec!["docker", "rust", "deployment", "tutorial"]);
        assert!(suggestions.windows(2).all(|w| w[0].weight >= w[1].weight));
    }

    #[test]
    fn test_existing_tags_are_skipped_case_insensitively() {
        let ctx = context(
            "https://acme.dev/post",
            Some("Deploying Rust services with Docker"),
            None,
        );
        let existing = vec!["DOCKER".to_string(), " Rust ".to_string()];
        let tags = TagSuggester::default().suggest(&ctx, &existing);
        assert!(!tags.iter().any(|t| t == "docker" || t == "rust"));
    }

    #[test]
    fn test_never_more_than_max() {
        let ctx = context(
            "https://github.com/tutorial/docs/video/app",
            Some("Python JavaScript TypeScript Java Rust Go Docker Kubernetes AWS React Vue guide"),
            Some("A review course with research, examples, podcast and video, plus security and testing"),
        );
        let suggester = TagSuggester::default();
        assert!(suggester.score(&ctx).len() > MAX_SUGGESTIONS);
        assert_eq!(suggester.suggest(&ctx, &[]).len(), MAX_SUGGESTIONS);
        assert_eq!(TagSuggester::new(3).suggest(&ctx, &[]).len(), 3);
        assert_eq!(TagSuggester::new(50).suggest(&ctx, &[]).len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_no_signal_no_tags() {
        let tags = TagSuggester::default().suggest(&context("https://acme.dev/", None, None), &[]);
        assert!(tags.is_empty());
    }
}
