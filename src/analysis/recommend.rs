//! Bookmark-to-bookmark similarity: keyword Jaccard plus domain and title
//! bonuses.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::taxonomy;
use super::text::{jaccard, keyword_set};
use crate::bookmarks::StoredBookmark;
use crate::fetch::normalized_domain;

pub const DEFAULT_LIMIT: usize = 5;

const MIN_SCORE: f64 = 0.1;
const DOMAIN_BONUS: f64 = 0.2;
const TITLE_WEIGHT: f64 = 0.3;
const SIMILAR_TITLE_THRESHOLD: f64 = 0.3;
const MAX_REASON_KEYWORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityCandidate {
    pub bookmark_id: u64,
    pub title: String,
    pub url: String,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// The text a bookmark (or the page being saved) is compared by.
#[derive(Debug, Clone, Default)]
pub struct ContentProfile {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

impl ContentProfile {
    pub fn from_bookmark(bookmark: &StoredBookmark) -> Self {
        Self {
            url: bookmark.url.clone(),
            title: Some(bookmark.title.clone()),
            description: bookmark.description.clone(),
            summary: bookmark.summary.clone(),
            tags: bookmark.tags.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

/// A profile with its keyword sets computed once.
struct Prepared {
    domain: Option<String>,
    keywords: BTreeSet<String>,
    title_keywords: BTreeSet<String>,
}

impl Prepared {
    fn new(profile: &ContentProfile) -> Self {
        let domain = normalized_domain(&profile.url);
        let hint = domain.as_deref().map(taxonomy::domain_hint).unwrap_or("");
        let tags = profile.tags.join(" ");

        let text = [
            profile.title.as_deref().unwrap_or(""),
            profile.description.as_deref().unwrap_or(""),
            profile.summary.as_deref().unwrap_or(""),
            tags.as_str(),
            hint,
        ]
        .join(" ");

        Self {
            domain,
            keywords: keyword_set(&text),
            title_keywords: keyword_set(profile.title.as_deref().unwrap_or("")),
        }
    }
}

/// Score components of one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Similarity {
    pub keyword_overlap: f64,
    pub domain_bonus: f64,
    pub title_similarity: f64,
    pub score: f64,
    /// Same normalized domain on both sides.
    pub shared_domain: Option<String>,
    pub shared_keywords: BTreeSet<String>,
}

impl Similarity {
    fn between(input: &Prepared, candidate: &Prepared) -> Self {
        let shared_domain = match (&input.domain, &candidate.domain) {
            (Some(a), Some(b)) if a == b => Some(a.clone()),
            _ => None,
        };

        if input.keywords.is_empty() || candidate.keywords.is_empty() {
            return Self {
                keyword_overlap: 0.0,
                domain_bonus: 0.0,
                title_similarity: 0.0,
                score: 0.0,
                shared_domain,
                shared_keywords: BTreeSet::new(),
            };
        }

        let keyword_overlap = jaccard(&input.keywords, &candidate.keywords);
        let domain_bonus = if shared_domain.is_some() { DOMAIN_BONUS } else { 0.0 };
        let title_similarity = jaccard(&input.title_keywords, &candidate.title_keywords);
        let score = (keyword_overlap + domain_bonus + TITLE_WEIGHT * title_similarity).min(1.0);

        Self {
            keyword_overlap,
            domain_bonus,
            title_similarity,
            score,
            shared_domain,
            shared_keywords: input
                .keywords
                .intersection(&candidate.keywords)
                .cloned()
                .collect(),
        }
    }

    /// Human readable explanations, most specific first.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();

        if let Some(domain) = &self.shared_domain {
            reasons.push(format!("Same domain ({domain})"));
        }

        if !self.shared_keywords.is_empty() {
            let keywords: Vec<&str> = self
                .shared_keywords
                .iter()
                .take(MAX_REASON_KEYWORDS)
                .map(String::as_str)
                .collect();
            reasons.push(format!("Common keywords: {}", keywords.join(", ")));
        }

        if self.title_similarity > SIMILAR_TITLE_THRESHOLD {
            reasons.push("Similar titles".to_string());
        }

        reasons
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRecommender;

impl SimilarityRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Bookmarks most similar to `input`, best first. Equal scores keep
    /// the order of `bookmarks`.
    pub fn rank(
        &self,
        input: &ContentProfile,
        bookmarks: &[StoredBookmark],
        limit: usize,
    ) -> Vec<SimilarityCandidate> {
        if limit == 0 {
            return vec![];
        }

        let prepared_input = Prepared::new(input);
        let input_url = input.url.to_lowercase();

        let mut scored: Vec<(usize, SimilarityCandidate)> = bookmarks
            .par_iter()
            .enumerate()
            .filter(|(_, bookmark)| bookmark.url.to_lowercase() != input_url)
            .filter_map(|(idx, bookmark)| {
                let candidate = Prepared::new(&ContentProfile::from_bookmark(bookmark));
                let similarity = Similarity::between(&prepared_input, &candidate);
                log::trace!(
                    "{}: overlap={:.3} domain={:.1} title={:.3}",
                    bookmark.url,
                    similarity.keyword_overlap,
                    similarity.domain_bonus,
                    similarity.title_similarity
                );

                if similarity.score <= MIN_SCORE {
                    return None;
                }

                Some((
                    idx,
                    SimilarityCandidate {
                        bookmark_id: bookmark.id,
                        title: bookmark.title.clone(),
                        url: bookmark.url.clone(),
                        score: similarity.score,
                        reasons: similarity.reasons(),
                    },
                ))
            })
            .collect();

        scored.sort_by(|(a_idx, a), (b_idx, b)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a_idx.cmp(b_idx))
        });
        scored.truncate(limit);

        log::debug!(
            "{} of {} bookmarks similar to {}",
            scored.len(),
            bookmarks.len(),
            input.url
        );

        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}
