use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};

use super::text::{char_len, collapse_whitespace, truncate_chars};
use super::{AnalysisError, AnalysisResult};
use crate::fetch::PageFetcher;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 300;
pub const MAX_KEYWORDS_CHARS: usize = 300;
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Minimum flattened length for a content container to be accepted.
pub const CONTENT_THRESHOLD_DEFAULT: usize = 150;

const MIN_PARAGRAPH_CHARS: usize = 50;
const MAX_FALLBACK_PARAGRAPHS: usize = 5;

/// Subtrees that never count as page content.
const IGNORED_ELEMENTS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "button", "noscript",
    "template",
];

/// Containers probed for the main text, in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role=main]",
    ".content",
    ".post-content",
    ".entry-content",
    ".article-content",
    "#content",
    ".container",
];

static CONTENT_SELECTOR_LIST: Lazy<Vec<Selector>> = Lazy::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("Failed to parse content selector"))
        .collect()
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("Failed to parse title selector"));
static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("Failed to parse meta selector"));
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("Failed to parse h1 selector"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to parse p selector"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Failed to parse body selector"));

/// Signals pulled out of one fetched page. Every text field is already
/// truncated to its maximum length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPage {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub main_content: Option<String>,
    pub content_length: usize,
    /// Set when the page could not be fetched; every other field is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractedPage {
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageExtractor {
    content_threshold: usize,
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new(CONTENT_THRESHOLD_DEFAULT)
    }
}

impl PageExtractor {
    pub fn new(content_threshold: usize) -> Self {
        Self { content_threshold }
    }

    /// Single GET through `fetcher`, then [`PageExtractor::parse`]. A body
    /// that cannot be parsed counts as an empty page; only transport
    /// failures are returned.
    pub fn extract(&self, fetcher: &dyn PageFetcher, url: &str) -> AnalysisResult<ExtractedPage> {
        let body = match fetcher.get(url) {
            Ok(response) => {
                log::debug!("{url}: status {}, {} bytes", response.status, response.body.len());
                response.body
            }
            Err(err @ AnalysisError::Parse { .. }) => {
                log::warn!("{url}: {err}, treating as empty page");
                String::new()
            }
            Err(err) => return Err(err),
        };

        Ok(self.parse(url, &body))
    }

    pub fn parse(&self, url: &str, html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        let title = extract_title(&document);
        let description = extract_description(&document);
        let keywords = meta_content(&document, &["keywords"])
            .map(|k| truncate_chars(&k, MAX_KEYWORDS_CHARS));
        let main_content = self.extract_main_content(&document);
        let content_length = main_content.as_deref().map_or(0, char_len);

        log::debug!(
            "{url}: title={} description={} content_length={content_length}",
            title.is_some(),
            description.is_some()
        );

        ExtractedPage {
            url: url.to_string(),
            title,
            description,
            keywords,
            main_content,
            content_length,
            error: None,
        }
    }

    fn extract_main_content(&self, document: &Html) -> Option<String> {
        for selector in CONTENT_SELECTOR_LIST.iter() {
            let Some(element) = document.select(selector).find(|el| !has_ignored_ancestor(el))
            else {
                continue;
            };

            let text = flatten_text(element);
            if char_len(&text) > self.content_threshold {
                return Some(truncate_chars(&text, MAX_CONTENT_CHARS));
            }
        }

        let paragraphs: Vec<String> = document
            .select(&PARAGRAPH_SELECTOR)
            .filter(|el| !has_ignored_ancestor(el))
            .map(flatten_text)
            .filter(|text| char_len(text) > MIN_PARAGRAPH_CHARS)
            .take(MAX_FALLBACK_PARAGRAPHS)
            .collect();
        if !paragraphs.is_empty() {
            return Some(truncate_chars(&paragraphs.join(" "), MAX_CONTENT_CHARS));
        }

        document
            .select(&BODY_SELECTOR)
            .next()
            .map(flatten_text)
            .filter(|text| !text.is_empty())
            .map(|text| truncate_chars(&text, MAX_CONTENT_CHARS))
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let from_title_tag = || {
        document
            .select(&TITLE_SELECTOR)
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .find(|t| !t.is_empty())
    };
    let from_h1 = || {
        document
            .select(&H1_SELECTOR)
            .next()
            .map(flatten_text)
            .filter(|t| !t.is_empty())
    };

    from_title_tag()
        .or_else(|| meta_content(document, &["og:title"]))
        .or_else(|| meta_content(document, &["twitter:title"]))
        .or_else(from_h1)
        .map(|t| truncate_chars(&t, MAX_TITLE_CHARS))
}

fn extract_description(document: &Html) -> Option<String> {
    meta_content(document, &["description"])
        .or_else(|| meta_content(document, &["og:description"]))
        .or_else(|| meta_content(document, &["twitter:description"]))
        .map(|d| truncate_chars(&d, MAX_DESCRIPTION_CHARS))
}

/// Content of the first non-empty `<meta>` whose `name` or `property`
/// matches one of `keys` (ASCII case-insensitive).
fn meta_content(document: &Html, keys: &[&str]) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .filter(|el| {
            let value = el.value();
            let meta_key = value.attr("name").or_else(|| value.attr("property"));
            meta_key.is_some_and(|k| keys.iter().any(|key| k.trim().eq_ignore_ascii_case(key)))
        })
        .filter_map(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .find(|c| !c.is_empty())
}

fn is_ignored(name: &str) -> bool {
    IGNORED_ELEMENTS.contains(&name)
}

fn has_ignored_ancestor(element: &ElementRef) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| is_ignored(el.name()))
    })
}

/// Space-joined text of `root`, skipping ignored subtrees, whitespace
/// collapsed. Walks iteratively so deeply nested markup cannot exhaust the
/// stack.
fn flatten_text(root: ElementRef) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut stack: Vec<_> = root.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            Node::Element(el) if !is_ignored(el.name()) => {
                let mut children: Vec<_> = node.children().collect();
                children.reverse();
                stack.extend(children);
            }
            _ => {}
        }
    }

    collapse_whitespace(&parts.join(" "))
}
