use std::sync::Arc;

use super::text::non_empty;
use super::{
    AnalysisResult, ContentProfile, ExtractedPage, PageExtractor, SimilarityCandidate,
    SimilarityRecommender, SummaryGenerator, SummaryResult, TagContext, TagSuggester,
    TagSuggestion,
};
use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::fetch::{validate_url, PageFetcher};

/// Entry point of the analysis pipeline. Holds the fetcher and the four
/// components; every operation performs at most one fetch.
pub struct Engine {
    fetcher: Arc<dyn PageFetcher>,
    extractor: PageExtractor,
    summarizer: SummaryGenerator,
    tagger: TagSuggester,
    recommender: SimilarityRecommender,
    default_limit: usize,
}

impl Engine {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Self {
        Self {
            fetcher,
            extractor: PageExtractor::new(config.extraction.content_threshold),
            summarizer: SummaryGenerator::new(),
            tagger: TagSuggester::new(config.suggestions.max_suggestions),
            recommender: SimilarityRecommender::new(),
            default_limit: config.recommendations.default_limit,
        }
    }

    /// Fetch and parse `url`. Fails with `Validation` before any request
    /// is made when the URL is not http(s); a failed fetch comes back as a
    /// page carrying only the error.
    pub fn extract(&self, url: &str) -> AnalysisResult<ExtractedPage> {
        match self.fetch_page(url) {
            Err(err) if err.is_recoverable() => {
                log::warn!("failed to extract {url}: {err}");
                Ok(ExtractedPage::failed(url, err.to_string()))
            }
            other => other,
        }
    }

    fn fetch_page(&self, url: &str) -> AnalysisResult<ExtractedPage> {
        validate_url(url)?;
        log::debug!("fetching {url}");
        self.extractor.extract(self.fetcher.as_ref(), url)
    }

    /// Extract then summarize. Fetch failures come back as a result with
    /// method `error`.
    pub fn analyze(&self, url: &str) -> AnalysisResult<SummaryResult> {
        let page = match self.fetch_page(url) {
            Ok(page) => page,
            Err(err) if err.is_recoverable() => {
                log::warn!("failed to analyze {url}: {err}");
                return Ok(SummaryResult::failed(err.to_string()));
            }
            Err(err) => return Err(err),
        };

        let mut result = self.summarizer.summarize(
            page.title.as_deref(),
            page.description.as_deref(),
            page.main_content.as_deref(),
        );
        result.content_length = page.content_length;

        Ok(result)
    }

    pub fn suggest_tags(
        &self,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        existing_tags: &[String],
    ) -> AnalysisResult<Vec<String>> {
        let context = self.tag_context(url, title, description)?;
        Ok(self.tagger.suggest(&context, existing_tags))
    }

    pub fn suggest_tags_scored(
        &self,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        existing_tags: &[String],
    ) -> AnalysisResult<Vec<TagSuggestion>> {
        let context = self.tag_context(url, title, description)?;
        Ok(self.tagger.suggest_scored(&context, existing_tags))
    }

    /// Caller-supplied title and description win over fetched ones; a
    /// differing fetched title and the page keywords still add context.
    fn tag_context(
        &self,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AnalysisResult<TagContext> {
        let mut context = TagContext {
            url: url.to_string(),
            title: non_empty(title),
            description: non_empty(description),
            ..Default::default()
        };

        match self.fetch_page(url) {
            Ok(page) => {
                match page.title {
                    Some(fetched) if context.title.is_none() => context.title = Some(fetched),
                    Some(fetched)
                        if context
                            .title
                            .as_deref()
                            .is_some_and(|own| !own.eq_ignore_ascii_case(&fetched)) =>
                    {
                        context.extra_context.push(fetched)
                    }
                    _ => {}
                }

                if context.description.is_none() {
                    context.description = page.description;
                }

                let summary = self.summarizer.summarize(
                    context.title.as_deref(),
                    context.description.as_deref(),
                    page.main_content.as_deref(),
                );
                context.summary = summary.summary;
                context.extra_context.extend(page.keywords);
            }
            Err(err) if err.is_recoverable() => {
                log::warn!("suggesting tags for {url} without page content: {err}");
            }
            Err(err) => return Err(err),
        }

        Ok(context)
    }

    /// Stored bookmarks similar to `url`. The page is fetched only when
    /// neither title nor description is given.
    pub fn recommend(
        &self,
        store: &dyn BookmarkStore,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        owner_id: Option<u64>,
        limit: Option<usize>,
    ) -> AnalysisResult<Vec<SimilarityCandidate>> {
        validate_url(url)?;

        let mut input = ContentProfile {
            url: url.to_string(),
            title: non_empty(title),
            description: non_empty(description),
            ..Default::default()
        };

        if input.title.is_none() && input.description.is_none() {
            match self.fetch_page(url) {
                Ok(page) => {
                    let summary = self.summarizer.summarize(
                        page.title.as_deref(),
                        page.description.as_deref(),
                        page.main_content.as_deref(),
                    );
                    input.title = page.title;
                    input.description = page.description;
                    input.summary = summary.summary;
                }
                Err(err) if err.is_recoverable() => {
                    log::warn!("recommending for {url} without page content: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        let bookmarks = match store.list(owner_id) {
            Ok(bookmarks) => bookmarks,
            Err(err) => {
                log::warn!("failed to list bookmarks: {err:#}");
                return Ok(vec![]);
            }
        };

        let limit = limit.unwrap_or(self.default_limit);
        Ok(self.recommender.rank(&input, &bookmarks, limit))
    }
}
