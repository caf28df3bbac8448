use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::analysis::{AnalysisError, AnalysisResult, Engine};
use crate::bookmarks::{BookmarkStore, StoredBookmark, TagRef};
use crate::config::Config;
use crate::fetch::{FetchResponse, PageFetcher};

/// Serves canned pages; unknown URLs answer 404.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, AnalysisResult<String>>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, err: AnalysisError) -> Self {
        self.pages.insert(url.to_string(), Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageFetcher for StubFetcher {
    fn get(&self, url: &str) -> AnalysisResult<FetchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.pages.get(url) {
            Some(Ok(body)) => Ok(FetchResponse {
                status: 200,
                body: body.clone(),
            }),
            Some(Err(err)) => Err(err.clone()),
            None => Err(AnalysisError::transport("HTTP status 404 Not Found")),
        }
    }
}

pub fn engine_with(fetcher: StubFetcher) -> (Engine, Arc<StubFetcher>) {
    let fetcher = Arc::new(fetcher);
    let engine = Engine::new(fetcher.clone(), &Config::default());
    (engine, fetcher)
}

pub struct FailingStore;

impl BookmarkStore for FailingStore {
    fn list(&self, _owner_id: Option<u64>) -> anyhow::Result<Vec<StoredBookmark>> {
        anyhow::bail!("database unavailable")
    }
}

pub fn stored(id: u64, owner_id: Option<u64>, url: &str, title: &str, tags: &[&str]) -> StoredBookmark {
    StoredBookmark {
        id,
        owner_id,
        url: url.to_string(),
        title: title.to_string(),
        tags: tags.iter().map(|t| TagRef::new(*t)).collect(),
        ..Default::default()
    }
}
