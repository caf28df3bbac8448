use std::{error::Error, time::Duration};

use url::Url;

use crate::analysis::{AnalysisError, AnalysisResult};
use crate::config::FetchConfig;

pub const USER_AGENT_DEFAULT: &str = "Mozilla/5.0 (compatible; BookmarkBot/1.0)";
pub const TIMEOUT_SECS_DEFAULT: u64 = 10;

/// Raw outcome of a successful GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP GET capability the engine borrows from its host.
///
/// Implementations apply their own user agent and timeout, never retry,
/// report non-2xx answers as `AnalysisError::Transport` and bodies that are
/// not markup as `AnalysisError::Parse`.
pub trait PageFetcher: Send + Sync {
    fn get(&self, url: &str) -> AnalysisResult<FetchResponse>;
}

pub(crate) fn describe_reqwest_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "request timed out".to_string();
    }

    match error.source() {
        Some(e) => match e.source() {
            Some(e) => e.to_string(),
            None => e.to_string(),
        },
        None => error.to_string(),
    }
}

pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for ReqwestFetcher {
    fn get(&self, url: &str) -> AnalysisResult<FetchResponse> {
        let iden = request_identity(url);
        log::debug!("{iden}: requesting");

        let resp = self.client.get(url).send().map_err(|err| {
            log::warn!("{iden}: {err}");
            AnalysisError::from(err)
        })?;

        let status = resp.status();
        if !status.is_success() {
            log::debug!("{iden}: {status}");
            return Err(AnalysisError::transport(format!("HTTP status {status}")));
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(content_type) = content_type.filter(|ct| !is_markup_content_type(ct)) {
            log::debug!("{iden}: not markup ({content_type})");
            return Err(AnalysisError::parse(format!("unsupported content type {content_type}")));
        }

        // a 200 with an unreadable body is still a transport failure
        let bytes = resp.bytes()?;

        Ok(FetchResponse {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).to_string(),
        })
    }
}

/// HTML, XML and plain text bodies are worth handing to the parser.
/// An empty header is accepted.
pub fn is_markup_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.ends_with("+xml") || mime.ends_with("/xml")
}

fn request_identity(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => format!("{}{}", parsed.host_str().unwrap_or_default(), parsed.path()),
        Err(_) => url.to_string(),
    }
}

/// Checks that `url` is an absolute http(s) URL with a host.
pub fn validate_url(url: &str) -> AnalysisResult<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AnalysisError::validation("URL cannot be empty"));
    }

    let parsed = Url::parse(url).map_err(|err| AnalysisError::validation(format!("{url}: {err}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AnalysisError::validation(format!(
            "{url}: URL must use http:// or https://"
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(AnalysisError::validation(format!("{url}: URL has no host"))),
    }
}

/// Lower-cased host (with port, if any) minus a leading `www.`.
///
/// Returns `None` when the string does not parse as a URL with a host.
pub fn normalized_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    if host.is_empty() {
        return None;
    }

    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}

/// Lower-cased netloc and path, empty strings when unparseable.
pub fn netloc_and_path(url: &str) -> (String, String) {
    match Url::parse(url.trim()) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default().to_lowercase();
            let netloc = match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host,
            };
            (netloc, parsed.path().to_lowercase())
        }
        Err(_) => (String::new(), String::new()),
    }
}
