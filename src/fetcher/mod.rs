//! HTTP fetching for the primary page and its well-known sibling resources.
//!
//! Not a browser: one blocking GET per resource with a hard timeout and
//! browser-like identification headers. No retries.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Chrome-like User-Agent so naive bot blocking does not short-circuit the scan
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/131.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_DEFAULT: &str = "en-US,en;q=0.9";
const MAX_REDIRECTS: usize = 5;

/// Path of the robots exclusion file
pub const ROBOTS_PATH: &str = "/robots.txt";
/// Path of the AI-manifest file
pub const AI_MANIFEST_PATH: &str = "/llms.txt";

/// Response from one HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub status_code: u16,
    pub body: Vec<u8>,
    /// Time from sending the request until the body was fully read
    pub elapsed: Duration,
    /// URL after redirects
    pub final_url: String,
    pub content_type: Option<String>,
}

impl FetchResult {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// True when the body is an HTML document rather than the plain-text
    /// resource that was asked for. Many sites answer every path with their
    /// HTML shell and a 200.
    pub fn is_html_document(&self) -> bool {
        if let Some(ct) = &self.content_type {
            if ct.to_ascii_lowercase().contains("text/html") {
                return true;
            }
        }
        let head: String = self
            .text()
            .trim_start()
            .chars()
            .take(64)
            .collect::<String>()
            .to_ascii_lowercase();
        head.starts_with("<!doctype html") || head.starts_with("<html")
    }
}

/// Why a fetch produced no response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Source of HTTP responses. The engine only talks to this seam.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError>;
}

/// Outcome of fetching an auxiliary resource. Never fatal to the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxiliaryFetch {
    /// 2xx response
    Found(FetchResult),
    /// Non-2xx status
    Absent(u16),
    /// Network error, timeout, or an underivable URL
    Unreachable(String),
}

impl AuxiliaryFetch {
    pub fn from_result(result: Result<FetchResult, FetchError>) -> Self {
        match result {
            Ok(resp) if resp.is_success() => AuxiliaryFetch::Found(resp),
            Ok(resp) => AuxiliaryFetch::Absent(resp.status_code),
            Err(e) => AuxiliaryFetch::Unreachable(e.to_string()),
        }
    }
}

/// Build `{scheme}://{host}[:port]{path}` from the page URL
pub fn auxiliary_url(page_url: &str, path: &str) -> Result<String, FetchError> {
    let parsed =
        url::Url::parse(page_url).map_err(|e| FetchError::InvalidUrl(format!("{page_url}: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(FetchError::InvalidUrl(format!("{page_url}: missing host")));
    }
    parsed
        .join(path)
        .map(|u| u.to_string())
        .map_err(|e| FetchError::InvalidUrl(format!("{page_url}: {e}")))
}

/// Fetch a sibling resource of the page, absorbing every failure
pub fn fetch_auxiliary(
    fetcher: &dyn Fetcher,
    page_url: &str,
    path: &str,
    timeout: Duration,
) -> AuxiliaryFetch {
    let result = auxiliary_url(page_url, path).and_then(|url| fetcher.fetch(&url, timeout));
    let outcome = AuxiliaryFetch::from_result(result);
    debug!(path, outcome = %outcome_kind(&outcome), "auxiliary fetch finished");
    outcome
}

fn outcome_kind(outcome: &AuxiliaryFetch) -> String {
    match outcome {
        AuxiliaryFetch::Found(r) => format!("found ({})", r.status_code),
        AuxiliaryFetch::Absent(code) => format!("absent ({code})"),
        AuxiliaryFetch::Unreachable(cause) => format!("unreachable ({cause})"),
    }
}

/// Blocking reqwest-backed fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher; `user_agent` falls back to [`DEFAULT_USER_AGENT`]
    pub fn new(user_agent: Option<&str>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_DEFAULT),
        );

        let build = |agent: &str| {
            reqwest::blocking::Client::builder()
                .user_agent(agent)
                .default_headers(headers.clone())
                .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
                .build()
        };

        let client = match build(user_agent.unwrap_or(DEFAULT_USER_AGENT)) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, user_agent, "could not build HTTP client, using default user agent");
                build(DEFAULT_USER_AGENT).unwrap_or_else(|e| {
                    warn!(error = %e, "could not build HTTP client, using bare client");
                    reqwest::blocking::Client::default()
                })
            }
        };

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| classify(&e, timeout))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.bytes().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::Body(error_chain(&e))
            }
        })?;
        let elapsed = start.elapsed();

        debug!(url, status_code, elapsed_ms = elapsed.as_millis() as u64, "fetched");

        Ok(FetchResult {
            status_code,
            body: body.to_vec(),
            elapsed,
            final_url,
            content_type,
        })
    }
}

fn classify(e: &reqwest::Error, timeout: Duration) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(timeout)
    } else if e.is_builder() {
        FetchError::InvalidUrl(error_chain(e))
    } else if e.is_connect() {
        FetchError::Connect(error_chain(e))
    } else {
        FetchError::Request(error_chain(e))
    }
}

/// Join an error with its sources so DNS/TLS causes are not lost
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}
