//! Front-page fetching.
//!
//! A [`Fetcher`] opens a [`Session`] for the duration of one outlet's scrape.
//! The session owns the HTTP client (and with it the connection pool) and is
//! dropped as soon as the scrape returns, whatever the outcome.
//!
//! Retries are deliberately absent here: a failed or timed-out request is
//! reported once and the outlet yields nothing for this run.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use scraper::Html;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Browser-like identification; several outlets refuse unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },
    #[error("refusing to fetch non-HTTP URL {0}")]
    InvalidUrl(String),
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// HTTP settings shared by every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent when the outlet profile does not set its own.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 10, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// Opens scoped sessions.
pub trait Fetcher {
    type Session: Session;

    /// Acquire a session; `user_agent` overrides the configured default.
    fn open_session(&self, user_agent: Option<&str>) -> Result<Self::Session, FetchError>;
}

/// A live connection scope able to download pages.
pub trait Session {
    /// Download `url` and return the response body.
    async fn get(&self, url: &Url) -> Result<String, FetchError>;
}

/// Download and parse a page.
pub async fn fetch_document<S: Session>(session: &S, url: &Url) -> Result<Html, FetchError> {
    let body = session.get(url).await?;
    debug!(%url, bytes = body.len(), "Fetched page");
    Ok(Html::parse_document(&body))
}

/// [`Fetcher`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl Fetcher for HttpFetcher {
    type Session = HttpSession;

    fn open_session(&self, user_agent: Option<&str>) -> Result<HttpSession, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("es-AR,es;q=0.9,en;q=0.8"));

        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(self.config.user_agent.as_str()))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        debug!("HTTP session opened");
        Ok(HttpSession { client, timeout: self.config.timeout_secs })
    }
}

/// One `reqwest::Client` scoped to a single outlet scrape.
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    timeout: u64,
}

impl Session for HttpSession {
    #[instrument(level = "debug", skip(self), fields(%url))]
    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let wrap = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout { url: url.to_string(), timeout: self.timeout }
            } else {
                FetchError::Http { url: url.to_string(), source: e }
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }
        let response = self.client.get(url.clone()).send().await.map_err(wrap)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        response.text().await.map_err(wrap)
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        debug!("HTTP session closed");
    }
}
