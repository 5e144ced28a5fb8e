//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building one HTTP client per proxy in the pool
//! - Picking a proxy at random for every request
//! - Error classification (transport vs. upstream status)
//!
//! Failures never escape a fetch: callers only see a document or `None`.

use crate::config::{proxy_url, HttpConfig};
use crate::CrawlError;
use async_trait::async_trait;
use reqwest::{Client, Proxy};
use scraper::Html;
use std::time::Duration;
use thiserror::Error;

/// A successfully fetched page
///
/// The body is kept as text and parsed on demand, so documents can be moved
/// between tasks freely.
#[derive(Debug, Clone)]
pub struct Document {
    body: String,
}

impl Document {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Raw HTML body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body into an HTML tree
    pub fn html(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Source of parsed pages
///
/// Implementations return `None` for any failure: non-success status,
/// timeout, refused connection or proxy error.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Option<Document>;
}

/// Why a fetch produced no document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Upstream { url: String, status: u16 },
}

impl FetchError {
    fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        let url = url.to_string();
        if e.is_timeout() {
            FetchError::Timeout { url }
        } else if e.is_connect() {
            FetchError::Connect { url, source: e }
        } else {
            FetchError::Transport { url, source: e }
        }
    }

    /// True for timeouts, refused connections and proxy failures
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Upstream { .. })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
/// * `proxy` - Optional proxy every request of this client goes through
///
/// # Example
///
/// ```no_run
/// use hubcrawl::config::HttpConfig;
/// use hubcrawl::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &HttpConfig,
    proxy: Option<&url::Url>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy.as_str())?);
    }

    builder.build()
}

/// `reqwest`-backed fetcher rotating over a proxy pool
pub struct HttpFetcher {
    clients: Vec<Client>,
}

impl HttpFetcher {
    /// Creates a fetcher with one client per proxy, or a single direct
    /// client when the pool is empty
    pub fn new(config: &HttpConfig, proxies: &[String]) -> Result<Self, CrawlError> {
        let mut clients = Vec::with_capacity(proxies.len().max(1));

        for entry in proxies {
            let proxy = proxy_url(entry)?;
            clients.push(build_http_client(config, Some(&proxy))?);
        }

        if clients.is_empty() {
            clients.push(build_http_client(config, None)?);
        }

        tracing::debug!("HTTP fetcher ready with {} client(s)", clients.len());

        Ok(Self { clients })
    }

    /// Number of clients in the rotation
    pub fn pool_size(&self) -> usize {
        self.clients.len()
    }

    // Uniform choice per request, no stickiness
    fn pick_client(&self) -> &Client {
        let index = if self.clients.len() > 1 {
            rand::random_range(0..self.clients.len())
        } else {
            0
        };
        &self.clients[index]
    }

    /// Fetches a page, reporting why it failed
    pub async fn try_fetch(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Document, FetchError> {
        let response = self
            .pick_client()
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(Document::new(body))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Option<Document> {
        match self.try_fetch(url, params).await {
            Ok(document) => Some(document),
            Err(e) if e.is_transport() => {
                tracing::warn!("Problem with proxy or connection: {}", e);
                None
            }
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }
}
