use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Main configuration structure for Hubcrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// Minimum number of results after which no new users are scanned
    #[serde(default)]
    pub quota: Option<usize>,
}

/// What to search for and where
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Keywords matched case-insensitively against page text
    pub keywords: Vec<String>,

    /// Proxy pool as `host:port` entries
    #[serde(default)]
    pub proxies: Vec<String>,

    /// Content type name: repositories, wikis or issues
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Crawl engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of usernames scanned concurrently
    #[serde(rename = "max-user-tasks", default = "default_max_user_tasks")]
    pub max_user_tasks: usize,

    /// Number of nested page fetches in flight across the whole crawl
    #[serde(rename = "max-nested-fetches", default = "default_max_nested_fetches")]
    pub max_nested_fetches: usize,

    /// Longest username enumerated is `max-username-length + 1` symbols
    ///
    /// Ordinals are `u128`, so at 24 or more the space saturates and no
    /// username longer than 25 symbols is ever reached.
    #[serde(
        rename = "max-username-length",
        default = "default_max_username_length"
    )]
    pub max_username_length: u32,

    /// Root of the code-hosting site
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_user_tasks: default_max_user_tasks(),
            max_nested_fetches: default_max_nested_fetches(),
            max_username_length: default_max_username_length(),
            base_url: default_base_url(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Flat search document: `{"keywords": [...], "proxies": [...], "type": "Wikis"}`
#[derive(Debug, Clone, Deserialize)]
pub struct JsonSearchDocument {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub proxies: Vec<String>,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl From<JsonSearchDocument> for Config {
    fn from(doc: JsonSearchDocument) -> Self {
        Config {
            search: SearchConfig {
                keywords: doc.keywords,
                proxies: doc.proxies,
                content_type: doc.content_type,
            },
            crawler: CrawlerConfig::default(),
            http: HttpConfig::default(),
            quota: None,
        }
    }
}

/// Which kind of content a crawl targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Repositories,
    Wikis,
    Issues,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Repositories => "repositories",
            ContentType::Wikis => "wikis",
            ContentType::Issues => "issues",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "repositories" => Ok(ContentType::Repositories),
            "wikis" => Ok(ContentType::Wikis),
            "issues" => Ok(ContentType::Issues),
            _ => Err(ConfigError::UnknownContentType(s.to_string())),
        }
    }
}

fn default_max_user_tasks() -> usize {
    3
}

fn default_max_nested_fetches() -> usize {
    16
}

fn default_max_username_length() -> u32 {
    crate::username::MAX_USERNAME_LENGTH
}

fn default_base_url() -> String {
    "https://github.com/".to_string()
}

fn default_user_agent() -> String {
    format!("hubcrawl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
