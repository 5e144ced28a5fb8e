//! Hubcrawl: keyword discovery across public code-hosting profiles
//!
//! This crate enumerates candidate usernames, walks each user's repositories,
//! wiki pages or issue threads, and collects the URLs whose text matches a set
//! of keywords.

pub mod config;
pub mod crawler;
pub mod matcher;
pub mod output;
pub mod url;
pub mod username;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown content type: '{0}' (expected repositories, wikis or issues)")]
    UnknownContentType(String),

    #[error("Invalid proxy '{0}'")]
    InvalidProxy(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, ContentType};
pub use crawler::{crawl, Coordinator, SearchRequest};
pub use matcher::KeywordMatcher;
pub use output::{MatchResult, ResultSink};
pub use username::UsernameEnumerator;
