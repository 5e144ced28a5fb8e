//! Configuration module for Hubcrawl
//!
//! This module handles loading, parsing, and validating search configuration
//! files (TOML, or the flat JSON search document).
//!
//! # Example
//!
//! ```no_run
//! use hubcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("search.toml")).unwrap();
//! println!("Scanning {} users at a time", config.crawler.max_user_tasks);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ContentType, CrawlerConfig, HttpConfig, JsonSearchDocument, SearchConfig,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_json, parse_toml};
pub use validation::{proxy_url, validate, validate_search_config};
