//! Output module for crawl results
//!
//! This module handles:
//! - Collecting matches from concurrent crawl tasks
//! - Writing results as JSON
//! - Recording crawl statistics

mod json;
mod sink;
pub mod stats;

pub use json::{results_to_json, write_results};
pub use sink::ResultSink;
pub use stats::{print_statistics, CrawlStats, CrawlSummary, UserTaskGuard};

use serde::{Deserialize, Serialize};

/// A page whose text matched the search keywords
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub url: String,
}

impl MatchResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
