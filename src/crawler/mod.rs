//! Crawler module for username enumeration and content traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching through a rotating proxy pool
//! - HTML extraction for repository, wiki and issue pages
//! - Bounded scheduling of per-username tasks
//! - Repository, wiki and issue traversal strategies
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod request;
mod scheduler;
mod traversal;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, Document, FetchError, HttpFetcher, PageFetcher};
pub use parser::{
    issue_listing, issue_texts, repository_names, wiki_texts, wiki_titles, IssueListing,
};
pub use request::SearchRequest;
pub use scheduler::{Candidate, Scheduler, StopReason};
pub use traversal::Traversal;

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the search and build the HTTP fetcher
/// 2. Enumerate usernames with bounded concurrency
/// 3. Traverse each user's repositories, wikis or issues
/// 4. Stop launching users once the quota is met
/// 5. Return every match once running work has finished
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlError)` - The configuration was rejected before any work started
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    run_crawl(config).await
}
