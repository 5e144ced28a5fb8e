//! Crawler coordinator - main crawl orchestration logic
//!
//! This module wires one search together:
//! - Building the keyword matcher, link builder and shared pools
//! - Running the scheduler over candidate usernames
//! - Dispatching every username to the configured traversal
//! - Returning the collected results with run statistics

use crate::config::{Config, CrawlerConfig};
use crate::crawler::scheduler::{Scheduler, StopReason};
use crate::crawler::traversal::Traversal;
use crate::crawler::{HttpFetcher, PageFetcher, SearchRequest};
use crate::matcher::KeywordMatcher;
use crate::output::{CrawlStats, CrawlSummary, MatchResult, ResultSink};
use crate::url::{normalize_base_url, SiteLinks};
use crate::username::UsernameEnumerator;
use crate::{ConfigError, CrawlError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Matches in insertion order
    pub results: Vec<MatchResult>,

    /// Run statistics
    pub summary: CrawlSummary,

    /// Why new usernames stopped being launched
    pub stop_reason: StopReason,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    request: SearchRequest,
    crawler: CrawlerConfig,
    fetcher: Arc<dyn PageFetcher>,
    links: SiteLinks,
}

impl Coordinator {
    /// Creates a coordinator around any page fetcher
    ///
    /// # Arguments
    ///
    /// * `request` - What to search for
    /// * `crawler` - Engine limits and the site root
    /// * `fetcher` - Source of pages
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Request and limits are valid
    /// * `Err(CrawlError::InvalidConfiguration)` - Nothing was started
    pub fn new(
        request: SearchRequest,
        crawler: CrawlerConfig,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, CrawlError> {
        request.validate()?;

        if crawler.max_user_tasks == 0 || crawler.max_nested_fetches == 0 {
            return Err(ConfigError::Validation(
                "max_user_tasks and max_nested_fetches must be at least 1".to_string(),
            )
            .into());
        }

        let links = SiteLinks::new(normalize_base_url(&crawler.base_url)?);

        Ok(Self {
            request,
            crawler,
            fetcher,
            links,
        })
    }

    /// Creates a coordinator fetching over HTTP through the configured proxies
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let request = SearchRequest::from_config(config)?;
        let fetcher = HttpFetcher::new(&config.http, &request.proxies)?;
        Self::new(request, config.crawler.clone(), Arc::new(fetcher))
    }

    /// Runs the crawl and returns only the results
    pub async fn crawl(&self) -> Result<Vec<MatchResult>, CrawlError> {
        Ok(self.run().await?.results)
    }

    /// Runs the crawl to completion
    ///
    /// Returns once the quota is met or the ordinal space is exhausted and
    /// every launched task, with all of its nested work, has finished.
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        let start_time = Instant::now();
        let content_type = self.request.content_type;
        let sink = ResultSink::new();
        let stats = Arc::new(CrawlStats::new());

        let traversal = Traversal::new(
            Arc::clone(&self.fetcher),
            Arc::new(KeywordMatcher::new(&self.request.keywords)),
            Arc::new(self.links.clone()),
            sink.clone(),
            Arc::new(Semaphore::new(self.crawler.max_nested_fetches)),
            Arc::clone(&stats),
        );

        let mut scheduler = Scheduler::new(
            self.crawler.max_user_tasks,
            UsernameEnumerator::new(self.crawler.max_username_length),
        );

        tracing::info!(
            "Searching {} for {:?} ({} user tasks, {} nested fetches, quota {:?})",
            content_type,
            self.request.keywords,
            self.crawler.max_user_tasks,
            self.crawler.max_nested_fetches,
            self.request.quota
        );

        let stop_reason = scheduler
            .run(&sink, self.request.quota, |candidate| {
                let traversal = traversal.clone();
                let stats = Arc::clone(&stats);
                async move {
                    let _active = stats.track_user();
                    tracing::debug!("Checking user '{}'", candidate.username);
                    traversal.run(content_type, &candidate.username).await;
                }
            })
            .await;

        let results = sink.into_results();
        let summary = stats.summary(results.len(), start_time.elapsed());

        tracing::info!(
            "Crawl completed: {} results from {} users in {:?} ({} pages fetched, {} failed)",
            summary.results,
            summary.users_completed,
            summary.duration,
            summary.pages_fetched,
            summary.fetch_failures
        );

        Ok(CrawlReport {
            results,
            summary,
            stop_reason,
        })
    }
}

/// Runs a complete crawl from a loaded configuration
///
/// # Example
///
/// ```no_run
/// use hubcrawl::config::load_config;
/// use hubcrawl::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("search.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("{} matches", report.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let coordinator = Coordinator::from_config(config)?;
    coordinator.run().await
}
