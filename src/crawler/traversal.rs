//! Per-username content traversal
//!
//! Each strategy starts from a user's repository listing and fans out into
//! nested tasks (per repository, per wiki page, per issue). Every parent
//! joins all of its children before it returns. Nested fetches share one
//! crawl-wide semaphore; permits are held only while a request is in flight,
//! never across a join, so deep fan-out cannot starve its own parents.
//!
//! The semaphore is the nested pool: tasks are spawned one per item and only
//! their fetches are bounded, so task count grows with repositories, wiki
//! pages and issues.

use crate::config::ContentType;
use crate::crawler::parser;
use crate::crawler::{Document, PageFetcher};
use crate::matcher::KeywordMatcher;
use crate::output::{CrawlStats, MatchResult, ResultSink};
use crate::url::{SiteLinks, REPOSITORIES_TAB};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Shared context of all traversal tasks of one crawl
///
/// Cloning is cheap; every clone refers to the same fetcher, sink and pools.
#[derive(Clone)]
pub struct Traversal {
    fetcher: Arc<dyn PageFetcher>,
    matcher: Arc<KeywordMatcher>,
    links: Arc<SiteLinks>,
    sink: ResultSink,
    nested_fetches: Arc<Semaphore>,
    stats: Arc<CrawlStats>,
}

impl Traversal {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        matcher: Arc<KeywordMatcher>,
        links: Arc<SiteLinks>,
        sink: ResultSink,
        nested_fetches: Arc<Semaphore>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            fetcher,
            matcher,
            links,
            sink,
            nested_fetches,
            stats,
        }
    }

    /// Runs the strategy for `content_type` against one user
    pub async fn run(&self, content_type: ContentType, username: &str) {
        match content_type {
            ContentType::Repositories => self.match_repositories(username).await,
            ContentType::Wikis => self.match_wikis(username).await,
            ContentType::Issues => self.match_issues(username).await,
        }
    }

    /// Records the user's profile if any repository name matches
    pub async fn match_repositories(&self, username: &str) {
        let names = self.list_repositories(username).await;
        if self.matcher.matches(&names) {
            self.record(self.links.profile(username));
        }
    }

    /// Checks every wiki page of every repository of the user
    pub async fn match_wikis(&self, username: &str) {
        let mut tasks = JoinSet::new();
        for repo in self.list_repositories(username).await {
            let this = self.clone();
            let username = username.to_string();
            tasks.spawn(async move { this.match_wiki_repository(&username, &repo).await });
        }
        join_all(tasks, "wiki repository").await;
    }

    /// Checks every issue of every repository of the user
    pub async fn match_issues(&self, username: &str) {
        let mut tasks = JoinSet::new();
        for repo in self.list_repositories(username).await {
            let this = self.clone();
            let username = username.to_string();
            tasks.spawn(async move { this.match_issue_repository(&username, &repo).await });
        }
        join_all(tasks, "issue repository").await;
    }

    /// Repository names of a user; empty when the listing cannot be fetched
    pub async fn list_repositories(&self, username: &str) -> Vec<String> {
        let url = self.links.profile(username);
        match self.fetch(&url, &[REPOSITORIES_TAB]).await {
            Some(document) => parser::repository_names(&document),
            None => Vec::new(),
        }
    }

    /// Wiki page titles of a repository
    pub async fn list_wiki_pages(&self, username: &str, repo: &str) -> Vec<String> {
        let url = self.links.wiki_index(username, repo);
        match self.fetch_nested(&url).await {
            Some(document) => parser::wiki_titles(&document),
            None => Vec::new(),
        }
    }

    async fn match_wiki_repository(&self, username: &str, repo: &str) {
        let mut tasks = JoinSet::new();
        for title in self.list_wiki_pages(username, repo).await {
            let this = self.clone();
            let username = username.to_string();
            let repo = repo.to_string();
            tasks.spawn(async move { this.match_wiki_page(&username, &repo, &title).await });
        }
        join_all(tasks, "wiki page").await;
    }

    /// Matches the title and text of one wiki page
    pub async fn match_wiki_page(&self, username: &str, repo: &str, title: &str) {
        let url = self.links.wiki_page(username, repo, title);
        let Some(document) = self.fetch_nested(&url).await else {
            return;
        };

        let mut content = vec![title.to_string()];
        content.extend(parser::wiki_texts(&document));

        if self.matcher.matches(&content) {
            self.record(url);
        }
    }

    /// Collects every issue permalink of a repository, following next-page
    /// links until they run out or a listing page fails to load
    pub async fn collect_issue_links(&self, username: &str, repo: &str) -> Vec<String> {
        let mut links = Vec::new();
        let mut visited = HashSet::new();
        let mut page_url = self.links.issue_index(username, repo);

        loop {
            if !visited.insert(page_url.clone()) {
                tracing::warn!("Issue pagination revisits {}, stopping", page_url);
                break;
            }

            let Some(document) = self.fetch_nested(&page_url).await else {
                break;
            };

            let listing = parser::issue_listing(&document);
            links.extend(listing.links);

            match listing.next_page {
                Some(href) => page_url = self.links.resolve(&href),
                None => break,
            }
        }

        links
    }

    async fn match_issue_repository(&self, username: &str, repo: &str) {
        let mut tasks = JoinSet::new();
        for href in self.collect_issue_links(username, repo).await {
            let this = self.clone();
            tasks.spawn(async move { this.match_issue(&href).await });
        }
        join_all(tasks, "issue").await;
    }

    /// Matches the title and comments of one issue
    pub async fn match_issue(&self, href: &str) {
        let url = self.links.resolve(href);
        let Some(document) = self.fetch_nested(&url).await else {
            return;
        };

        if self.matcher.matches(parser::issue_texts(&document)) {
            self.record(url);
        }
    }

    fn record(&self, url: String) {
        self.sink.append(MatchResult::new(url));
    }

    // Top-level fetches are already bounded by the user slots
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Option<Document> {
        let document = self.fetcher.fetch(url, params).await;
        self.stats.record_fetch(document.is_some());
        document
    }

    async fn fetch_nested(&self, url: &str) -> Option<Document> {
        let Ok(_permit) = self.nested_fetches.acquire().await else {
            return None;
        };
        self.fetch(url, &[]).await
    }
}

/// Waits for every child task; a panicking child only loses its own work
async fn join_all(mut tasks: JoinSet<()>, kind: &str) {
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            tracing::warn!("{} task failed: {}", kind, e);
        }
    }
}
