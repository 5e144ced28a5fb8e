//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the code-hosting site and run
//! whole searches end-to-end over the smallest username space (37 names).

use hubcrawl::config::{load_config, Config, CrawlerConfig, HttpConfig};
use hubcrawl::crawler::{
    run_crawl, Coordinator, HttpFetcher, PageFetcher, SearchRequest, StopReason,
};
use hubcrawl::output::MatchResult;
use hubcrawl::{ConfigError, ContentType, CrawlError};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawler limits pointing at the mock server, one-symbol usernames only
fn crawler_config(mock_server: &MockServer, max_user_tasks: usize) -> CrawlerConfig {
    CrawlerConfig {
        max_user_tasks,
        max_nested_fetches: 4,
        max_username_length: 0,
        base_url: format!("{}/", mock_server.uri()),
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn coordinator(request: SearchRequest, crawler: CrawlerConfig) -> Coordinator {
    let fetcher = HttpFetcher::new(&HttpConfig::default(), &request.proxies)
        .expect("Failed to build fetcher");
    Coordinator::new(request, crawler, Arc::new(fetcher)).expect("Failed to create coordinator")
}

#[tokio::test]
async fn test_repository_search_end_to_end() {
    let mock_server = MockServer::start().await;

    // Only "a" owns a matching repository; every other profile is a 404
    Mock::given(method("GET"))
        .and(path("/a"))
        .and(query_param("tab", "repositories"))
        .respond_with(html_page(
            r#"<a itemprop="name codeRepository" href="/a/cool-html-project">
                cool-html-project
            </a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = SearchRequest::new(["HTML"], ContentType::Repositories).with_quota(Some(1));
    let report = coordinator(request, crawler_config(&mock_server, 3))
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::QuotaReached);
    assert_eq!(
        report.results,
        vec![MatchResult::new(format!("{}/a", mock_server.uri()))]
    );
}

#[tokio::test]
async fn test_wiki_search_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .and(query_param("tab", "repositories"))
        .respond_with(html_page(
            r#"<a itemprop="name codeRepository">docs</a>
               <a itemprop="name codeRepository">tools</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b/docs/wiki/"))
        .respond_with(html_page(
            r#"<a class="flex-1 py-1 text-bold">Home</a>
               <a class="flex-1 py-1 text-bold">Styling</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b/docs/wiki/Home"))
        .respond_with(html_page(
            r#"<div class="markdown-body"><p>Nothing to see here</p></div>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b/docs/wiki/Styling"))
        .respond_with(html_page(
            r#"<div class="markdown-body"><h2>Layout</h2><p>We write plain CSS.</p></div>"#,
        ))
        .mount(&mock_server)
        .await;

    // "tools" has no wiki, so its wiki index is a 404

    let request = SearchRequest::new(["css"], ContentType::Wikis);
    let report = coordinator(request, crawler_config(&mock_server, 3))
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::Exhausted);
    assert_eq!(report.summary.users_completed, 37);
    assert_eq!(
        report.results,
        vec![MatchResult::new(format!(
            "{}/b/docs/wiki/Styling",
            mock_server.uri()
        ))]
    );
}

#[tokio::test]
async fn test_issue_search_follows_pagination() {
    let mock_server = MockServer::start().await;
    let issue_link = |n: u32| {
        format!(
            r#"<a class="d-block d-md-none position-absolute top-0 bottom-0 left-0 right-0"
                  href="/c/app/issues/{}"></a>"#,
            n
        )
    };

    Mock::given(method("GET"))
        .and(path("/c"))
        .and(query_param("tab", "repositories"))
        .respond_with(html_page(r#"<a itemprop="name codeRepository">app</a>"#))
        .mount(&mock_server)
        .await;

    // Registered first so it wins over the unqualified listing below
    Mock::given(method("GET"))
        .and(path("/c/app/issues/"))
        .and(query_param("page", "2"))
        .respond_with(html_page(&issue_link(2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c/app/issues/"))
        .respond_with(html_page(&format!(
            r#"{}<a class="next_page" href="/c/app/issues/?page=2">Next</a>"#,
            issue_link(1)
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c/app/issues/1"))
        .respond_with(html_page(
            r#"<span class="js-issue-title markdown-title">Crash on start</span>
               <div class="comment-body"><p>Stack trace attached.</p></div>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c/app/issues/2"))
        .respond_with(html_page(
            r#"<span class="js-issue-title markdown-title">Styling</span>
               <div class="comment-body"><p>The HTML template is broken.</p></div>"#,
        ))
        .mount(&mock_server)
        .await;

    let request = SearchRequest::new(["html"], ContentType::Issues);
    let report = coordinator(request, crawler_config(&mock_server, 2))
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(
        report.results,
        vec![MatchResult::new(format!(
            "{}/c/app/issues/2",
            mock_server.uri()
        ))]
    );
}

#[tokio::test]
async fn test_quota_is_a_floor() {
    let mock_server = MockServer::start().await;

    // Every profile matches, slowly, so several users are in flight when
    // the first result lands
    Mock::given(method("GET"))
        .and(query_param("tab", "repositories"))
        .respond_with(
            html_page(r#"<a itemprop="name codeRepository">html-site</a>"#)
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&mock_server)
        .await;

    let request = SearchRequest::new(["html"], ContentType::Repositories).with_quota(Some(1));
    let report = coordinator(request, crawler_config(&mock_server, 3))
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::QuotaReached);
    assert!(report.results.len() >= 1);
    assert_eq!(report.results.len() as u64, report.summary.users_launched);
    assert!(report.summary.users_launched < 37);
    assert!(report.summary.peak_user_tasks <= 3);
}

#[tokio::test]
async fn test_http_fetcher_failures_are_absent_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page("<p>fine</p>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&HttpConfig::default(), &[]).expect("Failed to build fetcher");

    let ok = fetcher
        .fetch(&format!("{}/ok", mock_server.uri()), &[])
        .await
        .expect("Expected a document");
    assert!(ok.body().contains("fine"));

    assert!(fetcher
        .fetch(&format!("{}/broken", mock_server.uri()), &[])
        .await
        .is_none());
    assert!(fetcher
        .fetch(&format!("{}/missing", mock_server.uri()), &[])
        .await
        .is_none());
}

#[tokio::test]
async fn test_unreachable_proxy_yields_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page(r#"<a itemprop="name codeRepository">html</a>"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Nothing listens on port 1
    let http = HttpConfig {
        connect_timeout_secs: 1,
        timeout_secs: 2,
        ..HttpConfig::default()
    };
    let proxies = vec!["127.0.0.1:1".to_string()];
    let fetcher = HttpFetcher::new(&http, &proxies).expect("Failed to build fetcher");

    let request = SearchRequest::new(["html"], ContentType::Repositories).with_proxies(proxies);
    let coordinator = Coordinator::new(
        request,
        crawler_config(&mock_server, 8),
        Arc::new(fetcher),
    )
    .expect("Failed to create coordinator");

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::Exhausted);
    assert!(report.results.is_empty());
    assert_eq!(report.summary.fetch_failures, 37);
}

#[tokio::test]
async fn test_run_crawl_from_config_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/z"))
        .and(query_param("tab", "repositories"))
        .respond_with(html_page(r#"<a itemprop="name codeRepository">Css-Reset</a>"#))
        .mount(&mock_server)
        .await;

    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    write!(
        file,
        r#"
quota = 1

[search]
keywords = ["css"]
type = "Repositories"

[crawler]
max-user-tasks = 2
max-username-length = 0
base-url = "{}"
"#,
        mock_server.uri()
    )
    .expect("Failed to write config");

    let config: Config = load_config(file.path()).expect("Failed to load config");
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(
        report.results,
        vec![MatchResult::new(format!("{}/z", mock_server.uri()))]
    );
}

#[tokio::test]
async fn test_unknown_content_type_fails_fast() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    write!(file, r#"{{"keywords": ["html"], "proxies": [], "type": "Gists"}}"#)
        .expect("Failed to write config");

    let result = load_config(file.path());
    assert!(matches!(result, Err(ConfigError::UnknownContentType(name)) if name == "Gists"));

    let request = SearchRequest::parse(["html"], Vec::<String>::new(), "Gists");
    assert!(matches!(
        request,
        Err(CrawlError::InvalidConfiguration(ConfigError::UnknownContentType(_)))
    ));
}
