//! Hubcrawl main entry point
//!
//! This is the command-line interface for the Hubcrawl keyword search.

use anyhow::Context;
use clap::Parser;
use hubcrawl::config::{load_config, Config};
use hubcrawl::crawler::{Coordinator, SearchRequest};
use hubcrawl::output::{print_statistics, write_results};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Hubcrawl: keyword search across public code-hosting profiles
///
/// Hubcrawl enumerates candidate usernames and scans their repositories,
/// wiki pages or issues for the configured keywords, printing the matching
/// URLs as JSON.
#[derive(Parser, Debug)]
#[command(name = "hubcrawl")]
#[command(version)]
#[command(about = "Keyword search across public code-hosting profiles", long_about = None)]
struct Cli {
    /// Path to the TOML (or flat JSON) configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Stop scanning new users once this many results are collected
    #[arg(long, value_name = "N")]
    quota: Option<usize>,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the search plan without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if cli.quota.is_some() {
        config.quota = cli.quota;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hubcrawl=info,warn"),
            1 => EnvFilter::new("hubcrawl=debug,info"),
            2 => EnvFilter::new("hubcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Results go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the search plan
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let request = SearchRequest::from_config(config)?;

    println!("=== Hubcrawl Dry Run ===\n");

    println!("Search:");
    println!("  Content type: {}", request.content_type);
    println!("  Keywords: {}", request.keywords.join(", "));
    match request.quota {
        Some(quota) => println!("  Quota: {}", quota),
        None => println!("  Quota: none (scan every username)"),
    }

    println!("\nCrawler:");
    println!("  Site root: {}", config.crawler.base_url);
    println!("  Concurrent users: {}", config.crawler.max_user_tasks);
    println!("  Nested fetches: {}", config.crawler.max_nested_fetches);
    println!(
        "  Longest username: {} characters",
        config.crawler.max_username_length + 1
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nProxies ({}):", request.proxies.len());
    for proxy in &request.proxies {
        println!("  - {}", proxy);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let coordinator = Coordinator::from_config(config).context("Failed to start crawl")?;

    let report = coordinator.run().await?;

    write_results(&report.results, cli.output.as_deref()).context("Failed to write results")?;

    tracing::info!("Stopped launching users: {:?}", report.stop_reason);

    // Statistics share stdout only when results went to a file
    if !cli.quiet && cli.output.is_some() {
        print_statistics(&report.summary);
    }

    Ok(())
}
