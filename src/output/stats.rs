//! Crawl statistics
//!
//! Counters are updated lock-free from every crawl task and read once the
//! crawl finishes.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Live counters shared by all crawl tasks
#[derive(Debug, Default)]
pub struct CrawlStats {
    users_launched: AtomicU64,
    users_completed: AtomicU64,
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    active_user_tasks: AtomicUsize,
    peak_user_tasks: AtomicUsize,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a per-username task as running and updates the peak gauge
    pub fn user_started(&self) {
        self.users_launched.fetch_add(1, Ordering::Relaxed);
        let active = self.active_user_tasks.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_user_tasks.fetch_max(active, Ordering::SeqCst);
    }

    /// Marks a per-username task as running until the guard is dropped
    pub fn track_user(self: &Arc<Self>) -> UserTaskGuard {
        self.user_started();
        UserTaskGuard {
            stats: Arc::clone(self),
        }
    }

    pub fn user_finished(&self) {
        self.active_user_tasks.fetch_sub(1, Ordering::SeqCst);
        self.users_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self, success: bool) {
        if success {
            self.pages_fetched.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fetch_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Per-username tasks running right now
    pub fn active_user_tasks(&self) -> usize {
        self.active_user_tasks.load(Ordering::SeqCst)
    }

    /// Highest number of per-username tasks observed running at once
    pub fn peak_user_tasks(&self) -> usize {
        self.peak_user_tasks.load(Ordering::SeqCst)
    }

    /// Point-in-time copy of the counters
    pub fn summary(&self, results: usize, duration: Duration) -> CrawlSummary {
        CrawlSummary {
            users_launched: self.users_launched.load(Ordering::Relaxed),
            users_completed: self.users_completed.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            peak_user_tasks: self.peak_user_tasks(),
            results,
            duration,
        }
    }
}

/// Keeps a per-username task counted as active; released on drop, including
/// when the task panics
pub struct UserTaskGuard {
    stats: Arc<CrawlStats>,
}

impl Drop for UserTaskGuard {
    fn drop(&mut self) {
        self.stats.user_finished();
    }
}

/// Final statistics of one crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSummary {
    pub users_launched: u64,
    pub users_completed: u64,
    pub pages_fetched: u64,
    pub fetch_failures: u64,
    pub peak_user_tasks: usize,
    pub results: usize,
    pub duration: Duration,
}

impl CrawlSummary {
    /// Usernames scanned per second
    pub fn users_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.users_completed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(summary: &CrawlSummary) {
    println!("=== Crawl Statistics ===\n");

    println!("Users:");
    println!("  Launched: {}", summary.users_launched);
    println!("  Completed: {}", summary.users_completed);
    println!("  Peak concurrent: {}", summary.peak_user_tasks);
    println!("  Rate: {:.2} users/sec", summary.users_per_sec());
    println!();

    println!("Pages:");
    println!("  Fetched: {}", summary.pages_fetched);
    println!("  Failed: {}", summary.fetch_failures);
    println!();

    println!(
        "Results: {} in {:.1}s",
        summary.results,
        summary.duration.as_secs_f64()
    );
}
