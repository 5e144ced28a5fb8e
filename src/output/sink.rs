//! Thread-safe result collection

use crate::output::MatchResult;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Append-only collection of match results shared by every crawl task
///
/// Cloning is cheap and yields a handle onto the same underlying sequence.
/// Results keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResultSink {
    results: Arc<Mutex<Vec<MatchResult>>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result
    pub fn append(&self, result: MatchResult) {
        tracing::info!("Match found: {}", result.url);
        self.lock().push(result);
    }

    /// Number of results collected so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the results collected so far
    pub fn snapshot(&self) -> Vec<MatchResult> {
        self.lock().clone()
    }

    /// Takes the collected results, leaving the sink empty
    pub fn into_results(self) -> Vec<MatchResult> {
        std::mem::take(&mut *self.lock())
    }

    // A panicking writer cannot leave a half-pushed Vec behind, so a
    // poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Vec<MatchResult>> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
