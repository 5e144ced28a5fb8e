//! Scheduler for per-username crawl tasks
//!
//! This module handles:
//! - Walking the ordinal space in increasing order
//! - Bounding concurrent per-username tasks via a semaphore
//! - Stopping new launches once the quota is met or ordinals run out
//!
//! Stopping never cancels anything: tasks already launched, and all of their
//! nested work, run to completion before [`Scheduler::run`] returns, so a
//! crawl may end with more results than its quota.

use crate::output::ResultSink;
use crate::username::UsernameEnumerator;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A username handed to one top-level task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in the enumeration
    pub ordinal: u128,

    /// Username derived from the ordinal
    pub username: String,
}

/// Why the scheduler stopped launching tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The result count reached the requested quota
    QuotaReached,

    /// Every ordinal in the enumeration has been launched
    Exhausted,

    /// The worker slots were closed underneath the scheduler
    SlotsClosed,
}

/// Launches one task per candidate username, at most `max_user_tasks` at a time
///
/// The scheduler blocks on a free worker slot instead of polling. Each task
/// owns its slot until it finishes.
pub struct Scheduler {
    /// Worker slots for per-username tasks
    slots: Arc<Semaphore>,

    /// Ordinal to username mapping
    enumerator: UsernameEnumerator,

    /// Next ordinal to launch
    cursor: u128,
}

impl Scheduler {
    /// Creates a scheduler starting at ordinal zero
    ///
    /// # Arguments
    ///
    /// * `max_user_tasks` - Worker slots; values below one are raised to one
    /// * `enumerator` - Ordinal to username mapping
    pub fn new(max_user_tasks: usize, enumerator: UsernameEnumerator) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(max_user_tasks.max(1))),
            enumerator,
            cursor: 0,
        }
    }

    /// Next ordinal that would be launched
    pub fn cursor(&self) -> u128 {
        self.cursor
    }

    /// Worker slots currently free
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Runs the scheduling loop until a stop condition holds and every
    /// launched task has finished
    ///
    /// # Loop
    ///
    /// 1. Prune finished tasks
    /// 2. Stop if `sink` holds at least `quota` results or ordinals are exhausted
    /// 3. Wait for a free worker slot
    /// 4. Re-check the quota, since a finishing task may have just filled it
    /// 5. Launch `launch(candidate)` holding the slot and advance the cursor
    ///
    /// # Arguments
    ///
    /// * `sink` - Result collection watched for the quota
    /// * `quota` - Minimum results wanted; `None` scans the whole ordinal space
    /// * `launch` - Builds the task for one candidate
    pub async fn run<F, Fut>(
        &mut self,
        sink: &ResultSink,
        quota: Option<usize>,
        mut launch: F,
    ) -> StopReason
    where
        F: FnMut(Candidate) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let bound = self.enumerator.bound();
        let quota_met = |sink: &ResultSink| quota.is_some_and(|q| sink.len() >= q);
        let mut in_flight = JoinSet::new();

        let reason = loop {
            while let Some(result) = in_flight.try_join_next() {
                log_task_failure(result);
            }

            if quota_met(sink) {
                break StopReason::QuotaReached;
            }

            if self.cursor >= bound {
                break StopReason::Exhausted;
            }

            let Ok(permit) = Arc::clone(&self.slots).acquire_owned().await else {
                break StopReason::SlotsClosed;
            };

            if quota_met(sink) {
                break StopReason::QuotaReached;
            }

            let ordinal = self.cursor;
            self.cursor += 1;

            let candidate = Candidate {
                ordinal,
                username: self.enumerator.ordinal_to_username(ordinal),
            };
            tracing::trace!("Launching #{} '{}'", candidate.ordinal, candidate.username);

            let task = launch(candidate);
            in_flight.spawn(async move {
                let _slot = permit;
                task.await;
            });
        };

        tracing::info!(
            "Scheduler stopped ({:?}) after {} usernames; waiting for {} running task(s)",
            reason,
            self.cursor,
            in_flight.len()
        );

        while let Some(result) = in_flight.join_next().await {
            log_task_failure(result);
        }

        reason
    }
}

fn log_task_failure(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::warn!("User task failed: {}", e);
    }
}
