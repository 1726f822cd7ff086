//! Shared counters for a run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by the walker, the workers and the progress observer.
///
/// Writers only increment; readers may see slightly stale values.
#[derive(Debug)]
pub struct RunState {
    discovered: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    walk_errors: AtomicU64,
    started: Instant,
}

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    pub discovered: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub walk_errors: u64,
}

impl RunCounts {
    /// Files that have an outcome, successful or not.
    pub fn completed(&self) -> u64 {
        self.succeeded + self.failed
    }
}

impl RunState {
    /// Create zeroed counters and start the run clock.
    pub fn new() -> Self {
        Self {
            discovered: AtomicU64::new(0),
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            walk_errors: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub(crate) fn record_discovered(&self) {
        self.discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn record_walk_error(&self) {
        self.walk_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    ///
    /// Completion counters are read before `discovered`, so a snapshot never
    /// shows more completed files than discovered ones.
    pub fn snapshot(&self) -> RunCounts {
        let succeeded = self.succeeded.load(Ordering::Acquire);
        let failed = self.failed.load(Ordering::Acquire);
        RunCounts {
            discovered: self.discovered.load(Ordering::Acquire),
            succeeded,
            failed,
            walk_errors: self.walk_errors.load(Ordering::Relaxed),
        }
    }

    /// Time since the counters were created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
