//! Concurrent collection of per-file outcomes.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::PathBuf;

use super::record::{Outcome, ProbeFailure};
use super::row::Row;

/// Collects one [`Outcome`] per discovered file from any number of workers.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outcomes: DashMap<PathBuf, Outcome>,
}

/// Rows in output order plus the failures behind the failed ones.
#[derive(Debug, Clone, Default)]
pub struct FinalizedTable {
    pub rows: Vec<Row>,
    /// Sorted by path.
    pub failures: Vec<ProbeFailure>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome. Returns `false` if the path already had one, in
    /// which case the earlier outcome is kept.
    pub fn insert(&self, outcome: Outcome) -> bool {
        match self.outcomes.entry(outcome.path().to_path_buf()) {
            Entry::Occupied(existing) => {
                tracing::error!(
                    "Duplicate outcome for {:?}; keeping the first one",
                    existing.key()
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
        }
    }

    /// Render every outcome and sort the rows by volume label, drive path
    /// and title.
    pub fn finalize(self) -> FinalizedTable {
        let mut rows = Vec::with_capacity(self.outcomes.len());
        let mut failures = Vec::new();

        for (_, outcome) in self.outcomes {
            rows.push(outcome.to_row());
            if let Outcome::Failed(failure) = outcome {
                failures.push(failure);
            }
        }

        rows.sort();
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        FinalizedTable { rows, failures }
    }
}
