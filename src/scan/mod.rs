//! Discovery and probing of video files.
//!
//! [`run_scan`] ties the pieces together: the [`TreeWalker`] runs on the
//! calling thread and feeds a [`ProbePool`] through a bounded queue, workers
//! hand outcomes to a [`ResultAggregator`], and once the queue drains the
//! table is sorted and written in one go.

pub mod exclude;
pub mod markers;
pub mod pool;
pub mod progress;
pub mod sidecar;
pub mod state;
pub mod volume;
pub mod walker;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use vidmeta_av::Prober;

pub use exclude::ExclusionFilter;
pub use markers::MarkerWriter;
pub use pool::{ProbeContext, ProbePool};
pub use progress::{ProgressHandle, ProgressListener, ProgressTracker};
pub use state::{RunCounts, RunState};
pub use volume::VolumeInfo;
pub use walker::{FileTask, TreeWalker, WalkStats};

use crate::config::Config;
use crate::summary::RunSummary;
use crate::table::{write_table, ProbeFailure, ResultAggregator, Row};
use crate::{Error, Result};

/// Settings for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub roots: Vec<PathBuf>,
    pub output: PathBuf,
    pub workers: usize,
    pub queue_capacity: usize,
    pub extensions: Vec<String>,
    pub exclusion: ExclusionFilter,
    pub subtitle_language: String,
    pub volume_label: Option<String>,
    /// Draw a progress bar and log percentages.
    pub progress: bool,
    /// Place `.nomedia` markers in excluded directories.
    pub place_markers: bool,
    /// Receives each percentage reported during the run.
    pub progress_listener: Option<ProgressListener>,
}

impl ScanOptions {
    pub fn from_config(config: &Config, roots: Vec<PathBuf>, output: PathBuf) -> Result<Self> {
        Ok(Self {
            roots,
            output,
            workers: config.scan.workers,
            queue_capacity: config.scan.queue_capacity(),
            extensions: config.scan.extensions.clone(),
            exclusion: ExclusionFilter::from_config(&config.scan.exclude)?,
            subtitle_language: config.scan.subtitle_language.clone(),
            volume_label: config.scan.volume_label.clone(),
            progress: false,
            place_markers: false,
            progress_listener: None,
        })
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn with_markers(mut self, enabled: bool) -> Self {
        self.place_markers = enabled;
        self
    }

    /// Track progress and report it to `listener`, with or without a bar.
    pub fn with_progress_listener(mut self, listener: ProgressListener) -> Self {
        self.progress_listener = Some(listener);
        self
    }
}

/// What a completed scan produced.
#[derive(Debug)]
pub struct ScanOutput {
    /// The rows written, in output order.
    pub rows: Vec<Row>,
    pub failures: Vec<ProbeFailure>,
    pub walk: WalkStats,
    pub summary: RunSummary,
}

/// Walk, probe and write the table.
///
/// Per-file problems never abort the scan; they become failure rows. Only
/// invalid roots and a table that cannot be written are errors.
pub fn run_scan(options: ScanOptions, prober: Arc<dyn Prober>) -> Result<ScanOutput> {
    let state = Arc::new(RunState::new());
    let roots = walker::canonical_roots(&options.roots, &options.exclusion)?;

    let volumes: HashMap<PathBuf, VolumeInfo> = roots
        .iter()
        .map(|root| {
            let volume = volume::resolve_volume(root, options.volume_label.as_deref());
            info!("Scanning {:?} on volume '{}'", root, volume.label);
            (root.clone(), volume)
        })
        .collect();
    volume::check_distinct_labels(volumes.values())?;

    let aggregator = Arc::new(ResultAggregator::new());
    let context = Arc::new(ProbeContext {
        prober,
        aggregator: Arc::clone(&aggregator),
        state: Arc::clone(&state),
        volumes,
        subtitle_language: options.subtitle_language.clone(),
    });
    let pool = ProbePool::spawn(options.workers, options.queue_capacity, context)?;

    let progress = (options.progress || options.progress_listener.is_some()).then(|| {
        let tracker = if options.progress {
            ProgressTracker::with_bar(Arc::clone(&state))
        } else {
            ProgressTracker::new(Arc::clone(&state))
        };
        let tracker = match &options.progress_listener {
            Some(listener) => tracker.with_listener(listener.clone()),
            None => tracker,
        };
        tracker.spawn(progress::POLL_INTERVAL)
    });

    let mut walker = TreeWalker::new(
        roots,
        Arc::new(options.exclusion.clone()),
        options.extensions.clone(),
        Arc::clone(&state),
    );
    if options.place_markers {
        walker = walker.with_markers(MarkerWriter::new());
    }

    for task in walker.by_ref() {
        pool.submit(task)?;
    }
    let walk = walker.stats();
    info!(
        "Walk finished: {} files discovered, {} directories excluded",
        state.snapshot().discovered,
        walk.excluded_dirs
    );

    pool.finish()?;

    let aggregator = Arc::try_unwrap(aggregator)
        .map_err(|_| Error::WorkerPool("aggregator still in use after workers exited".into()))?;
    let table = aggregator.finalize();
    write_table(&options.output, &table.rows)?;

    if let Some(progress) = progress {
        progress.finish();
    }

    let summary = RunSummary::from_state(&state);
    if !summary.is_consistent() {
        warn!(
            "Outcome count mismatch: {} discovered, {} probed, {} failed",
            summary.discovered, summary.succeeded, summary.failed
        );
    }

    for failure in &table.failures {
        warn!("Failed: {:?}: {}", failure.path, failure.reason);
    }

    Ok(ScanOutput {
        rows: table.rows,
        failures: table.failures,
        walk,
        summary,
    })
}
