//! Progress reporting for a scan
//!
//! Workers only bump atomic counters in [`RunState`]. A separate observer
//! thread polls them, draws an indicatif bar and logs each new whole
//! percent.

use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::info;

use super::state::{RunCounts, RunState};

/// How often the observer thread polls the counters.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Highest percentage reported before [`ProgressTracker::finish`].
const CAP_BEFORE_FINISH: u8 = 99;

/// Percentage of discovered files that have an outcome.
///
/// While the walk is still running the number of discovered files keeps
/// growing, so the figure is only an estimate until the walk ends.
pub fn percentage(counts: &RunCounts) -> u8 {
    if counts.discovered == 0 {
        return 0;
    }
    let pct = counts.completed().saturating_mul(100) / counts.discovered;
    pct.min(100) as u8
}

/// Callback handed each newly reported percentage, 100 included.
#[derive(Clone)]
pub struct ProgressListener(Arc<dyn Fn(u8) + Send + Sync>);

impl ProgressListener {
    pub fn new(f: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn notify(&self, percent: u8) {
        (self.0)(percent)
    }
}

impl fmt::Debug for ProgressListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgressListener(..)")
    }
}

/// Tracks and reports the share of discovered files that have been probed.
///
/// The reported value never decreases and stays at or below 99 until
/// [`finish`](Self::finish) is called.
pub struct ProgressTracker {
    state: Arc<RunState>,
    reported: Mutex<u8>,
    bar: Option<ProgressBar>,
    listener: Option<ProgressListener>,
}

impl ProgressTracker {
    /// A tracker that only logs.
    pub fn new(state: Arc<RunState>) -> Self {
        Self {
            state,
            reported: Mutex::new(0),
            bar: None,
            listener: None,
        }
    }

    /// A tracker that also draws a progress bar on stderr.
    pub fn with_bar(state: Arc<RunState>) -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            state,
            reported: Mutex::new(0),
            bar: Some(bar),
            listener: None,
        }
    }

    /// Also hand every newly reported percentage to `listener`.
    pub fn with_listener(mut self, listener: ProgressListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Poll the counters and report if the percentage went up.
    ///
    /// Returns the percentage now reported.
    pub fn observe(&self) -> u8 {
        let counts = self.state.snapshot();
        let current = percentage(&counts).min(CAP_BEFORE_FINISH);

        let (reported, raised) = {
            let mut reported = self.reported.lock();
            let raised = current > *reported;
            if raised {
                *reported = current;
            }
            (*reported, raised)
        };

        if raised {
            info!("{}% of discovered files probed", reported);
            if let Some(listener) = &self.listener {
                listener.notify(reported);
            }
        }

        if let Some(bar) = &self.bar {
            bar.set_position(u64::from(reported));
            bar.set_message(format!(
                "{}% | {}/{} files",
                reported,
                counts.completed(),
                counts.discovered
            ));
        }

        reported
    }

    /// Report completion. Call once every outcome has been aggregated.
    pub fn finish(&self) -> u8 {
        let counts = self.state.snapshot();
        *self.reported.lock() = 100;

        if let Some(bar) = &self.bar {
            bar.set_position(100);
            bar.finish_with_message(format!(
                "100% | {}/{} files",
                counts.completed(),
                counts.discovered
            ));
        }
        info!("All discovered files probed");
        if let Some(listener) = &self.listener {
            listener.notify(100);
        }
        100
    }

    /// The last reported percentage.
    pub fn reported(&self) -> u8 {
        *self.reported.lock()
    }

    /// Start polling on a background thread.
    pub fn spawn(self, interval: Duration) -> ProgressHandle {
        let tracker = Arc::new(self);
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let tracker = Arc::clone(&tracker);
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("progress".to_string())
                .spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        tracker.observe();
                        thread::sleep(interval);
                    }
                })
        };

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("Failed to start progress thread: {}", e);
                None
            }
        };

        ProgressHandle {
            tracker,
            stop,
            handle,
        }
    }
}

/// A running progress observer.
pub struct ProgressHandle {
    tracker: Arc<ProgressTracker>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressHandle {
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Stop the observer thread and report 100%.
    pub fn finish(mut self) -> u8 {
        self.stop_thread();
        self.tracker.finish()
    }

    fn stop_thread(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.stop_thread();
    }
}
