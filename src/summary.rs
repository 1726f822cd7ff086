//! End-of-run reporting.

use console::style;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vidmeta_common::format::format_hms;

use crate::scan::RunState;
use crate::table::MergeReport;

/// Counts and timing of a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub walk_errors: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Capture the counters and the time elapsed since the run started.
    pub fn from_state(state: &RunState) -> Self {
        let counts = state.snapshot();
        Self {
            discovered: counts.discovered,
            succeeded: counts.succeeded,
            failed: counts.failed,
            walk_errors: counts.walk_errors,
            elapsed: state.elapsed(),
        }
    }

    /// Every discovered file has exactly one outcome.
    pub fn is_consistent(&self) -> bool {
        self.succeeded + self.failed == self.discovered
    }

    /// Files probed per second.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.succeeded + self.failed) as f64 / secs
        } else {
            0.0
        }
    }

    /// One-line text for notifications.
    pub fn notification_message(&self) -> String {
        format!(
            "Probed {} of {} files ({} failed) in {}",
            self.succeeded,
            self.discovered,
            self.failed,
            format_hms(self.elapsed, false)
        )
    }

    /// Print the summary to stdout.
    pub fn print(&self, output: &Path) {
        println!();
        println!("{}", style("Scan Complete").green().bold());
        println!("{}", style("─".repeat(50)).dim());
        println!("  {} {}", style("Discovered:").bold(), self.discovered);
        println!("  {} {}", style("Probed:").bold(), self.succeeded);
        if self.failed > 0 {
            println!("  {} {}", style("Failed:").yellow().bold(), self.failed);
        } else {
            println!("  {} {}", style("Failed:").bold(), self.failed);
        }
        if self.walk_errors > 0 {
            println!(
                "  {} {}",
                style("Walk errors:").yellow().bold(),
                self.walk_errors
            );
        }
        println!(
            "  {} {} ({:.1} files/sec)",
            style("Duration:").bold(),
            format_hms(self.elapsed, false),
            self.rate()
        );
        println!("  {} {}", style("Output:").bold(), output.display());
        println!();
    }
}

/// Print a header at the start of a scan
pub fn print_header(roots: &[PathBuf], workers: usize, output: &Path) {
    println!();
    println!(
        "{} {}",
        style("vidmeta").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    for root in roots {
        println!("  {} {}", style("Root:").bold(), root.display());
    }
    println!("  {} {}", style("Workers:").bold(), workers);
    println!("  {} {}", style("Output:").bold(), output.display());
    println!();
}

/// Print the result of a merge.
pub fn print_merge_summary(report: &MergeReport, output: &Path) {
    println!();
    println!("{}", style("Merge Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Tables:").bold(), report.inputs);
    println!("  {} {}", style("Rows read:").bold(), report.rows_read);
    println!("  {} {}", style("Duplicates:").bold(), report.duplicates);
    println!("  {} {}", style("Rows written:").bold(), report.rows_written);
    println!("  {} {}", style("Output:").bold(), output.display());
    println!();
}
