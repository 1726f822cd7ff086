use clap::Parser;
use std::path::PathBuf;

use vidmeta::config::Config;

/// Default table name for scans.
pub const DEFAULT_OUTPUT: &str = "vidmeta.tsv";

/// Default table name for merges.
pub const DEFAULT_MERGE_OUTPUT: &str = "vidmeta-merged.tsv";

#[derive(Parser, Debug)]
#[command(name = "vidmeta")]
#[command(
    author,
    version,
    about = "Scan directory trees for video files and tabulate their metadata",
    long_about = "Walks each PATH, probes every video file with ffprobe on a pool of \
worker threads and writes one tab-separated row per file.\n\n\
With --merge, each PATH is an existing table instead; the tables are combined \
and duplicate files dropped."
)]
pub struct Cli {
    /// Directories (or single files) to scan; table files with --merge
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Show a progress bar with the percentage of discovered files probed
    #[arg(short, long)]
    pub percentage: bool,

    /// Create a .nomedia marker in every excluded directory
    #[arg(short, long)]
    pub nomedia: bool,

    /// Enable verbose logging and report title variants after the run
    #[arg(short, long)]
    pub verbose: bool,

    /// Merge existing tables instead of scanning
    #[arg(short, long, conflicts_with = "update")]
    pub merge: bool,

    /// Only probe files changed since the previous table (not implemented)
    #[arg(short, long)]
    pub update: bool,

    /// Output table path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of probe worker threads
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Volume label to record instead of the detected mount point
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,

    /// ffprobe executable to use
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,

    /// Per-file probe timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Send a desktop notification when the run completes
    #[arg(long)]
    pub notify: bool,
}

impl Cli {
    /// Overlay command-line settings on a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.scan.workers = workers;
        }
        if let Some(label) = &self.label {
            config.scan.volume_label = Some(label.clone());
        }
        if let Some(ffprobe) = &self.ffprobe {
            config.probe.ffprobe_path = ffprobe.clone();
        }
        if let Some(timeout) = self.timeout {
            config.probe.timeout_secs = timeout;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if self.notify {
            config.notify.enabled = true;
        }
    }

    /// Resolve the table path for this invocation.
    pub fn output_path(&self, config: &Config) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        if self.merge {
            return PathBuf::from(DEFAULT_MERGE_OUTPUT);
        }
        config
            .output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
