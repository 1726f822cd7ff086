use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scan::exclude::{DEFAULT_EXCLUDED_NAMES, DEFAULT_EXCLUDED_PATTERNS};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Number of probe worker threads (default: 4 per logical CPU)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Capacity of the queue between the walker and the workers.
    /// Defaults to 16 slots per worker.
    #[serde(default)]
    pub queue_capacity: Option<usize>,

    /// File extensions to probe, lowercase and without a leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Language infix used to look up sidecar subtitles
    #[serde(default = "default_subtitle_language")]
    pub subtitle_language: String,

    /// Fixed volume label, overriding mount-point detection
    #[serde(default)]
    pub volume_label: Option<String>,

    #[serde(default)]
    pub exclude: ExcludeConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: None,
            extensions: default_extensions(),
            subtitle_language: default_subtitle_language(),
            volume_label: None,
            exclude: ExcludeConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Effective queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
            .unwrap_or_else(|| self.workers.saturating_mul(16))
    }
}

fn default_workers() -> usize {
    num_cpus::get() * 4
}

fn default_extensions() -> Vec<String> {
    vidmeta_common::paths::video_extensions()
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_subtitle_language() -> String {
    "en".to_string()
}

/// Directories pruned from the walk, matched against the directory's own
/// name. Names match exactly; patterns are regular expressions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExcludeConfig {
    #[serde(default = "default_excluded_names")]
    pub names: Vec<String>,

    #[serde(default = "default_excluded_patterns")]
    pub patterns: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            names: default_excluded_names(),
            patterns: default_excluded_patterns(),
        }
    }
}

fn default_excluded_names() -> Vec<String> {
    DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_patterns() -> Vec<String> {
    DEFAULT_EXCLUDED_PATTERNS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// ffprobe executable, either a name on PATH or a full path
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: PathBuf,

    /// Per-file probe timeout in seconds (default: 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: default_ffprobe_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where the table is written. Relative paths resolve against the
    /// working directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotifyConfig {
    /// Send a desktop notification when a run completes
    #[serde(default)]
    pub enabled: bool,
}
