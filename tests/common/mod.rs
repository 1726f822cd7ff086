//! Shared helpers for integration tests.
//!
//! Provides [`MockProber`], which answers from file names instead of running
//! ffprobe, and small helpers for building media trees on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use vidmeta::config::Config;
use vidmeta::scan::ScanOptions;
use vidmeta_av::{AudioStream, Error, MediaInfo, Prober, Result, VideoStream};

/// Prober driven by file names.
///
/// - names containing `broken` fail like ffprobe on corrupt input
/// - names containing `panic` make the prober panic
/// - everything else succeeds with a 1080p H.264 stream
///
/// With `jitter`, each call sleeps a few milliseconds depending on the name
/// so workers finish out of order.
#[derive(Default)]
pub struct MockProber {
    pub jitter: bool,
    calls: AtomicUsize,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jitter() -> Self {
        Self {
            jitter: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Prober for MockProber {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn probe(&self, path: &Path) -> Result<MediaInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.jitter {
            let delay = name.bytes().map(u64::from).sum::<u64>() % 7;
            thread::sleep(Duration::from_millis(delay));
        }

        if name.contains("broken") {
            return Err(Error::tool_failed(
                "ffprobe",
                "exited with status 1: Invalid data found when processing input",
            ));
        }
        if name.contains("panic") {
            panic!("mock prober panicked on {name}");
        }

        Ok(MediaInfo {
            file_path: path.to_path_buf(),
            container: Some("Matroska / WebM".to_string()),
            duration: Some(Duration::from_secs(5400)),
            stream_count: Some(2),
            title: Some(name),
            video: Some(VideoStream {
                codec: Some("h264".to_string()),
                codec_long_name: Some("H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10".to_string()),
                width: Some(1920),
                height: Some(1080),
            }),
            audio: Some(AudioStream {
                codec: Some("aac".to_string()),
                codec_long_name: Some("AAC (Advanced Audio Coding)".to_string()),
                channels: Some(2),
            }),
        })
    }
}

/// Create `root/relative` with some content, making parent directories.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, relative.as_bytes()).unwrap();
    path
}

/// Scan options over `roots` writing to `output`, with a fixed volume label
/// and a small pool.
pub fn options(roots: Vec<PathBuf>, output: PathBuf, workers: usize) -> ScanOptions {
    let mut config = Config::default();
    config.scan.workers = workers;
    config.scan.volume_label = Some("TestVolume".to_string());
    ScanOptions::from_config(&config, roots, output).unwrap()
}

/// Data lines of a written table (header excluded).
pub fn data_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// Write an executable that mimics `ffprobe -print_format json` output and
/// fails on files whose name contains "broken". Files whose name contains
/// "hang" make it sleep far longer than any test timeout.
#[cfg(unix)]
pub fn fake_ffprobe(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-ffprobe");
    fs::write(
        &script,
        r#"#!/bin/sh
for last; do :; done
case "$last" in
  *broken*) echo "$last: Invalid data found when processing input" >&2; exit 1 ;;
  *hang*) exec sleep 30 ;;
esac
cat <<'JSON'
{
  "streams": [
    {"codec_type": "video", "codec_name": "hevc",
     "codec_long_name": "H.265 / HEVC (High Efficiency Video Coding)",
     "width": 3840, "height": 2160},
    {"codec_type": "audio", "codec_name": "eac3",
     "codec_long_name": "ATSC A/52B (AC-3, E-AC-3)", "channels": 6}
  ],
  "format": {
    "nb_streams": 2,
    "format_name": "matroska,webm",
    "format_long_name": "Matroska / WebM",
    "duration": "3723.000000",
    "tags": {"title": "Fake Title"}
  }
}
JSON
"#,
    )
    .unwrap();
    let mut perms = fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).unwrap();
    script
}
