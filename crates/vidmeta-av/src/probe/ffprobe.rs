//! FFprobe-based [`Prober`] implementation.
//!
//! Shells out to `ffprobe -v error -print_format json -show_format -show_streams`
//! and maps the JSON output into [`MediaInfo`]. Numeric fields are read
//! leniently: ffprobe reports some numbers as strings and uses `"N/A"` for
//! values it could not determine, both of which become `None` instead of
//! failing the whole parse.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tokio::runtime::Runtime;

use super::types::{AudioStream, MediaInfo, VideoStream};
use super::Prober;
use crate::command::ToolCommand;
use crate::{tools, Error, Result};

const TOOL: &str = "ffprobe";

/// A prober backed by the `ffprobe` CLI.
///
/// The prober owns a small tokio runtime that drives the subprocess and its
/// timeout; [`Prober::probe`] blocks the calling thread until the tool exits
/// or is killed. Many worker threads may call into the same prober.
#[derive(Debug)]
pub struct FfprobeProber {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
    /// Per-invocation time budget.
    timeout: Duration,
    runtime: Runtime,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if `ffprobe_path` cannot be resolved,
    /// or [`Error::Io`] if the runtime cannot be built.
    pub fn new(ffprobe_path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
        let ffprobe_path = tools::require_tool(ffprobe_path)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("vidmeta-ffprobe")
            .enable_all()
            .build()?;

        Ok(Self {
            ffprobe_path,
            timeout,
            runtime,
        })
    }

    /// Create a prober that finds ffprobe on `PATH`.
    pub fn from_path(timeout: Duration) -> Result<Self> {
        Self::new(TOOL, timeout)
    }

    /// Resolved path of the ffprobe binary in use.
    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe_path
    }

    fn command(&self, path: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(path);
        cmd.timeout(self.timeout);
        cmd
    }
}

impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn probe(&self, path: &Path) -> Result<MediaInfo> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let output = self.runtime.block_on(self.command(path).execute())?;

        #[cfg(feature = "tracing")]
        if !output.stderr.trim().is_empty() {
            tracing::debug!(path = %path.display(), stderr = %output.stderr.trim(), "ffprobe reported warnings");
        }

        parse_ffprobe_json(path, &output.stdout)
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    #[serde(default, deserialize_with = "lenient_u32")]
    nb_streams: Option<u32>,
    format_name: Option<String>,
    format_long_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    duration: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    codec_long_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    height: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    channels: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    duration: Option<f64>,
    #[serde(default)]
    disposition: FfprobeDisposition,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default, deserialize_with = "lenient_u32")]
    attached_pic: Option<u32>,
}

// ---------------------------------------------------------------------------
// Lenient scalar readers
// ---------------------------------------------------------------------------

fn scalar_to_f64(value: Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite() && *v >= 0.0)
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_f64))
}

fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse ffprobe's JSON output for `path`.
///
/// # Errors
///
/// Returns [`Error::ParseError`] when `json` is empty or is not a JSON
/// object in ffprobe's shape. Missing or malformed individual fields are
/// not errors.
pub fn parse_ffprobe_json(path: &Path, json: &str) -> Result<MediaInfo> {
    if json.trim().is_empty() {
        return Err(Error::parse_error(TOOL, "empty output"));
    }

    let output: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| Error::parse_error(TOOL, e.to_string()))?;

    Ok(build_media_info(path, output))
}

fn build_media_info(path: &Path, output: FfprobeOutput) -> MediaInfo {
    let format = output.format.unwrap_or_default();

    let video_stream = output.streams.iter().find(|s| {
        s.codec_type.as_deref() == Some("video") && s.disposition.attached_pic != Some(1)
    });
    let audio_stream = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    // Some containers only report duration per stream.
    let duration = format
        .duration
        .or_else(|| video_stream.and_then(|s| s.duration))
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());

    let stream_count = format.nb_streams.or_else(|| {
        (!output.streams.is_empty()).then(|| output.streams.len() as u32)
    });

    let title = format
        .tags
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("title"))
        .and_then(|(_, v)| v.as_str())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    MediaInfo {
        file_path: path.to_path_buf(),
        container: format.format_long_name.or(format.format_name),
        duration,
        stream_count,
        title,
        video: video_stream.map(|s| VideoStream {
            codec: s.codec_name.clone(),
            codec_long_name: s.codec_long_name.clone(),
            width: s.width.filter(|w| *w > 0),
            height: s.height.filter(|h| *h > 0),
        }),
        audio: audio_stream.map(|s| AudioStream {
            codec: s.codec_name.clone(),
            codec_long_name: s.codec_long_name.clone(),
            channels: s.channels,
        }),
    }
}
