//! Media information types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Codec names (short and long form) that are already space-efficient.
const EFFICIENT_CODECS: &[&str] = &[
    "av1",
    "hevc",
    "Alliance for Open Media AV1",
    "H.265 / HEVC (High Efficiency Video Coding)",
];

/// Information about a media file.
///
/// Every field the tool may fail to report is optional; callers render
/// missing values with a sentinel rather than failing the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// Container format, long name preferred (e.g., "Matroska / WebM").
    pub container: Option<String>,
    /// Duration of the media.
    pub duration: Option<Duration>,
    /// Total number of streams of any type.
    pub stream_count: Option<u32>,
    /// Title tag stored in the container.
    pub title: Option<String>,
    /// First video stream, ignoring attached cover art.
    pub video: Option<VideoStream>,
    /// First audio stream.
    pub audio: Option<AudioStream>,
}

/// Information about a video stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoStream {
    /// Short codec name (e.g., "hevc").
    pub codec: Option<String>,
    /// Long codec name (e.g., "H.265 / HEVC (High Efficiency Video Coding)").
    pub codec_long_name: Option<String>,
    /// Width in pixels.
    pub width: Option<u32>,
    /// Height in pixels.
    pub height: Option<u32>,
}

/// Information about an audio stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioStream {
    /// Short codec name (e.g., "ac3").
    pub codec: Option<String>,
    /// Long codec name (e.g., "ATSC A/52A (AC-3)").
    pub codec_long_name: Option<String>,
    /// Number of channels.
    pub channels: Option<u32>,
}

impl VideoStream {
    /// Codec name for display, long form preferred.
    pub fn display_codec(&self) -> Option<&str> {
        self.codec_long_name.as_deref().or(self.codec.as_deref())
    }

    /// Whether the stream already uses AV1 or HEVC.
    ///
    /// `None` when the tool reported no codec at all.
    pub fn is_efficient_codec(&self) -> Option<bool> {
        if self.codec.is_none() && self.codec_long_name.is_none() {
            return None;
        }
        let matches = |name: &Option<String>| {
            name.as_deref()
                .map(|n| EFFICIENT_CODECS.iter().any(|c| c.eq_ignore_ascii_case(n)))
                .unwrap_or(false)
        };
        Some(matches(&self.codec) || matches(&self.codec_long_name))
    }
}

impl AudioStream {
    /// Codec name for display, long form preferred.
    pub fn display_codec(&self) -> Option<&str> {
        self.codec_long_name.as_deref().or(self.codec.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(codec: Option<&str>, long: Option<&str>) -> VideoStream {
        VideoStream {
            codec: codec.map(String::from),
            codec_long_name: long.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_efficient_codec_detection() {
        assert_eq!(video(Some("hevc"), None).is_efficient_codec(), Some(true));
        assert_eq!(video(Some("AV1"), None).is_efficient_codec(), Some(true));
        assert_eq!(
            video(None, Some("H.265 / HEVC (High Efficiency Video Coding)")).is_efficient_codec(),
            Some(true)
        );
        assert_eq!(video(Some("h264"), None).is_efficient_codec(), Some(false));
        assert_eq!(video(None, None).is_efficient_codec(), None);
    }

    #[test]
    fn test_display_codec_prefers_long_name() {
        let v = video(Some("h264"), Some("H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10"));
        assert_eq!(v.display_codec(), Some("H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10"));
        assert_eq!(video(Some("h264"), None).display_codec(), Some("h264"));
    }
}
