//! Path utilities for detecting video files and locating sidecar subtitles.
//!
//! The extension list is what the scanner hands to the probing tool. Anything
//! else found during a walk is ignored without being counted.

use std::path::{Path, PathBuf};

/// Extensions the probing tool is expected to understand.
const VIDEO_EXTENSIONS: &[&str] = &[
    "av1", "avi", "divx", "mp4", "mkv", "m4v", "mpg", "mpeg", "mov", "rm", "vob", "wmv", "flv",
    "3gp", "rmvb", "webm", "dat", "mts",
];

/// Extension used by sidecar subtitle files.
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Infix marking the hearing-impaired subtitle variant.
pub const HEARING_IMPAIRED_TAG: &str = "hi";

/// Check if a path's extension is in `extensions`, ignoring case.
///
/// Entries in `extensions` are expected to be lowercase and without a
/// leading dot.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vidmeta_common::paths::{has_extension_in, video_extensions};
///
/// assert!(has_extension_in(Path::new("movie.mkv"), video_extensions()));
/// assert!(has_extension_in(Path::new("/path/to/CLIP.MTS"), video_extensions()));
/// assert!(!has_extension_in(Path::new("movie.en.srt"), video_extensions()));
/// ```
pub fn has_extension_in<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|e| e.as_ref() == ext)
        })
        .unwrap_or(false)
}

/// Get the list of default video file extensions.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}

/// Build `<base>.<suffix>` where `base` is `video` with its extension removed.
///
/// `with_extension` cannot be used here because it would replace only the
/// last dot-separated part of a multi-part suffix like `en.hi.srt`.
fn sibling_with_suffix(video: &Path, suffix: &str) -> PathBuf {
    let mut name = video
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    video.with_file_name(name)
}

/// Candidate paths for the regular sidecar subtitle of `video`, in lookup
/// order: `<base>.<lang>.srt`, then `<base>.srt`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use vidmeta_common::paths::subtitle_candidates;
///
/// let candidates = subtitle_candidates(Path::new("/films/Alien.mkv"), "en");
/// assert_eq!(candidates[0], PathBuf::from("/films/Alien.en.srt"));
/// assert_eq!(candidates[1], PathBuf::from("/films/Alien.srt"));
/// ```
pub fn subtitle_candidates(video: &Path, language: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if !language.is_empty() {
        candidates.push(sibling_with_suffix(
            video,
            &format!("{language}.{SUBTITLE_EXTENSION}"),
        ));
    }
    candidates.push(sibling_with_suffix(video, SUBTITLE_EXTENSION));
    candidates
}

/// Path of the hearing-impaired sidecar subtitle of `video`:
/// `<base>.<lang>.hi.srt`, or `<base>.hi.srt` when no language is set.
pub fn hearing_impaired_subtitle(video: &Path, language: &str) -> PathBuf {
    let suffix = if language.is_empty() {
        format!("{HEARING_IMPAIRED_TAG}.{SUBTITLE_EXTENSION}")
    } else {
        format!("{language}.{HEARING_IMPAIRED_TAG}.{SUBTITLE_EXTENSION}")
    };
    sibling_with_suffix(video, &suffix)
}
