//! Media file probing module.
//!
//! [`Prober`] is the seam between the scanner and whatever extracts
//! metadata. The only production implementation is [`FfprobeProber`], which
//! shells out to the `ffprobe` CLI and parses its JSON output.

mod ffprobe;
mod types;

pub use ffprobe::{parse_ffprobe_json, FfprobeProber};
pub use types::*;

use crate::Result;
use std::path::Path;

/// Synchronous metadata extraction for a single file.
///
/// Implementations are shared across worker threads, so they must be
/// `Send + Sync`. A call may block for as long as the underlying tool runs.
pub trait Prober: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Probe a media file at the given path and extract metadata.
    ///
    /// Returns an error only when no usable output was produced. Output
    /// that is merely incomplete comes back as a [`MediaInfo`] with `None`
    /// fields.
    fn probe(&self, path: &Path) -> Result<MediaInfo>;
}
