//! # vidmeta-av
//!
//! Media probing for video files.
//!
//! This crate wraps the external `ffprobe` tool behind the [`Prober`] trait so
//! callers can treat probing as a synchronous, blocking function and swap in
//! their own implementation in tests.
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use vidmeta_av::{FfprobeProber, Prober};
//!
//! let prober = FfprobeProber::from_path(Duration::from_secs(60))?;
//! let info = prober.probe(Path::new("/path/to/video.mkv"))?;
//! if let Some(video) = &info.video {
//!     println!("{:?}x{:?}", video.width, video.height);
//! }
//! # Ok::<(), vidmeta_av::Error>(())
//! ```

mod command;
mod error;
pub mod probe;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{AudioStream, FfprobeProber, MediaInfo, Prober, VideoStream};
pub use tools::{check_tool, require_tool, ToolInfo};
