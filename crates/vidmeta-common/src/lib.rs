//! Vidmeta-Common: Shared constants and utilities.
//!
//! This crate provides common functionality used across vidmeta:
//!
//! - **Path Utilities**: Video extension filtering and sidecar subtitle naming
//! - **Formatting**: Human-readable sizes and durations for report cells
//!
//! # Examples
//!
//! ```
//! use vidmeta_common::paths::{has_extension_in, video_extensions};
//! use vidmeta_common::format::format_hms;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! assert!(has_extension_in(Path::new("movie.mkv"), video_extensions()));
//! assert_eq!(format_hms(Duration::from_secs(3723), true), "1h:2m:3s");
//! ```

pub mod format;
pub mod paths;
