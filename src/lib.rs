//! Vidmeta - concurrent video metadata scanner
//!
//! Walks one or more directory roots, probes every video file with an
//! external tool on a fixed-size pool of worker threads, and writes one
//! tab-separated row per discovered file. Rows are ordered by volume label,
//! path and title, so two runs over the same files produce the same table no
//! matter which worker finished first.
//!
//! # Architecture
//!
//! ```text
//!  roots ──▶ TreeWalker ──(bounded queue)──▶ ProbePool (N threads)
//!              │  ExclusionFilter                │  Prober::probe
//!              │  MarkerWriter                   │  sidecar lookup
//!              ▼                                 ▼
//!           RunState ◀──── atomic ticks ──── ResultAggregator
//!              │                                 │
//!              ▼                                 ▼
//!        ProgressTracker                   finalize + write_table
//!                                                │
//!                                                ▼
//!                                           RunSummary
//! ```
//!
//! The library crate exposes the pipeline for integration testing; the
//! binary adds argument parsing, logging setup and notifications.

pub mod config;
pub mod error;
pub mod notifications;
pub mod scan;
pub mod summary;
pub mod table;

pub use error::{Error, Result};
