//! Formatting helpers for report cells and summaries.

use humansize::{format_size, BINARY};
use std::time::Duration;

/// Format a byte count with binary units (KiB, MiB, GiB, ...).
///
/// # Examples
///
/// ```
/// use vidmeta_common::format::human_size;
///
/// assert!(human_size(3 * 1024 * 1024 * 1024).contains("GiB"));
/// ```
pub fn human_size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// Render a duration as hours, minutes and seconds.
///
/// Zero-valued hours and minutes are omitted. Durations below one second
/// keep two decimal places so short clips don't all read as `0s`; anything
/// longer is rounded to the nearest second.
///
/// With `concise` the output looks like `1h:2m:3s`; otherwise it reads
/// `1 hour(s) 2 minute(s) 3 second(s)`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vidmeta_common::format::format_hms;
///
/// assert_eq!(format_hms(Duration::from_secs(5400), true), "1h:30m:0s");
/// assert_eq!(format_hms(Duration::from_millis(250), false), "0.25 second(s)");
/// ```
pub fn format_hms(duration: Duration, concise: bool) -> String {
    let raw = duration.as_secs_f64();

    if raw > 0.0 && raw < 1.0 {
        let seconds = (raw * 100.0).round() / 100.0;
        return if concise {
            format!("{seconds}s")
        } else {
            format!("{seconds} second(s)")
        };
    }

    let total = raw.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if concise {
        if hours > 0 {
            out.push_str(&format!("{hours}h:"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}m:"));
        }
        out.push_str(&format!("{seconds}s"));
    } else {
        if hours > 0 {
            out.push_str(&format!("{hours} hour(s) "));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes} minute(s) "));
        }
        out.push_str(&format!("{seconds} second(s)"));
    }
    out
}
