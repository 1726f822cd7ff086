//! Sidecar subtitle lookup.

use std::fs;
use std::path::Path;

use vidmeta_common::paths::{hearing_impaired_subtitle, subtitle_candidates};

use crate::table::{SidecarInfo, SidecarSubtitles};

/// Look for subtitle files next to `video`.
///
/// The regular subtitle is the first existing candidate from
/// [`subtitle_candidates`]; the hearing-impaired one has a fixed name.
pub fn find_sidecars(video: &Path, language: &str) -> SidecarSubtitles {
    let regular = subtitle_candidates(video, language)
        .iter()
        .find_map(|candidate| stat_sidecar(candidate))
        .unwrap_or_default();
    let hearing_impaired =
        stat_sidecar(&hearing_impaired_subtitle(video, language)).unwrap_or_default();

    SidecarSubtitles {
        regular,
        hearing_impaired,
    }
}

fn stat_sidecar(path: &Path) -> Option<SidecarInfo> {
    let meta = fs::metadata(path).ok()?;
    meta.is_file().then(|| SidecarInfo::Present {
        size_bytes: meta.len(),
    })
}
