//! Volume labels and mount-relative paths.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use crate::{Error, Result};

/// The volume a scan root lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub label: String,
    pub mount_point: PathBuf,
}

/// Resolve the volume for `root`, using `label_override` as the label when
/// given. The mount point is always detected.
pub fn resolve_volume(root: &Path, label_override: Option<&str>) -> VolumeInfo {
    let mount_point = mount_point(root);
    let label = match label_override {
        Some(label) => label.to_string(),
        None => label_for_mount(&mount_point),
    };
    VolumeInfo { label, mount_point }
}

/// Reject volumes that share a label but sit on different mounts.
///
/// Rows are identified by label and drive path, so two such mounts could
/// each produce a row for `/Films/a.mkv` that later merges would collapse.
pub fn check_distinct_labels<'a>(volumes: impl IntoIterator<Item = &'a VolumeInfo>) -> Result<()> {
    let mut mounts: HashMap<&str, &Path> = HashMap::new();
    for volume in volumes {
        match mounts.get(volume.label.as_str()) {
            Some(mount) if *mount != volume.mount_point.as_path() => {
                return Err(Error::config(format!(
                    "mounts {:?} and {:?} share the volume label '{}'; scan them separately or give distinct labels",
                    mount, volume.mount_point, volume.label
                )));
            }
            Some(_) => {}
            None => {
                mounts.insert(&volume.label, &volume.mount_point);
            }
        }
    }
    Ok(())
}

/// Label derived from a mount point: its final component, or the mount
/// point itself for a filesystem root.
pub fn label_for_mount(mount_point: &Path) -> String {
    mount_point
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| mount_point.display().to_string())
}

/// Find the mount point containing `path`: the highest ancestor on the same
/// device.
#[cfg(unix)]
pub fn mount_point(path: &Path) -> PathBuf {
    use std::os::unix::fs::MetadataExt;

    let Ok(meta) = std::fs::metadata(path) else {
        return filesystem_root(path);
    };
    let device = meta.dev();

    let mut mount = path.to_path_buf();
    for ancestor in path.ancestors().skip(1) {
        match std::fs::metadata(ancestor) {
            Ok(m) if m.dev() == device => mount = ancestor.to_path_buf(),
            _ => break,
        }
    }
    mount
}

/// Find the mount point containing `path`: its drive or filesystem root.
#[cfg(not(unix))]
pub fn mount_point(path: &Path) -> PathBuf {
    filesystem_root(path)
}

fn filesystem_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// `file` relative to `mount_point`, with a leading separator.
///
/// Falls back to `file` without its drive prefix when it is not under
/// `mount_point`.
pub fn drive_path(file: &Path, mount_point: &Path) -> String {
    let relative = file.strip_prefix(mount_point).unwrap_or(file);

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => None,
        })
        .collect();

    let separator = MAIN_SEPARATOR.to_string();
    format!("{}{}", separator, parts.join(&separator))
}
