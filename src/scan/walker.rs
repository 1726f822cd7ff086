//! Lazy discovery of video files under a set of roots.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use vidmeta_common::paths::has_extension_in;
use walkdir::WalkDir;

use super::exclude::ExclusionFilter;
use super::markers::MarkerWriter;
use super::state::RunState;
use crate::{Error, Result};

/// A discovered file waiting to be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub path: PathBuf,
    /// The scan root the file was found under.
    pub root: PathBuf,
}

/// Walk bookkeeping that is not part of the run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub excluded_dirs: u64,
    pub markers_placed: u64,
    pub errors: u64,
}

/// Canonicalize `paths`, drop duplicates and roots nested inside another
/// root.
///
/// A nested root survives when the enclosing root's walk would prune it,
/// i.e. some directory between the two is excluded by `filter`. Every path
/// must exist. The result is sorted.
pub fn canonical_roots(paths: &[PathBuf], filter: &ExclusionFilter) -> Result<Vec<PathBuf>> {
    let mut roots = Vec::with_capacity(paths.len());
    for path in paths {
        let root = path
            .canonicalize()
            .map_err(|e| Error::config(format!("scan root {:?} is not accessible: {}", path, e)))?;
        roots.push(root);
    }

    roots.sort();
    roots.dedup();

    let mut kept: Vec<PathBuf> = Vec::with_capacity(roots.len());
    for root in roots {
        // sorted order puts a parent before anything nested in it
        let covering = kept
            .iter()
            .filter(|parent| root.starts_with(parent))
            .max_by_key(|parent| parent.components().count())
            .filter(|parent| !pruned_between(parent, &root, filter))
            .cloned();
        match covering {
            Some(parent) => debug!("Skipping root {:?}, already covered by {:?}", root, parent),
            None => kept.push(root),
        }
    }

    if kept.is_empty() {
        return Err(Error::config("no scan roots given"));
    }
    Ok(kept)
}

/// Whether a walk from `parent` prunes some directory on the way down to
/// `nested`, `nested` included.
fn pruned_between(parent: &Path, nested: &Path, filter: &ExclusionFilter) -> bool {
    nested
        .ancestors()
        .take_while(|dir| *dir != parent)
        .any(|dir| filter.should_skip(dir))
}

/// Iterator over video files under one or more roots.
///
/// Excluded directories are pruned without being read. Unreadable
/// directories, broken links and symlink loops are logged and counted, and
/// the walk carries on.
pub struct TreeWalker {
    pending: VecDeque<PathBuf>,
    current: Option<(PathBuf, walkdir::IntoIter)>,
    filter: Arc<ExclusionFilter>,
    extensions: Vec<String>,
    markers: Option<MarkerWriter>,
    state: Arc<RunState>,
    stats: WalkStats,
}

impl TreeWalker {
    /// Walk `roots`, which should come from [`canonical_roots`].
    pub fn new(
        roots: Vec<PathBuf>,
        filter: Arc<ExclusionFilter>,
        extensions: Vec<String>,
        state: Arc<RunState>,
    ) -> Self {
        Self {
            pending: roots.into(),
            current: None,
            filter,
            extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
            markers: None,
            state,
            stats: WalkStats::default(),
        }
    }

    /// Place `.nomedia` markers in excluded directories.
    pub fn with_markers(mut self, markers: MarkerWriter) -> Self {
        self.markers = Some(markers);
        self
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    fn exclude(&mut self, dir: &Path) {
        self.stats.excluded_dirs += 1;
        debug!("Excluding {:?}", dir);

        let Some(markers) = &self.markers else {
            return;
        };
        match markers.place(dir) {
            Ok(true) => {
                self.stats.markers_placed += 1;
                debug!("Placed marker in {:?}", dir);
            }
            Ok(false) => debug!("Marker already present in {:?}", dir),
            Err(e) => warn!("Failed to place marker in {:?}: {}", dir, e),
        }
    }

    fn record_error(&mut self, error: walkdir::Error) {
        self.stats.errors += 1;
        self.state.record_walk_error();

        let path = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if let Some(ancestor) = error.loop_ancestor() {
            warn!("Symlink loop at {} (points back to {:?})", path, ancestor);
        } else {
            warn!("Cannot read {}: {}", path, error);
        }
    }
}

impl Iterator for TreeWalker {
    type Item = FileTask;

    fn next(&mut self) -> Option<FileTask> {
        loop {
            if self.current.is_none() {
                let root = self.pending.pop_front()?;
                debug!("Walking {:?}", root);
                let iter = WalkDir::new(&root)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter();
                self.current = Some((root, iter));
            }

            let (root, iter) = self.current.as_mut()?;
            let Some(entry) = iter.next() else {
                self.current = None;
                continue;
            };

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record_error(e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if entry.depth() > 0 && self.filter.should_skip(entry.path()) {
                    iter.skip_current_dir();
                    let dir = entry.into_path();
                    self.exclude(&dir);
                }
                continue;
            }

            if !entry.file_type().is_file() || !has_extension_in(entry.path(), &self.extensions)
            {
                continue;
            }

            let root = root.clone();
            self.state.record_discovered();
            return Some(FileTask {
                path: entry.into_path(),
                root,
            });
        }
    }
}
