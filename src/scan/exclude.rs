//! Directory exclusion rules.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::config::ExcludeConfig;
use crate::{Error, Result};

/// Directory names pruned by default: bonus material, NAS thumbnails and
/// recycle bins.
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "Deleted Scenes",
    "@eaDir",
    "External AC3",
    "Extras",
    "Featurettes",
    "Interviews",
    "Select Soundbites",
    "Soundtrack",
    "Storyboards",
    "Trailers",
    "$RECYCLE.BIN",
    ".thumbnails",
];

/// Directory name patterns pruned by default.
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &[r"^\.Trash(-\d+)?$"];

/// Decides which directories the walker prunes.
///
/// Matching is against the directory's final path component only, so the
/// same name is skipped wherever it appears in the tree.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    names: HashSet<String>,
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    pub fn new<N, P>(names: N, patterns: P) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| {
                    Error::config(format!("invalid exclusion pattern '{}': {}", p.as_ref(), e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            names: names.into_iter().map(Into::into).collect(),
            patterns,
        })
    }

    pub fn from_config(config: &ExcludeConfig) -> Result<Self> {
        Self::new(config.names.iter().cloned(), &config.patterns)
    }

    /// A filter that skips nothing.
    pub fn none() -> Self {
        Self {
            names: HashSet::new(),
            patterns: Vec::new(),
        }
    }

    /// Whether the directory at `dir` should not be descended into.
    pub fn should_skip(&self, dir: &Path) -> bool {
        let Some(name) = dir.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.names.contains(name.as_ref()) || self.patterns.iter().any(|p| p.is_match(&name))
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            patterns: DEFAULT_EXCLUDED_PATTERNS
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
        }
    }
}
