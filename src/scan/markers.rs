//! `.nomedia` marker files.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Name of the marker that tells media indexers to ignore a directory.
pub const MARKER_FILE_NAME: &str = ".nomedia";

/// Places empty marker files in directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerWriter;

impl MarkerWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create `<dir>/.nomedia`. Returns `Ok(false)` if it already exists.
    pub fn place(&self, dir: &Path) -> io::Result<bool> {
        let result = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(MARKER_FILE_NAME));

        match result {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
    }
}
