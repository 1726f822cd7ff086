//! Writing tables to disk.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::row::Row;
use crate::{Error, Result};

/// Write the header and `rows` to `writer`, one line each.
pub fn render_table<W: Write>(mut writer: W, rows: &[Row]) -> io::Result<()> {
    writeln!(writer, "{}", Row::header_line())?;
    for row in rows {
        writeln!(writer, "{}", row.to_line())?;
    }
    writer.flush()
}

/// Write a complete table to `path`.
///
/// The table goes to a temporary file in the same directory first and is
/// then renamed over `path`, so readers never see a partial table.
pub fn write_table(path: &Path, rows: &[Row]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write = || -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        render_table(BufWriter::new(temp.as_file_mut()), rows)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    };

    write().map_err(|e| Error::serialization(path, e))?;
    tracing::debug!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Read a table written by [`write_table`] or by older releases.
///
/// A leading byte-order mark and the header line are skipped, as are blank
/// lines.
pub fn read_table(path: &Path) -> Result<Vec<Row>> {
    let content = fs::read_to_string(path).map_err(|e| Error::Merge {
        path: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut rows = Vec::new();
    let mut seen_content = false;
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if !seen_content {
            seen_content = true;
            if Row::is_header(line) {
                continue;
            }
        }
        let row = Row::parse_line(line).map_err(|message| Error::Merge {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        })?;
        rows.push(row);
    }

    Ok(rows)
}
