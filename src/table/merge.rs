//! Combining tables from several runs into one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::row::Row;
use super::writer::{read_table, write_table};
use crate::{Error, Result};

/// Counts from a completed merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    pub inputs: usize,
    pub rows_read: usize,
    pub rows_written: usize,
    pub duplicates: usize,
}

/// Merge rows from `inputs`, dropping later rows for a file already seen.
///
/// A file is identified by its volume label and drive path.
pub fn merge_rows(tables: impl IntoIterator<Item = Vec<Row>>) -> (Vec<Row>, usize) {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut merged = Vec::new();
    let mut duplicates = 0;

    for row in tables.into_iter().flatten() {
        let (volume, path) = row.identity();
        if seen.insert((volume.to_string(), path.to_string())) {
            merged.push(row);
        } else {
            duplicates += 1;
        }
    }

    merged.sort();
    (merged, duplicates)
}

/// Read every table in `inputs`, merge them and write the result to
/// `output`.
///
/// All inputs are read before anything is written, so `output` may be one
/// of the inputs.
pub fn merge_tables(inputs: &[PathBuf], output: &Path) -> Result<MergeReport> {
    if inputs.is_empty() {
        return Err(Error::config("no tables given to merge"));
    }
    if let Some(missing) = inputs.iter().find(|p| !p.is_file()) {
        return Err(Error::config(format!(
            "table {:?} does not exist",
            missing
        )));
    }

    let mut tables = Vec::with_capacity(inputs.len());
    let mut rows_read = 0;
    for input in inputs {
        let rows = read_table(input)?;
        tracing::info!("Read {} rows from {:?}", rows.len(), input);
        rows_read += rows.len();
        tables.push(rows);
    }

    let (merged, duplicates) = merge_rows(tables);
    write_table(output, &merged)?;

    if duplicates > 0 {
        tracing::info!("Dropped {} duplicate rows", duplicates);
    }

    Ok(MergeReport {
        inputs: inputs.len(),
        rows_read,
        rows_written: merged.len(),
        duplicates,
    })
}
