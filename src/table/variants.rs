//! Detecting several copies of the same title.
//!
//! Files are grouped by the title in their file name, following the naming
//! convention `[yyyy] Title [3D][AV1][4K]`. The embedded title tag is not
//! used since it is often missing or different from the file name.

use std::collections::HashMap;
use std::path::Path;

use super::row::{col, Row};

/// Tags stripped from file names before comparing titles.
const IDENTIFIERS: [&str; 3] = ["[4K]", "[AV1]", "[3D]"];

/// Title and release year parsed from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub title: String,
    pub year: Option<String>,
}

/// Parse the title and release year out of a path's file stem.
pub fn parse_file_name(path: &str) -> ParsedName {
    let stem = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = stem;
    for identifier in IDENTIFIERS {
        name = name.replace(identifier, "");
    }

    let (title, year) = match name.split_once('[') {
        Some((_, rest)) if !rest.is_empty() => {
            let year = rest.split_once(']').map(|(y, _)| y).unwrap_or(rest);
            let title = name.split_once(']').map(|(_, t)| t).unwrap_or("");
            (title.trim().to_string(), Some(year.to_string()))
        }
        _ => (name.trim().to_string(), None),
    };

    ParsedName { title, year }
}

/// One copy of a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantEntry {
    pub width: String,
    pub height: String,
    pub duration: String,
    pub size: String,
    pub volume: String,
    pub path: String,
}

/// A title with more than one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    pub title: String,
    pub entries: Vec<VariantEntry>,
}

/// Group rows by parsed title and keep the groups with more than one row.
///
/// Groups are ordered by the first appearance of their title in `rows`.
/// Failure rows are ignored.
pub fn find_variants(rows: &[Row]) -> Vec<VariantGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<VariantEntry>> = HashMap::new();

    for row in rows.iter().filter(|r| !r.is_failure()) {
        let parsed = parse_file_name(row.drive_path());
        let entry = VariantEntry {
            width: row.cell(col::WIDTH).trim().to_string(),
            height: row.cell(col::HEIGHT).trim().to_string(),
            duration: row.cell(col::DURATION).trim().to_string(),
            size: row.cell(col::SIZE).trim().to_string(),
            volume: row.volume_label().trim().to_string(),
            path: row.drive_path().trim().to_string(),
        };

        let entries = groups.entry(parsed.title.clone()).or_default();
        if entries.is_empty() {
            order.push(parsed.title);
        }
        entries.push(entry);
    }

    order
        .into_iter()
        .filter_map(|title| {
            let entries = groups.remove(&title)?;
            (entries.len() > 1).then_some(VariantGroup { title, entries })
        })
        .collect()
}

/// Log each variant group as a small table.
pub fn log_variants(groups: &[VariantGroup]) {
    if groups.is_empty() {
        tracing::info!("No variants found");
        return;
    }

    for group in groups {
        tracing::info!("The following variants exist for '{}':", group.title);
        tracing::info!(
            "{:>5} | {:>6} | {:<11} | {:>10} | {:<15} | Path",
            "Width",
            "Height",
            "Duration",
            "Size",
            "Volume"
        );
        for entry in &group.entries {
            tracing::info!(
                "{:>5} | {:>6} | {:<11} | {:>10} | {:<15} | {}",
                entry.width,
                entry.height,
                entry.duration,
                entry.size,
                entry.volume,
                entry.path
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row::{COLUMNS, STATUS_OK};

    fn row(volume: &str, path: &str, width: &str) -> Row {
        let mut cells: [String; COLUMNS.len()] = Default::default();
        cells[col::WIDTH] = width.to_string();
        cells[col::VOLUME] = volume.to_string();
        cells[col::PATH] = path.to_string();
        cells[col::STATUS] = STATUS_OK.to_string();
        Row::from_cells(cells)
    }

    #[test]
    fn test_parse_conventional_name() {
        let parsed = parse_file_name("/Films/[1979] Alien [3D][AV1][4K].mkv");
        assert_eq!(parsed.title, "Alien");
        assert_eq!(parsed.year.as_deref(), Some("1979"));
    }

    #[test]
    fn test_parse_plain_name() {
        let parsed = parse_file_name("/Films/Home Video.mp4");
        assert_eq!(parsed.title, "Home Video");
        assert_eq!(parsed.year, None);
    }

    #[test]
    fn test_identifiers_only() {
        let parsed = parse_file_name("/Films/Alien [4K].mkv");
        assert_eq!(parsed.title, "Alien");
        assert_eq!(parsed.year, None);
    }

    #[test]
    fn test_find_variants_across_volumes() {
        let rows = vec![
            row("A", "/Films/[1979] Alien.mkv", "1920"),
            row("A", "/Films/[1986] Aliens.mkv", "1920"),
            row("B", "/Films/[1979] Alien [4K].mkv", "3840"),
        ];

        let groups = find_variants(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Alien");
        let widths: Vec<_> = groups[0].entries.iter().map(|e| e.width.as_str()).collect();
        assert_eq!(widths, vec!["1920", "3840"]);
        assert_eq!(groups[0].entries[1].volume, "B");
    }
}
