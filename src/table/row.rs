//! The serialized row: 19 tab-separated cells.

use std::cmp::Ordering;

/// Column headers, in output order.
pub const COLUMNS: [&str; 19] = [
    "Width",
    "Height",
    "Duration",
    "Size",
    "Raw Size",
    "Video Codec Name",
    "AV1/HEVC Compression Candidate",
    "Total # of Streams",
    "Container Name",
    "# of Audio Channels (@Index 0)",
    "Audio Codec Name (@Index 0)",
    "Title",
    "Ext. Subtitle Availability",
    "Ext. Subtitle Size",
    "Ext. Hearing Impaired Subtitle Availability",
    "Ext. Hearing Impaired Subtitle Size",
    "Volume Label",
    "Path on Drive Label",
    "Probe Status",
];

/// Column count of tables written before the status column existed.
pub const LEGACY_COLUMN_COUNT: usize = COLUMNS.len() - 1;

/// Written wherever a value could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Written when the container carries no title tag.
pub const TITLE_NOT_SET: &str = "<Title Not Set>";

/// Status of a successfully probed file.
pub const STATUS_OK: &str = "OK";

/// Prefix of the status of a file that could not be probed.
pub const STATUS_FAILED: &str = "FAILED";

/// Column indices.
pub mod col {
    pub const WIDTH: usize = 0;
    pub const HEIGHT: usize = 1;
    pub const DURATION: usize = 2;
    pub const SIZE: usize = 3;
    pub const RAW_SIZE: usize = 4;
    pub const VIDEO_CODEC: usize = 5;
    pub const COMPRESS_CANDIDATE: usize = 6;
    pub const STREAMS: usize = 7;
    pub const CONTAINER: usize = 8;
    pub const AUDIO_CHANNELS: usize = 9;
    pub const AUDIO_CODEC: usize = 10;
    pub const TITLE: usize = 11;
    pub const SUBTITLE: usize = 12;
    pub const SUBTITLE_SIZE: usize = 13;
    pub const SUBTITLE_HI: usize = 14;
    pub const SUBTITLE_HI_SIZE: usize = 15;
    pub const VOLUME: usize = 16;
    pub const PATH: usize = 17;
    pub const STATUS: usize = 18;
}

/// Replace characters that would break the line/column structure.
pub fn sanitize_cell(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

/// One line of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Build a row from exactly [`COLUMNS`]`.len()` cells, sanitizing each.
    pub(crate) fn from_cells(cells: [String; COLUMNS.len()]) -> Self {
        Self {
            cells: cells.iter().map(|c| sanitize_cell(c)).collect(),
        }
    }

    /// Parse a line read back from a table.
    ///
    /// A line with one column fewer than [`COLUMNS`] is a table written
    /// before the status column existed; it is taken as successfully probed.
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut cells: Vec<String> = line.split('\t').map(str::to_string).collect();

        match cells.len() {
            n if n == COLUMNS.len() => {}
            n if n == LEGACY_COLUMN_COUNT => cells.push(STATUS_OK.to_string()),
            n => {
                return Err(format!(
                    "expected {} or {} columns, found {}",
                    COLUMNS.len(),
                    LEGACY_COLUMN_COUNT,
                    n
                ))
            }
        }

        Ok(Self { cells })
    }

    /// Whether `line` is a header line rather than data.
    pub fn is_header(line: &str) -> bool {
        line.trim_start_matches('\u{feff}')
            .split('\t')
            .next()
            .map(|first| first.trim() == COLUMNS[col::WIDTH])
            .unwrap_or(false)
    }

    /// The header line, without a trailing newline.
    pub fn header_line() -> String {
        COLUMNS.join("\t")
    }

    /// Render as a line, without a trailing newline.
    pub fn to_line(&self) -> String {
        self.cells.join("\t")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.cell(col::TITLE)
    }

    pub fn volume_label(&self) -> &str {
        self.cell(col::VOLUME)
    }

    pub fn drive_path(&self) -> &str {
        self.cell(col::PATH)
    }

    pub fn status(&self) -> &str {
        self.cell(col::STATUS)
    }

    pub fn is_failure(&self) -> bool {
        self.status().starts_with(STATUS_FAILED)
    }

    /// Identity of the file a row describes.
    pub fn identity(&self) -> (&str, &str) {
        (self.volume_label(), self.drive_path())
    }

    fn sort_key(&self) -> (&str, &str, &str) {
        (self.volume_label(), self.drive_path(), self.title())
    }
}

impl Ord for Row {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.cells.cmp(&other.cells))
    }
}

impl PartialOrd for Row {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
