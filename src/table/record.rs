//! Per-file results produced by the probe workers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use vidmeta_av::MediaInfo;
use vidmeta_common::format::{format_hms, human_size};

use super::row::{col, Row, COLUMNS, NOT_AVAILABLE, STATUS_FAILED, STATUS_OK, TITLE_NOT_SET};

/// Presence and size of a sidecar subtitle file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidecarInfo {
    #[default]
    Absent,
    Present {
        size_bytes: u64,
    },
}

impl SidecarInfo {
    fn availability_cell(&self) -> &'static str {
        match self {
            Self::Absent => "N",
            Self::Present { .. } => "Y",
        }
    }

    fn size_cell(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Present { size_bytes } => size_bytes.to_string(),
        }
    }
}

/// Sidecar subtitles found next to a video file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidecarSubtitles {
    pub regular: SidecarInfo,
    pub hearing_impaired: SidecarInfo,
}

/// Metadata of a successfully probed file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataRecord {
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<Duration>,
    pub size_bytes: u64,
    pub video_codec: Option<String>,
    /// Whether re-encoding to AV1/HEVC would save space. `None` without a
    /// known video codec.
    pub compression_candidate: Option<bool>,
    pub stream_count: Option<u32>,
    pub container: Option<String>,
    pub audio_channels: Option<u32>,
    pub audio_codec: Option<String>,
    pub title: Option<String>,
    pub subtitles: SidecarSubtitles,
    pub volume_label: String,
    pub drive_path: String,
}

impl MetadataRecord {
    pub fn from_media_info(
        info: &MediaInfo,
        size_bytes: u64,
        subtitles: SidecarSubtitles,
        volume_label: impl Into<String>,
        drive_path: impl Into<String>,
    ) -> Self {
        let video = info.video.as_ref();
        let audio = info.audio.as_ref();

        Self {
            path: info.file_path.clone(),
            width: video.and_then(|v| v.width),
            height: video.and_then(|v| v.height),
            duration: info.duration,
            size_bytes,
            video_codec: video.and_then(|v| v.display_codec()).map(str::to_string),
            compression_candidate: video
                .and_then(|v| v.is_efficient_codec())
                .map(|efficient| !efficient),
            stream_count: info.stream_count,
            container: info.container.clone(),
            audio_channels: audio.and_then(|a| a.channels),
            audio_codec: audio.and_then(|a| a.display_codec()).map(str::to_string),
            title: info.title.clone(),
            subtitles,
            volume_label: volume_label.into(),
            drive_path: drive_path.into(),
        }
    }

    pub fn to_row(&self) -> Row {
        let mut cells: [String; COLUMNS.len()] = Default::default();

        cells[col::WIDTH] = opt_cell(self.width);
        cells[col::HEIGHT] = opt_cell(self.height);
        cells[col::DURATION] = self
            .duration
            .map(|d| format_hms(d, true))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        cells[col::SIZE] = human_size(self.size_bytes);
        cells[col::RAW_SIZE] = self.size_bytes.to_string();
        cells[col::VIDEO_CODEC] = opt_cell(self.video_codec.as_deref());
        cells[col::COMPRESS_CANDIDATE] = match self.compression_candidate {
            Some(true) => "Y".to_string(),
            Some(false) => "N".to_string(),
            None => NOT_AVAILABLE.to_string(),
        };
        cells[col::STREAMS] = opt_cell(self.stream_count);
        cells[col::CONTAINER] = opt_cell(self.container.as_deref());
        cells[col::AUDIO_CHANNELS] = opt_cell(self.audio_channels);
        cells[col::AUDIO_CODEC] = opt_cell(self.audio_codec.as_deref());
        cells[col::TITLE] = self
            .title
            .clone()
            .unwrap_or_else(|| TITLE_NOT_SET.to_string());
        cells[col::SUBTITLE] = self.subtitles.regular.availability_cell().to_string();
        cells[col::SUBTITLE_SIZE] = self.subtitles.regular.size_cell();
        cells[col::SUBTITLE_HI] = self
            .subtitles
            .hearing_impaired
            .availability_cell()
            .to_string();
        cells[col::SUBTITLE_HI_SIZE] = self.subtitles.hearing_impaired.size_cell();
        cells[col::VOLUME] = self.volume_label.clone();
        cells[col::PATH] = self.drive_path.clone();
        cells[col::STATUS] = STATUS_OK.to_string();

        Row::from_cells(cells)
    }
}

/// A file that was discovered but could not be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub path: PathBuf,
    pub volume_label: String,
    pub drive_path: String,
    /// Known when the file could still be stat'ed.
    pub size_bytes: Option<u64>,
    pub reason: String,
}

impl ProbeFailure {
    pub fn to_row(&self) -> Row {
        let mut cells: [String; COLUMNS.len()] =
            std::array::from_fn(|_| NOT_AVAILABLE.to_string());

        if let Some(size) = self.size_bytes {
            cells[col::SIZE] = human_size(size);
            cells[col::RAW_SIZE] = size.to_string();
        }
        cells[col::TITLE] = TITLE_NOT_SET.to_string();
        cells[col::VOLUME] = self.volume_label.clone();
        cells[col::PATH] = self.drive_path.clone();
        cells[col::STATUS] = format!("{}: {}", STATUS_FAILED, self.reason.trim());

        Row::from_cells(cells)
    }
}

/// What a worker produced for one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Probed(MetadataRecord),
    Failed(ProbeFailure),
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Probed(record) => &record.path,
            Self::Failed(failure) => &failure.path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Probed(_))
    }

    pub fn to_row(&self) -> Row {
        match self {
            Self::Probed(record) => record.to_row(),
            Self::Failed(failure) => failure.to_row(),
        }
    }
}

fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
