// SPDX-License-Identifier: GPL-3.0-only

//! Video codec and container policy for recordings

use crate::constants::{encoding, storage};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Requested video format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoFormat {
    /// H.264 in an MP4 container
    #[default]
    Mp4,
    /// HEVC in a QuickTime container
    Hevc,
}

impl VideoFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "H.264",
            VideoFormat::Hevc => "HEVC",
        }
    }

    pub fn container(&self) -> ContainerFormat {
        match self {
            VideoFormat::Mp4 => ContainerFormat::Mp4,
            VideoFormat::Hevc => ContainerFormat::QuickTime,
        }
    }

    /// Get the file extension for this format's container
    pub fn file_extension(&self) -> &'static str {
        self.container().extension()
    }

    /// Resolve the format actually used for a recording
    ///
    /// Recordings taller than 2100 lines above 30 fps always use HEVC.
    pub fn resolve(self, height: u32, frame_rate: u32) -> VideoFormat {
        if height > encoding::HEVC_HEIGHT_THRESHOLD && frame_rate > encoding::HEVC_MIN_FRAME_RATE
        {
            if self != VideoFormat::Hevc {
                debug!(height, frame_rate, "Forcing HEVC for high resolution high frame rate");
            }
            VideoFormat::Hevc
        } else {
            self
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for VideoFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp4" | "h264" | "h.264" => Ok(VideoFormat::Mp4),
            "hevc" | "h265" | "h.265" | "mov" => Ok(VideoFormat::Hevc),
            other => Err(format!("unknown video format '{}'", other)),
        }
    }
}

/// Container formats for video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// MPEG-4 Part 14
    Mp4,
    /// QuickTime movie
    QuickTime,
}

impl ContainerFormat {
    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "MP4",
            ContainerFormat::QuickTime => "MOV",
        }
    }

    /// File type identifier handed to the asset writer
    pub fn file_type(&self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::QuickTime => "mov",
        }
    }
}

/// File stem for a recording started at `at` (e.g., `video_20241117_093000`)
pub fn video_file_stem<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "{}_{}",
        storage::VIDEO_FILE_PREFIX,
        at.format(storage::VIDEO_TIMESTAMP_FORMAT)
    )
}

/// Full file name for a recording in the given format
pub fn video_file_name<Tz: TimeZone>(at: &DateTime<Tz>, format: VideoFormat) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{}.{}", video_file_stem(at), format.file_extension())
}
