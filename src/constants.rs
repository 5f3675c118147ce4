// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use crate::errors::FormatError;
use serde::{Deserialize, Serialize};

/// Target capture resolutions
///
/// Matching is exact on both dimensions: a format qualifies only when its
/// height equals the tier's height and its width equals the tier's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TargetResolution {
    /// 1280x720
    P720,
    /// 1920x1080
    P1080,
    /// 3840x2160
    #[default]
    P2160,
}

impl TargetResolution {
    pub const ALL: [TargetResolution; 3] = [
        TargetResolution::P720,
        TargetResolution::P1080,
        TargetResolution::P2160,
    ];

    /// Parse from a height value (720, 1080 or 2160)
    pub fn from_height(height: u32) -> Result<Self, FormatError> {
        match height {
            720 => Ok(TargetResolution::P720),
            1080 => Ok(TargetResolution::P1080),
            2160 => Ok(TargetResolution::P2160),
            other => Err(FormatError::UnsupportedResolution(other)),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            TargetResolution::P720 => 720,
            TargetResolution::P1080 => 1080,
            TargetResolution::P2160 => 2160,
        }
    }

    /// Required width for this tier
    pub fn width(&self) -> u32 {
        match self {
            TargetResolution::P720 => 1280,
            TargetResolution::P1080 => 1920,
            TargetResolution::P2160 => 3840,
        }
    }

    /// Check if a format's dimensions match this tier exactly
    pub fn matches(&self, width: u32, height: u32) -> bool {
        height == self.height() && width == self.width()
    }

    /// Get display name for the tier
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetResolution::P720 => "720p",
            TargetResolution::P1080 => "HD",
            TargetResolution::P2160 => "4K",
        }
    }
}

impl TryFrom<u32> for TargetResolution {
    type Error = FormatError;

    fn try_from(height: u32) -> Result<Self, Self::Error> {
        TargetResolution::from_height(height)
    }
}

impl From<TargetResolution> for u32 {
    fn from(res: TargetResolution) -> Self {
        res.height()
    }
}

impl std::fmt::Display for TargetResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

impl std::str::FromStr for TargetResolution {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['p', 'P']);
        let height = trimmed
            .parse::<u32>()
            .map_err(|_| FormatError::Parse(format!("invalid resolution '{}'", s)))?;
        TargetResolution::from_height(height)
    }
}

/// Encoder tuning constants
pub mod encoding {
    /// Bits per pixel per frame used for the average bitrate heuristic
    pub const BITS_PER_PIXEL: f64 = 0.125;

    /// Recordings taller than this at more than [`HEVC_MIN_FRAME_RATE`] are forced to HEVC
    pub const HEVC_HEIGHT_THRESHOLD: u32 = 2100;

    /// Frame rate above which tall recordings are forced to HEVC
    pub const HEVC_MIN_FRAME_RATE: u32 = 30;

    /// Media time scale for the video track
    pub const MEDIA_TIME_SCALE: u32 = 600;
}

/// Capture defaults
pub mod capture {
    /// Default target frame rate requested from the selector
    pub const DEFAULT_TARGET_FRAME_RATE: u32 = 120;

    /// Highest frame rate ever applied to a device
    pub const MAX_APPLIED_FRAME_RATE: u32 = 120;

    /// Secondary native zoom factor preferred when narrowing formats
    pub const PREFERRED_SECONDARY_ZOOM: f64 = 2.0;

    /// Full-range 4:2:0 bi-planar pixel format preferred when narrowing formats
    pub const PREFERRED_PIXEL_FORMAT: &str = "420f";

    /// Max optical zoom reported when the device gives no switch-over factors
    pub const DEFAULT_MAX_OPTICAL_ZOOM: u32 = 2;
}

/// Storage constants
pub mod storage {
    /// Prefix for recorded video file names
    pub const VIDEO_FILE_PREFIX: &str = "video";

    /// Timestamp format for recorded video file names
    pub const VIDEO_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Application directory name under the user's config and video dirs
    pub const APP_DIR_NAME: &str = "lutcam";

    /// Config file name
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// File extension of binary LUT files
    pub const LUT_FILE_EXTENSION: &str = "data";
}
