// SPDX-License-Identifier: GPL-3.0-only

//! Color metadata for recorded video
//!
//! Each [`DynamicRange`] maps to a fixed set of color primaries, transfer
//! function, YCbCr matrix and HEVC profile level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dynamic range of a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DynamicRange {
    #[default]
    Sdr,
    Hdr10,
    DolbyVision,
}

impl DynamicRange {
    pub const ALL: [DynamicRange; 3] = [
        DynamicRange::Sdr,
        DynamicRange::Hdr10,
        DynamicRange::DolbyVision,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DynamicRange::Sdr => "SDR",
            DynamicRange::Hdr10 => "HDR10",
            DynamicRange::DolbyVision => "Dolby Vision",
        }
    }

    /// Color metadata written to the video track
    pub fn color_metadata(&self) -> ColorMetadata {
        match self {
            DynamicRange::Sdr => ColorMetadata {
                profile_level: ProfileLevel::HevcMainAutoLevel,
                color_primaries: ColorPrimaries::ItuR709_2,
                transfer_function: TransferFunction::ItuR709_2,
                ycbcr_matrix: YCbCrMatrix::ItuR709_2,
            },
            DynamicRange::Hdr10 => ColorMetadata {
                profile_level: ProfileLevel::HevcMain10AutoLevel,
                color_primaries: ColorPrimaries::ItuR2020,
                transfer_function: TransferFunction::SmpteSt2084Pq,
                ycbcr_matrix: YCbCrMatrix::ItuR2020,
            },
            DynamicRange::DolbyVision => ColorMetadata {
                profile_level: ProfileLevel::HevcMain10AutoLevel,
                color_primaries: ColorPrimaries::ItuR2020,
                transfer_function: TransferFunction::ItuR2100Hlg,
                ycbcr_matrix: YCbCrMatrix::ItuR2020,
            },
        }
    }
}

impl fmt::Display for DynamicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DynamicRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "sdr" => Ok(DynamicRange::Sdr),
            "hdr10" | "hdr" => Ok(DynamicRange::Hdr10),
            "dolby-vision" | "dolbyvision" | "dv" => Ok(DynamicRange::DolbyVision),
            other => Err(format!("unknown dynamic range '{}'", other)),
        }
    }
}

/// HEVC encoder profile level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileLevel {
    HevcMainAutoLevel,
    HevcMain10AutoLevel,
}

impl ProfileLevel {
    /// Profile name without the level suffix
    pub fn profile_name(&self) -> &'static str {
        match self {
            ProfileLevel::HevcMainAutoLevel => "Main",
            ProfileLevel::HevcMain10AutoLevel => "Main10",
        }
    }
}

impl fmt::Display for ProfileLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileLevel::HevcMainAutoLevel => write!(f, "HEVC_Main_AutoLevel"),
            ProfileLevel::HevcMain10AutoLevel => write!(f, "HEVC_Main10_AutoLevel"),
        }
    }
}

/// Color primaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorPrimaries {
    /// ITU-R BT.709-2
    ItuR709_2,
    /// ITU-R BT.2020
    ItuR2020,
}

impl fmt::Display for ColorPrimaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorPrimaries::ItuR709_2 => write!(f, "ITU_R_709_2"),
            ColorPrimaries::ItuR2020 => write!(f, "ITU_R_2020"),
        }
    }
}

/// Transfer function (EOTF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferFunction {
    /// ITU-R BT.709-2
    ItuR709_2,
    /// SMPTE ST 2084 perceptual quantizer (PQ)
    SmpteSt2084Pq,
    /// ITU-R BT.2100 hybrid log-gamma (HLG)
    ItuR2100Hlg,
}

impl TransferFunction {
    /// Check if this is an HDR transfer function
    pub fn is_hdr(&self) -> bool {
        !matches!(self, TransferFunction::ItuR709_2)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferFunction::ItuR709_2 => write!(f, "ITU_R_709_2"),
            TransferFunction::SmpteSt2084Pq => write!(f, "SMPTE_ST_2084_PQ"),
            TransferFunction::ItuR2100Hlg => write!(f, "ITU_R_2100_HLG"),
        }
    }
}

/// YCbCr conversion matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YCbCrMatrix {
    /// ITU-R BT.709-2
    ItuR709_2,
    /// ITU-R BT.2020
    ItuR2020,
}

impl fmt::Display for YCbCrMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YCbCrMatrix::ItuR709_2 => write!(f, "ITU_R_709_2"),
            YCbCrMatrix::ItuR2020 => write!(f, "ITU_R_2020"),
        }
    }
}

/// Color properties of a video track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMetadata {
    pub profile_level: ProfileLevel,
    pub color_primaries: ColorPrimaries,
    pub transfer_function: TransferFunction,
    pub ycbcr_matrix: YCbCrMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdr_is_bt709_main() {
        let meta = DynamicRange::Sdr.color_metadata();
        assert_eq!(meta.profile_level, ProfileLevel::HevcMainAutoLevel);
        assert_eq!(meta.color_primaries, ColorPrimaries::ItuR709_2);
        assert_eq!(meta.transfer_function, TransferFunction::ItuR709_2);
        assert_eq!(meta.ycbcr_matrix, YCbCrMatrix::ItuR709_2);
    }

    #[test]
    fn test_hdr_ranges_use_bt2020_main10() {
        let hdr10 = DynamicRange::Hdr10.color_metadata();
        assert_eq!(hdr10.transfer_function, TransferFunction::SmpteSt2084Pq);
        let dv = DynamicRange::DolbyVision.color_metadata();
        assert_eq!(dv.transfer_function, TransferFunction::ItuR2100Hlg);

        for meta in [hdr10, dv] {
            assert_eq!(meta.profile_level.profile_name(), "Main10");
            assert_eq!(meta.color_primaries, ColorPrimaries::ItuR2020);
            assert_eq!(meta.ycbcr_matrix, YCbCrMatrix::ItuR2020);
            assert!(meta.transfer_function.is_hdr());
        }
    }

    #[test]
    fn test_parse_dynamic_range() {
        assert_eq!("Dolby Vision".parse::<DynamicRange>(), Ok(DynamicRange::DolbyVision));
        assert_eq!("hdr10".parse::<DynamicRange>(), Ok(DynamicRange::Hdr10));
        assert_eq!("SDR".parse::<DynamicRange>(), Ok(DynamicRange::Sdr));
        assert!("hlg".parse::<DynamicRange>().is_err());
    }
}
