// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera capability abstraction

//! Shared types for camera capabilities and capture formats

use crate::errors::FormatError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported frame-rate window of a capture format
///
/// Invariant: `0 < min_frame_rate <= max_frame_rate`, both finite.
/// Enforced by [`FrameRateRange::new`] and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrameRateRange")]
pub struct FrameRateRange {
    min_frame_rate: f64,
    max_frame_rate: f64,
}

#[derive(Deserialize)]
struct RawFrameRateRange {
    min_frame_rate: f64,
    max_frame_rate: f64,
}

impl TryFrom<RawFrameRateRange> for FrameRateRange {
    type Error = FormatError;

    fn try_from(raw: RawFrameRateRange) -> Result<Self, Self::Error> {
        FrameRateRange::new(raw.min_frame_rate, raw.max_frame_rate)
    }
}

impl FrameRateRange {
    /// Create a validated frame rate range
    pub fn new(min_frame_rate: f64, max_frame_rate: f64) -> Result<Self, FormatError> {
        let valid = min_frame_rate.is_finite()
            && max_frame_rate.is_finite()
            && min_frame_rate > 0.0
            && min_frame_rate <= max_frame_rate;
        if !valid {
            return Err(FormatError::InvalidFrameRateRange {
                min: min_frame_rate,
                max: max_frame_rate,
            });
        }
        Ok(Self {
            min_frame_rate,
            max_frame_rate,
        })
    }

    pub fn min_frame_rate(&self) -> f64 {
        self.min_frame_rate
    }

    pub fn max_frame_rate(&self) -> f64 {
        self.max_frame_rate
    }

    /// Check if the range can sustain the given frame rate
    pub fn sustains(&self, frame_rate: u32) -> bool {
        self.max_frame_rate >= f64::from(frame_rate)
    }
}

impl std::fmt::Display for FrameRateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}fps", self.min_frame_rate, self.max_frame_rate)
    }
}

/// Capture format as reported by hardware enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    pub width: u32,
    pub height: u32,
    /// Frame rate ranges in the order the device reports them
    #[serde(alias = "supported_frame_rate_ranges")]
    pub frame_rate_ranges: Vec<FrameRateRange>,
    /// Media subtype FourCC (e.g., "420f", "420v", "x420")
    #[serde(default)]
    pub pixel_format: String,
    /// Secondary native resolution zoom factors (e.g., `[2.0]`)
    #[serde(default)]
    pub secondary_zoom_factors: Vec<f64>,
}

impl FormatDescriptor {
    pub fn new(width: u32, height: u32, frame_rate_ranges: Vec<FrameRateRange>) -> Self {
        Self {
            width,
            height,
            frame_rate_ranges,
            pixel_format: String::new(),
            secondary_zoom_factors: Vec::new(),
        }
    }

    pub fn with_pixel_format(mut self, pixel_format: &str) -> Self {
        self.pixel_format = pixel_format.to_string();
        self
    }

    pub fn with_secondary_zoom_factors(mut self, factors: Vec<f64>) -> Self {
        self.secondary_zoom_factors = factors;
        self
    }

    /// Check if the format exposes a native secondary resolution at `factor`
    pub fn supports_secondary_zoom(&self, factor: f64) -> bool {
        self.secondary_zoom_factors.iter().any(|f| *f == factor)
    }

    /// Highest frame rate any of this format's ranges can sustain
    pub fn max_frame_rate(&self) -> Option<f64> {
        self.frame_rate_ranges
            .iter()
            .map(|r| r.max_frame_rate())
            .reduce(f64::max)
    }
}

impl std::fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        if !self.pixel_format.is_empty() {
            write!(f, " ({})", self.pixel_format)?;
        }
        if let Some(max) = self.max_frame_rate() {
            write!(f, " up to {}fps", max)?;
        }
        Ok(())
    }
}

/// Which side of the device the camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraPosition {
    #[default]
    Back,
    Front,
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::Front => write!(f, "front"),
        }
    }
}

impl FromStr for CameraPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "back" => Ok(CameraPosition::Back),
            "front" => Ok(CameraPosition::Front),
            other => Err(format!("unknown camera position '{}'", other)),
        }
    }
}

/// Back camera lens selection
///
/// `WideAngleX2` is not a separate module: it is the wide-angle camera
/// zoomed to its 2x native secondary resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackDeviceType {
    UltraWide,
    #[default]
    WideAngle,
    WideAngleX2,
    Telephoto,
}

impl BackDeviceType {
    pub const ALL: [BackDeviceType; 4] = [
        BackDeviceType::UltraWide,
        BackDeviceType::WideAngle,
        BackDeviceType::WideAngleX2,
        BackDeviceType::Telephoto,
    ];

    /// Physical lens module backing this selection
    pub fn physical(&self) -> BackDeviceType {
        match self {
            BackDeviceType::WideAngleX2 => BackDeviceType::WideAngle,
            other => *other,
        }
    }

    /// Video zoom factor to apply after the session starts
    pub fn zoom_factor(&self) -> f64 {
        match self {
            BackDeviceType::WideAngleX2 => 2.0,
            _ => 1.0,
        }
    }
}

impl std::fmt::Display for BackDeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackDeviceType::UltraWide => write!(f, "ultra-wide"),
            BackDeviceType::WideAngle => write!(f, "wide-angle"),
            BackDeviceType::WideAngleX2 => write!(f, "wide-angle-x2"),
            BackDeviceType::Telephoto => write!(f, "telephoto"),
        }
    }
}

impl FromStr for BackDeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ultra-wide" | "ultrawide" => Ok(BackDeviceType::UltraWide),
            "wide-angle" | "wide" => Ok(BackDeviceType::WideAngle),
            "wide-angle-x2" | "wide-x2" => Ok(BackDeviceType::WideAngleX2),
            "telephoto" | "tele" => Ok(BackDeviceType::Telephoto),
            other => Err(format!("unknown back camera '{}'", other)),
        }
    }
}

/// Torch (continuous light) mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TorchMode {
    #[default]
    Off,
    On,
    Auto,
}

impl TorchMode {
    /// Presentation order for supported modes
    pub const ALL: [TorchMode; 3] = [TorchMode::Off, TorchMode::On, TorchMode::Auto];
}

/// Process thermal pressure as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThermalState {
    #[default]
    Nominal,
    Fair,
    Serious,
    Critical,
}

/// Observable device state changes pushed by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// Autofocus started or finished adjusting
    FocusAdjusting(bool),
    /// Auto exposure started or finished adjusting
    ExposureAdjusting(bool),
    /// Lens position changed (0.0 = nearest, 1.0 = furthest)
    LensPosition(f32),
    /// Thermal pressure changed
    ThermalStateChanged(ThermalState),
    /// Application is about to move to the background
    WillResignActive,
}

/// A camera module known to the capability provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDeviceInfo {
    pub name: String,
    pub position: CameraPosition,
    /// Lens kind for back cameras; `None` for front cameras
    #[serde(default)]
    pub kind: Option<BackDeviceType>,
    pub formats: Vec<FormatDescriptor>,
    #[serde(default)]
    pub torch_modes: Vec<TorchMode>,
}
