// SPDX-License-Identifier: MPL-2.0

//! Error types for format selection and recording configuration

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Format description or selection errors
    Format(FormatError),
    /// Encoder profile errors
    Profile(ProfileError),
    /// Camera capability errors
    Camera(CameraError),
    /// Recording-related errors
    Recording(RecordingError),
    /// LUT loading errors
    Lut(LutError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Errors raised while describing or selecting capture formats
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Target resolution is not one of 720, 1080 or 2160
    UnsupportedResolution(u32),
    /// Frame rate range violates `0 < min <= max`
    InvalidFrameRateRange { min: f64, max: f64 },
    /// Format list could not be parsed
    Parse(String),
}

/// Encoder profile precondition violations
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A numeric input was zero, negative or not finite
    InvalidArgument(String),
}

/// Camera capability errors
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// The requested device does not exist on this hardware
    DeviceUnavailable(String),
    /// Capability catalog could not be read or parsed
    Catalog(String),
}

/// Recording-specific errors
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingError {
    /// Recording already in progress
    AlreadyRecording,
    /// No recording in progress
    NotRecording,
    /// Session has no selected format to record with
    NoFormat,
    /// Selected format has no usable frame rate
    NoFrameRate,
    /// Encoder profile could not be built
    Profile(ProfileError),
}

/// LUT data errors
#[derive(Debug, Clone, PartialEq)]
pub enum LutError {
    /// LUT data is empty
    Empty,
    /// Byte length is not a multiple of four
    Misaligned(usize),
    /// Byte length does not describe a complete cube
    SizeMismatch { len: usize, edge: usize },
    /// LUT is not part of the catalog
    UnknownLut(String),
    /// LUT file could not be read
    Io(String),
    /// Image could not be decoded or encoded
    Image(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Format(e) => write!(f, "Format error: {}", e),
            AppError::Profile(e) => write!(f, "Encoder profile error: {}", e),
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Recording(e) => write!(f, "Recording error: {}", e),
            AppError::Lut(e) => write!(f, "LUT error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnsupportedResolution(res) => {
                write!(f, "Unsupported target resolution: {} (expected 720, 1080 or 2160)", res)
            }
            FormatError::InvalidFrameRateRange { min, max } => {
                write!(f, "Invalid frame rate range: {}-{} fps", min, max)
            }
            FormatError::Parse(msg) => write!(f, "Failed to parse formats: {}", msg),
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::DeviceUnavailable(msg) => write!(f, "Device unavailable: {}", msg),
            CameraError::Catalog(msg) => write!(f, "Capability catalog error: {}", msg),
        }
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::AlreadyRecording => write!(f, "Recording already in progress"),
            RecordingError::NotRecording => write!(f, "No recording in progress"),
            RecordingError::NoFormat => write!(f, "No capture format selected"),
            RecordingError::NoFrameRate => {
                write!(f, "Selected capture format has no usable frame rate")
            }
            RecordingError::Profile(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for LutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LutError::Empty => write!(f, "LUT data is empty"),
            LutError::Misaligned(len) => {
                write!(f, "LUT data length {} is not a multiple of 4", len)
            }
            LutError::SizeMismatch { len, edge } => write!(
                f,
                "LUT data length {} does not match a {}x{}x{} cube",
                len, edge, edge, edge
            ),
            LutError::UnknownLut(name) => write!(f, "Unknown LUT: {}", name),
            LutError::Io(msg) => write!(f, "Failed to read LUT: {}", msg),
            LutError::Image(msg) => write!(f, "Image error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for FormatError {}
impl std::error::Error for ProfileError {}
impl std::error::Error for CameraError {}
impl std::error::Error for RecordingError {}
impl std::error::Error for LutError {}

// Conversions from sub-errors to AppError
impl From<FormatError> for AppError {
    fn from(err: FormatError) -> Self {
        AppError::Format(err)
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        AppError::Profile(err)
    }
}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<RecordingError> for AppError {
    fn from(err: RecordingError) -> Self {
        AppError::Recording(err)
    }
}

impl From<LutError> for AppError {
    fn from(err: LutError) -> Self {
        AppError::Lut(err)
    }
}

impl From<ProfileError> for RecordingError {
    fn from(err: ProfileError) -> Self {
        RecordingError::Profile(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for LutError {
    fn from(err: std::io::Error) -> Self {
        LutError::Io(err.to_string())
    }
}

impl From<image::ImageError> for LutError {
    fn from(err: image::ImageError) -> Self {
        LutError::Image(err.to_string())
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for CameraError {
    fn from(err: serde_json::Error) -> Self {
        CameraError::Catalog(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
