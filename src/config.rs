// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::{BackDeviceType, CameraPosition, CaptureSettings};
use crate::constants::{TargetResolution, capture, storage};
use crate::errors::{AppError, AppResult};
use crate::media::formats::{DynamicRange, VideoFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// User configuration, stored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target capture resolution (720, 1080 or 2160)
    pub resolution: TargetResolution,
    /// Frame rate requested from the format selector
    pub frame_rate: u32,
    /// Upper bound for the applied device frame rate
    pub frame_rate_cap: u32,
    pub dynamic_range: DynamicRange,
    /// Requested video format; high resolution recordings may be upgraded
    pub video_format: VideoFormat,
    pub back_device: BackDeviceType,
    pub position: CameraPosition,
    /// LUT applied to the preview, by catalog name
    pub selected_lut: Option<String>,
    pub lut_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Mirror the front camera (selfie mode)
    pub mirror_front: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: TargetResolution::default(),
            frame_rate: capture::DEFAULT_TARGET_FRAME_RATE,
            frame_rate_cap: capture::MAX_APPLIED_FRAME_RATE,
            dynamic_range: DynamicRange::default(),
            video_format: VideoFormat::default(),
            back_device: BackDeviceType::default(),
            position: CameraPosition::default(),
            selected_lut: None,
            lut_dir: default_lut_dir(),
            output_dir: default_output_dir(),
            mirror_front: true,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(storage::APP_DIR_NAME)
            .join(storage::CONFIG_FILE_NAME)
    }

    /// Load the config, falling back to defaults when the file does not exist
    pub fn from_file_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Reject settings that would leave the device without a frame rate
    pub fn validate(&self) -> AppResult<()> {
        if self.frame_rate == 0 {
            return Err(AppError::Config("frame_rate must be at least 1".to_string()));
        }
        if self.frame_rate_cap == 0 {
            return Err(AppError::Config("frame_rate_cap must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Write the config, creating parent directories as needed
    pub fn save_to_file(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            resolution: self.resolution,
            frame_rate: self.frame_rate,
            frame_rate_cap: self.frame_rate_cap,
            mirror_front: self.mirror_front,
        }
    }
}

fn default_output_dir() -> PathBuf {
    dirs::video_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(storage::APP_DIR_NAME)
}

fn default_lut_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(storage::APP_DIR_NAME)
        .join("luts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolution, TargetResolution::P2160);
        assert_eq!(config.frame_rate, 120);
        assert_eq!(config.frame_rate_cap, 120);
        assert_eq!(config.dynamic_range, DynamicRange::Sdr);
        assert_eq!(config.video_format, VideoFormat::Mp4);
        assert_eq!(config.back_device, BackDeviceType::WideAngle);
        assert_eq!(config.position, CameraPosition::Back);
        assert!(config.selected_lut.is_none());
        assert!(config.mirror_front);
        assert!(config.output_dir.ends_with("lutcam"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("resolution = 1080\ndynamic_range = \"hdr10\"\n").unwrap();
        assert_eq!(config.resolution, TargetResolution::P1080);
        assert_eq!(config.dynamic_range, DynamicRange::Hdr10);
        assert_eq!(config.frame_rate, 120);
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        assert!(toml::from_str::<Config>("resolution = 1440\n").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        assert!(Config::default().validate().is_ok());

        let zero_cap = Config {
            frame_rate_cap: 0,
            ..Config::default()
        };
        assert!(matches!(zero_cap.validate(), Err(AppError::Config(_))));

        let zero_rate = Config {
            frame_rate: 0,
            ..Config::default()
        };
        assert!(matches!(zero_rate.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_capture_settings() {
        let config = Config {
            resolution: TargetResolution::P720,
            frame_rate: 60,
            frame_rate_cap: 30,
            mirror_front: false,
            ..Config::default()
        };
        let settings = config.capture_settings();
        assert_eq!(settings.resolution, TargetResolution::P720);
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.frame_rate_cap, 30);
        assert!(!settings.mirror_front);
    }
}
