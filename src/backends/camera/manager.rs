// SPDX-License-Identifier: GPL-3.0-only

//! Capture session configuration
//!
//! Resolves the camera module for the requested position and lens, then
//! computes everything the capture layer needs to apply: format, frame
//! rate, zoom and connection flags.

use super::types::*;
use super::{CameraCapabilities, available_back_devices, max_optical_zoom, supported_torch_modes};
use crate::app::format_picker::preferences::{
    applied_frame_rate, frame_duration, prefilter_formats, select_format,
};
use crate::constants::{TargetResolution, capture};
use crate::errors::CameraError;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// What the session should try to capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSettings {
    pub resolution: TargetResolution,
    /// Frame rate requested from the format selector
    pub frame_rate: u32,
    /// Upper bound for the frame rate applied to the device
    pub frame_rate_cap: u32,
    /// Mirror the front camera connection
    pub mirror_front: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            resolution: TargetResolution::P2160,
            frame_rate: capture::DEFAULT_TARGET_FRAME_RATE,
            frame_rate_cap: capture::MAX_APPLIED_FRAME_RATE,
            mirror_front: true,
        }
    }
}

/// Complete configuration for one capture session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfiguration {
    pub device_name: String,
    pub position: CameraPosition,
    /// Back lens selection; `None` for the front camera
    pub back_device: Option<BackDeviceType>,
    /// Selected format, `None` to keep the device's current format
    pub format: Option<FormatDescriptor>,
    pub frame_rate_range: Option<FrameRateRange>,
    /// Whole frame rate applied to the device, `None` when the selected
    /// range has no usable rate
    pub applied_frame_rate: Option<u32>,
    /// Device min and max frame duration (`1 / applied_frame_rate`)
    pub frame_duration: Option<Duration>,
    /// False when the selected range is below the requested frame rate
    pub meets_target: bool,
    pub zoom_factor: f64,
    pub mirrored: bool,
    /// Connection rotation in degrees
    pub rotation_degrees: u32,
    pub stabilization: bool,
    pub torch_modes: Vec<TorchMode>,
    pub available_back_devices: Vec<BackDeviceType>,
    pub max_optical_zoom: u32,
}

impl SessionConfiguration {
    /// Output dimensions of the selected format
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.format.as_ref().map(|f| (f.width, f.height))
    }
}

/// Compute the session configuration for a camera
///
/// Fails only when the requested module does not exist. A missing format is
/// not an error: the session keeps the device default and a warning is
/// logged.
pub fn configure_session(
    caps: &dyn CameraCapabilities,
    position: CameraPosition,
    back: BackDeviceType,
    settings: &CaptureSettings,
) -> Result<SessionConfiguration, CameraError> {
    let device = caps.device(position, back).ok_or_else(|| {
        CameraError::DeviceUnavailable(match position {
            CameraPosition::Back => format!("no {} back camera", back),
            CameraPosition::Front => "no front camera".to_string(),
        })
    })?;

    let candidates = prefilter_formats(&device.formats);
    let selection = select_format(&candidates, settings.resolution, settings.frame_rate);

    let (format, frame_rate_range, meets_target) = match selection.into_selected() {
        Some(selected) => (
            Some(selected.format),
            Some(selected.frame_rate_range),
            selected.meets_target,
        ),
        None => {
            warn!(
                device = %device.name,
                resolution = %settings.resolution,
                "No matching capture format, keeping device default"
            );
            (None, None, false)
        }
    };
    let applied = frame_rate_range
        .as_ref()
        .and_then(|range| applied_frame_rate(range, settings.frame_rate_cap));
    if let (Some(range), None) = (&frame_rate_range, applied) {
        warn!(
            device = %device.name,
            range = %range,
            cap = settings.frame_rate_cap,
            "Selected range has no whole frame rate, keeping device frame rate"
        );
    }

    let back_device = (position == CameraPosition::Back).then_some(back);
    let zoom_factor = back_device.map(|b| b.zoom_factor()).unwrap_or(1.0);

    let config = SessionConfiguration {
        device_name: device.name.clone(),
        position,
        back_device,
        format,
        frame_rate_range,
        applied_frame_rate: applied,
        frame_duration: applied.and_then(frame_duration),
        meets_target,
        zoom_factor,
        mirrored: position == CameraPosition::Front && settings.mirror_front,
        rotation_degrees: 90,
        stabilization: true,
        torch_modes: supported_torch_modes(&device),
        available_back_devices: available_back_devices(caps),
        max_optical_zoom: max_optical_zoom(&caps.switch_over_zoom_factors()),
    };

    info!(
        device = %config.device_name,
        position = %position,
        format = ?config.dimensions(),
        fps = ?config.applied_frame_rate,
        zoom = config.zoom_factor,
        "Configured capture session"
    );
    Ok(config)
}
