// SPDX-License-Identifier: MPL-2.0

//! Camera capability abstraction
//!
//! Hardware enumeration and device observation are platform services. This
//! module models them as two traits so the configuration logic never talks to
//! a platform API directly.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  CameraCapabilities  │      │  DeviceEventSource   │
//! │ (devices & formats)  │      │ (focus, thermal, ..) │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            │                             │
//!            ▼                             ▼
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  configure_session   │      │ RecordingController  │
//! └──────────────────────┘      └──────────────────────┘
//! ```

pub mod catalog;
pub mod manager;
pub mod types;

pub use catalog::{EventHub, StaticCameraCatalog};
pub use manager::{CaptureSettings, SessionConfiguration, configure_session};
pub use types::*;

use crate::constants::capture;
use tokio::sync::broadcast;

/// Read-only view of the cameras present on the device
pub trait CameraCapabilities: Send + Sync {
    /// All camera modules, in discovery order
    fn devices(&self) -> Vec<CameraDeviceInfo>;

    /// Switch-over zoom factors reported by the virtual multi-lens back camera
    fn switch_over_zoom_factors(&self) -> Vec<f64>;

    /// Resolve the module for a position and back lens selection
    ///
    /// Back cameras are matched on the physical lens kind. For the front, the
    /// last discovered front module wins.
    fn device(&self, position: CameraPosition, back: BackDeviceType) -> Option<CameraDeviceInfo> {
        let devices = self.devices();
        match position {
            CameraPosition::Back => devices
                .into_iter()
                .find(|d| d.position == CameraPosition::Back && d.kind == Some(back.physical())),
            CameraPosition::Front => devices
                .into_iter()
                .rev()
                .find(|d| d.position == CameraPosition::Front),
        }
    }
}

/// Push-style source of device state changes
pub trait DeviceEventSource {
    /// Subscribe to events published after this call
    fn subscribe(&self) -> broadcast::Receiver<DeviceEvent>;
}

/// Back lens selections available on this hardware
///
/// Wide-angle x2 is offered only when some wide-angle format has a native 2x
/// secondary resolution.
pub fn available_back_devices(caps: &dyn CameraCapabilities) -> Vec<BackDeviceType> {
    let devices = caps.devices();
    let find = |kind: BackDeviceType| {
        devices
            .iter()
            .find(|d| d.position == CameraPosition::Back && d.kind == Some(kind))
    };

    let mut result = Vec::new();
    if find(BackDeviceType::UltraWide).is_some() {
        result.push(BackDeviceType::UltraWide);
    }
    if let Some(wide) = find(BackDeviceType::WideAngle) {
        result.push(BackDeviceType::WideAngle);
        if wide
            .formats
            .iter()
            .any(|f| f.supports_secondary_zoom(capture::PREFERRED_SECONDARY_ZOOM))
        {
            result.push(BackDeviceType::WideAngleX2);
        }
    }
    if find(BackDeviceType::Telephoto).is_some() {
        result.push(BackDeviceType::Telephoto);
    }
    result
}

/// Max optical zoom from the virtual camera's switch-over factors
///
/// Only a two-factor list is meaningful; anything else yields the default.
pub fn max_optical_zoom(switch_over_factors: &[f64]) -> u32 {
    match switch_over_factors {
        [first, second] => {
            let first = first.trunc() as u32;
            let second = second.trunc() as u32;
            if first == 0 {
                capture::DEFAULT_MAX_OPTICAL_ZOOM
            } else {
                second / first
            }
        }
        _ => capture::DEFAULT_MAX_OPTICAL_ZOOM,
    }
}

/// Torch modes the device supports, in Off, On, Auto order
pub fn supported_torch_modes(device: &CameraDeviceInfo) -> Vec<TorchMode> {
    TorchMode::ALL
        .into_iter()
        .filter(|mode| device.torch_modes.contains(mode))
        .collect()
}
