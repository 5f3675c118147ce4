// SPDX-License-Identifier: GPL-3.0-only

//! Static camera catalog backed by a JSON description
//!
//! Stands in for platform enumeration: the CLI reads a catalog exported from
//! a device, and tests build catalogs in memory.

use super::types::{CameraDeviceInfo, DeviceEvent};
use super::{CameraCapabilities, DeviceEventSource};
use crate::errors::CameraError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Buffered events per subscriber before it starts lagging
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Fan-out hub for device events
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish an event, returning how many subscribers received it
    pub fn publish(&self, event: DeviceEvent) -> usize {
        match self.sender.send(event) {
            Ok(count) => count,
            Err(_) => {
                debug!(?event, "No subscribers for device event");
                0
            }
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceEventSource for EventHub {
    fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }
}

/// Capability provider over a fixed list of devices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCameraCatalog {
    pub devices: Vec<CameraDeviceInfo>,
    #[serde(default)]
    pub switch_over_zoom_factors: Vec<f64>,
    #[serde(skip)]
    events: EventHub,
}

impl StaticCameraCatalog {
    pub fn new(devices: Vec<CameraDeviceInfo>, switch_over_zoom_factors: Vec<f64>) -> Self {
        Self {
            devices,
            switch_over_zoom_factors,
            events: EventHub::new(),
        }
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, CameraError> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, CameraError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CameraError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            devices = catalog.devices.len(),
            "Loaded camera catalog"
        );
        Ok(catalog)
    }

    /// Event hub used to simulate device notifications
    pub fn events(&self) -> &EventHub {
        &self.events
    }
}

impl CameraCapabilities for StaticCameraCatalog {
    fn devices(&self) -> Vec<CameraDeviceInfo> {
        self.devices.clone()
    }

    fn switch_over_zoom_factors(&self) -> Vec<f64> {
        self.switch_over_zoom_factors.clone()
    }
}

impl DeviceEventSource for StaticCameraCatalog {
    fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::{BackDeviceType, CameraPosition, ThermalState};

    const CATALOG: &str = r#"{
        "devices": [
            {
                "name": "Back Wide",
                "position": "back",
                "kind": "wide-angle",
                "formats": [
                    {
                        "width": 3840,
                        "height": 2160,
                        "pixel_format": "420f",
                        "frame_rate_ranges": [{"min_frame_rate": 1.0, "max_frame_rate": 60.0}]
                    }
                ],
                "torch_modes": ["off", "on", "auto"]
            },
            {
                "name": "Front",
                "position": "front",
                "formats": []
            }
        ],
        "switch_over_zoom_factors": [2.0, 6.0]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = StaticCameraCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.devices.len(), 2);
        assert_eq!(catalog.devices[0].kind, Some(BackDeviceType::WideAngle));
        assert_eq!(catalog.devices[1].position, CameraPosition::Front);
        assert!(catalog.devices[1].torch_modes.is_empty());
        assert_eq!(catalog.switch_over_zoom_factors(), vec![2.0, 6.0]);
    }

    #[test]
    fn test_parse_catalog_rejects_invalid_range() {
        let json = CATALOG.replace(
            r#""min_frame_rate": 1.0, "max_frame_rate": 60.0"#,
            r#""min_frame_rate": 90.0, "max_frame_rate": 60.0"#,
        );
        assert!(matches!(
            StaticCameraCatalog::from_json(&json),
            Err(CameraError::Catalog(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = StaticCameraCatalog::from_file(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(err, Err(CameraError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_event_hub_delivers_to_subscribers() {
        let catalog = StaticCameraCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.events().publish(DeviceEvent::WillResignActive), 0);

        let mut rx = catalog.subscribe();
        let event = DeviceEvent::ThermalStateChanged(ThermalState::Serious);
        assert_eq!(catalog.events().publish(event), 1);
        assert_eq!(rx.recv().await.unwrap(), event);
    }
}
