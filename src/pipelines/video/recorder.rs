// SPDX-License-Identifier: MPL-2.0

//! Recording plans and the recording controller
//!
//! A [`RecordingPlan`] gathers everything the asset writer needs for one
//! recording. The [`RecordingController`] is caller-owned state that tracks
//! whether a recording is active and reacts to device events (app moving to
//! the background, critical thermal pressure).

use super::encoder_selection::{EncoderProfile, build_encoder_profile};
use crate::backends::camera::{DeviceEvent, SessionConfiguration, ThermalState};
use crate::constants::encoding;
use crate::errors::RecordingError;
use crate::media::formats::{ContainerFormat, DynamicRange, VideoFormat, codec::video_file_stem};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Everything needed to configure the writer for one recording
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingPlan {
    pub device_name: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub dynamic_range: DynamicRange,
    /// Format after the high resolution HEVC rule was applied
    pub video_format: VideoFormat,
    pub container: ContainerFormat,
    pub profile: EncoderProfile,
    pub media_time_scale: u32,
    /// File name without extension, used as the gallery display name
    pub name: String,
    pub output_path: PathBuf,
}

impl RecordingPlan {
    /// Build the plan for recording from a configured session
    ///
    /// # Arguments
    /// * `session` - Session whose selected format and frame rate are used
    /// * `range` - Dynamic range of the recording
    /// * `requested` - Requested video format (may be upgraded to HEVC)
    /// * `output_dir` - Directory the file will be written to
    /// * `now` - Recording start time, used for the file name
    pub fn new(
        session: &SessionConfiguration,
        range: DynamicRange,
        requested: VideoFormat,
        output_dir: &Path,
        now: DateTime<Local>,
    ) -> Result<Self, RecordingError> {
        let (width, height) = session.dimensions().ok_or(RecordingError::NoFormat)?;
        let frame_rate = session
            .applied_frame_rate
            .filter(|rate| *rate > 0)
            .ok_or(RecordingError::NoFrameRate)?;

        let profile = build_encoder_profile(range, 1.0 / f64::from(frame_rate), width, height)?;
        let video_format = requested.resolve(height, frame_rate);
        let name = video_file_stem(&now);
        let output_path =
            output_dir.join(format!("{}.{}", name, video_format.file_extension()));

        debug!(
            path = %output_path.display(),
            format = %video_format,
            bitrate = profile.average_bit_rate,
            "Prepared recording plan"
        );

        Ok(Self {
            device_name: session.device_name.clone(),
            width,
            height,
            frame_rate,
            dynamic_range: range,
            video_format,
            container: video_format.container(),
            profile,
            media_time_scale: encoding::MEDIA_TIME_SCALE,
            name,
            output_path,
        })
    }
}

/// A recording that has been stopped
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRecording {
    pub plan: RecordingPlan,
    pub duration: Duration,
}

/// Side effects the caller must carry out after an event
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerAction {
    /// The active recording was stopped and should be finalized
    RecordingStopped(FinishedRecording),
    /// The capture session should be stopped
    StopSession,
}

/// Last observed device state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceObservation {
    pub focus_adjusting: bool,
    pub exposure_adjusting: bool,
    pub lens_position: f32,
    pub thermal_state: ThermalState,
}

#[derive(Debug)]
enum RecordingState {
    Idle,
    Recording {
        plan: RecordingPlan,
        started_at: Instant,
    },
}

/// Recording state owned by the caller
#[derive(Debug)]
pub struct RecordingController {
    state: RecordingState,
    observation: DeviceObservation,
}

impl Default for RecordingController {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingController {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            observation: DeviceObservation::default(),
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    /// Plan of the active recording
    pub fn current_plan(&self) -> Option<&RecordingPlan> {
        match &self.state {
            RecordingState::Recording { plan, .. } => Some(plan),
            RecordingState::Idle => None,
        }
    }

    /// Time since the active recording started
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.state {
            RecordingState::Recording { started_at, .. } => Some(started_at.elapsed()),
            RecordingState::Idle => None,
        }
    }

    pub fn observation(&self) -> &DeviceObservation {
        &self.observation
    }

    /// Start recording with a plan
    pub fn start(&mut self, plan: RecordingPlan) -> Result<(), RecordingError> {
        if self.is_recording() {
            return Err(RecordingError::AlreadyRecording);
        }
        info!(path = %plan.output_path.display(), "Recording started");
        self.state = RecordingState::Recording {
            plan,
            started_at: Instant::now(),
        };
        Ok(())
    }

    /// Stop the active recording
    pub fn stop(&mut self) -> Result<FinishedRecording, RecordingError> {
        match std::mem::replace(&mut self.state, RecordingState::Idle) {
            RecordingState::Recording { plan, started_at } => {
                let duration = started_at.elapsed();
                info!(
                    path = %plan.output_path.display(),
                    duration_secs = duration.as_secs(),
                    "Recording stopped"
                );
                Ok(FinishedRecording { plan, duration })
            }
            RecordingState::Idle => Err(RecordingError::NotRecording),
        }
    }

    /// Toggle recording (the hardware shutter button behavior)
    pub fn toggle(&mut self, plan: RecordingPlan) -> Result<Option<FinishedRecording>, RecordingError> {
        if self.is_recording() {
            self.stop().map(Some)
        } else {
            self.start(plan).map(|_| None)
        }
    }

    /// Apply a device event and return the actions the caller must perform
    pub fn on_event(&mut self, event: DeviceEvent) -> Vec<ControllerAction> {
        let mut actions = Vec::new();
        match event {
            DeviceEvent::FocusAdjusting(adjusting) => self.observation.focus_adjusting = adjusting,
            DeviceEvent::ExposureAdjusting(adjusting) => {
                self.observation.exposure_adjusting = adjusting
            }
            DeviceEvent::LensPosition(position) => self.observation.lens_position = position,
            DeviceEvent::ThermalStateChanged(state) => {
                self.observation.thermal_state = state;
                if state == ThermalState::Critical {
                    warn!("Critical thermal state, stopping capture");
                    if let Ok(finished) = self.stop() {
                        actions.push(ControllerAction::RecordingStopped(finished));
                    }
                    actions.push(ControllerAction::StopSession);
                }
            }
            DeviceEvent::WillResignActive => {
                if let Ok(finished) = self.stop() {
                    debug!("Application resigning active, recording stopped");
                    actions.push(ControllerAction::RecordingStopped(finished));
                }
            }
        }
        actions
    }

    /// Consume device events until the source closes or `actions` is dropped
    ///
    /// Lagged receivers skip the missed events and keep going.
    pub async fn run_event_loop(
        &mut self,
        mut events: broadcast::Receiver<DeviceEvent>,
        actions: mpsc::UnboundedSender<ControllerAction>,
    ) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    for action in self.on_event(event) {
                        if actions.send(action).is_err() {
                            debug!("Action receiver dropped, leaving event loop");
                            return;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Device event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Device event source closed");
                    return;
                }
            }
        }
    }
}
