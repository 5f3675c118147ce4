// SPDX-License-Identifier: MPL-2.0

//! Video recording pipeline
//!
//! - Derives the encoder profile from dynamic range, frame rate and size
//! - Builds the per-recording plan (file name, container, profile)
//! - Tracks recording state and reacts to device events

pub mod encoder_selection;
pub mod recorder;

// Re-export commonly used types
pub use encoder_selection::{EncoderProfile, build_encoder_profile, build_encoder_profile_for_rate};
pub use recorder::{
    ControllerAction, DeviceObservation, FinishedRecording, RecordingController, RecordingPlan,
};
