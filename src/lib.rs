// SPDX-License-Identifier: MPL-2.0

//! lutcam - capture configuration and color grading for a LUT video camera
//!
//! This library holds the platform independent core of the camera: choosing
//! the capture format and frame rate, deriving encoder settings for each
//! dynamic range, planning recordings and grading images with 3D LUTs.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Format and frame rate selection
//! - [`backends`]: Camera capability traits and session configuration
//! - [`media`]: Codec and color metadata, LUT loading and grading
//! - [`pipelines`]: Encoder profiles and the recording controller
//! - [`config`]: User configuration handling
//! - [`storage`]: Recorded video library
//!
//! # Example
//!
//! ```
//! use lutcam::backends::camera::{FormatDescriptor, FrameRateRange};
//! use lutcam::constants::TargetResolution;
//!
//! let formats = vec![FormatDescriptor::new(
//!     3840,
//!     2160,
//!     vec![FrameRateRange::new(1.0, 60.0).unwrap()],
//! )];
//! let result = lutcam::select_format(&formats, TargetResolution::P2160, 30);
//! assert_eq!(result.frame_rate_range().map(|r| r.max_frame_rate()), Some(60.0));
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod media;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::format_picker::{SelectionResult, select_format};
pub use config::Config;
pub use constants::TargetResolution;
pub use errors::{AppError, AppResult};
pub use media::formats::DynamicRange;
pub use pipelines::video::{EncoderProfile, build_encoder_profile};
pub use storage::VideoLibrary;
