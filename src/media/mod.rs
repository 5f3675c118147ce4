// SPDX-License-Identifier: MPL-2.0

//! Media metadata and color grading
//!
//! # Formats
//!
//! The [`formats`] module describes containers, codecs and the color
//! metadata attached to each dynamic range.
//!
//! # Color grading
//!
//! The [`lut`] module loads 3D lookup tables stored as raw float RGBA cubes
//! and applies them to still images on the CPU.

pub mod formats;
pub mod lut;

// Re-export commonly used types
pub use formats::{DynamicRange, VideoFormat};
pub use lut::{LutCube, grade_image};
