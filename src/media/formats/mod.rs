// SPDX-License-Identifier: MPL-2.0

//! Format and codec utilities
//!
//! This module provides the container policy and the color metadata
//! attached to recorded video.

pub mod codec;
pub mod color;

pub use codec::{ContainerFormat, VideoFormat};
pub use color::{
    ColorMetadata, ColorPrimaries, DynamicRange, ProfileLevel, TransferFunction, YCbCrMatrix,
};
