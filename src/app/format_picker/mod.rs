// SPDX-License-Identifier: GPL-3.0-only

//! Format picker module
//!
//! Chooses the capture format and frame rate range for a target resolution.

pub mod preferences;

// Re-export for convenience
pub use preferences::{SelectedFormat, SelectionResult, applied_frame_rate, prefilter_formats, select_format};
