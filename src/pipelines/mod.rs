// SPDX-License-Identifier: MPL-2.0

//! Recording pipeline
//!
//! ```text
//! ┌──────────────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ SessionConfiguration │ ──▶ │  RecordingPlan    │ ──▶ │ MP4/MOV file │
//! │  (format, fps)       │     │  - EncoderProfile │     │              │
//! │                      │     │  - HEVC upgrade   │     │              │
//! └──────────────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`video`]: Encoder profiles, recording plans and the recording controller

pub mod video;
