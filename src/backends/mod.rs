// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer
//!
//! Platform camera access sits behind the traits in [`camera`]. The only
//! bundled implementation is a static catalog loaded from JSON.
//!
//! # Modules
//!
//! - [`camera`]: Capability traits, device model and session configuration

pub mod camera;
