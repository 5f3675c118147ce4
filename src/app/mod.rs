// SPDX-License-Identifier: MPL-2.0

//! Application logic shared by the command line front end
//!
//! - `format_picker`: Format and frame rate range selection

pub mod format_picker;
