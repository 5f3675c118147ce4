// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Selecting a capture format from a list of formats
//! - Printing encoder profiles
//! - Planning a recording against a camera catalog
//! - Listing and applying LUTs

use chrono::Local;
use lutcam::Config;
use lutcam::app::format_picker::{prefilter_formats, select_format};
use lutcam::backends::camera::{
    BackDeviceType, CameraPosition, FormatDescriptor, StaticCameraCatalog, configure_session,
};
use lutcam::constants::TargetResolution;
use lutcam::errors::{AppError, FormatError};
use lutcam::media::formats::{DynamicRange, VideoFormat};
use lutcam::media::lut::{self, LUT_CATALOG};
use lutcam::pipelines::video::{RecordingPlan, build_encoder_profile_for_rate};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Select a format from a JSON file of formats and print the result
pub fn select_formats(
    formats_file: &Path,
    resolution: TargetResolution,
    fps: u32,
    prefilter: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(formats_file)?;
    let formats: Vec<FormatDescriptor> = serde_json::from_str(&json).map_err(FormatError::from)?;
    let formats = if prefilter {
        prefilter_formats(&formats)
    } else {
        formats
    };

    match select_format(&formats, resolution, fps).into_selected() {
        Some(selected) => println!("{}", serde_json::to_string_pretty(&selected)?),
        None => println!("No format matches {} ({})", resolution, resolution.display_name()),
    }
    Ok(())
}

/// Print the encoder profile for a dynamic range, frame rate and size
pub fn show_profile(
    range: DynamicRange,
    fps: u32,
    width: u32,
    height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = build_encoder_profile_for_rate(range, fps, width, height)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Command line overrides for `plan`
pub struct PlanOptions {
    pub position: Option<CameraPosition>,
    pub lens: Option<BackDeviceType>,
    pub range: Option<DynamicRange>,
    pub format: Option<VideoFormat>,
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlanReport {
    session: lutcam::backends::camera::SessionConfiguration,
    recording: Option<RecordingPlan>,
}

/// Configure a session against a camera catalog and print the recording plan
pub fn plan_recording(
    config_path: &Path,
    catalog_file: PathBuf,
    options: PlanOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_file_or_default(config_path)?;
    let position = options.position.unwrap_or(config.position);
    let lens = options.lens.unwrap_or(config.back_device);
    let range = options.range.unwrap_or(config.dynamic_range);
    let format = options.format.unwrap_or(config.video_format);
    let output_dir = options.output.unwrap_or_else(|| config.output_dir.clone());
    let settings = config.capture_settings();

    let rt = tokio::runtime::Runtime::new()?;
    let session = rt.block_on(async move {
        // Catalog parsing and configuration are blocking work
        tokio::task::spawn_blocking(move || {
            let catalog = StaticCameraCatalog::from_file(&catalog_file)?;
            configure_session(&catalog, position, lens, &settings).map_err(AppError::from)
        })
        .await
        .map_err(|e| AppError::Other(format!("configuration task failed: {}", e)))?
    })?;

    let recording = if session.format.is_none() {
        eprintln!("No matching format for {}, recording would use the device default", settings.resolution);
        None
    } else if session.applied_frame_rate.is_none() {
        eprintln!("Selected format has no usable frame rate, recording is not possible");
        None
    } else {
        Some(RecordingPlan::new(&session, range, format, &output_dir, Local::now())?)
    };

    let report = PlanReport { session, recording };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// List the LUT catalog, marking the LUTs installed in the directory
pub fn list_luts(config_path: &Path, dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_file_or_default(config_path)?;
    let dir = dir.unwrap_or(config.lut_dir);

    println!("LUTs in {}:", dir.display());
    println!();
    for name in LUT_CATALOG {
        let installed = lut::lut_path(&dir, name).is_file();
        let selected = config.selected_lut.as_deref() == Some(name);
        println!(
            "  [{}] {}{}",
            if installed { "x" } else { " " },
            name,
            if selected { " (selected)" } else { "" }
        );
    }
    Ok(())
}

/// Apply a LUT file to an image
pub fn grade(lut_file: &Path, input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    lut::grade_file(lut_file, input, output)?;
    println!("Graded image saved to: {}", output.display());
    Ok(())
}

/// Print the effective configuration, optionally saving it
pub fn show_config(config_path: &Path, save: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_file_or_default(config_path)?;
    println!("{}", toml::to_string_pretty(&config)?);
    if save {
        config.save_to_file(config_path)?;
        println!("Config saved to: {}", config_path.display());
    }
    Ok(())
}
