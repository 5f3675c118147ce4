// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use lutcam::backends::camera::{BackDeviceType, CameraPosition};
use lutcam::constants::TargetResolution;
use lutcam::media::formats::{DynamicRange, VideoFormat};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "lutcam")]
#[command(about = "Capture format selection, encoder profiles and LUT grading for a video camera")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/lutcam/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a format and frame rate range from a JSON list of formats
    Select {
        /// JSON file containing an array of formats
        #[arg(short, long)]
        formats: PathBuf,

        /// Target resolution (720, 1080 or 2160)
        #[arg(short, long, default_value = "2160")]
        resolution: TargetResolution,

        /// Target frame rate
        #[arg(long, default_value = "120")]
        fps: u32,

        /// Apply the 2x zoom and 420f preference filters first
        #[arg(long)]
        prefilter: bool,
    },

    /// Print the encoder profile for a dynamic range
    Profile {
        /// Dynamic range (sdr, hdr10, dolby-vision)
        #[arg(short, long, default_value = "sdr")]
        range: DynamicRange,

        /// Frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        #[arg(long, default_value = "3840")]
        width: u32,

        #[arg(long, default_value = "2160")]
        height: u32,
    },

    /// Configure a session from a camera catalog and print the recording plan
    Plan {
        /// JSON camera catalog
        #[arg(short, long)]
        catalog: PathBuf,

        /// Camera position (back or front)
        #[arg(short, long)]
        position: Option<CameraPosition>,

        /// Back lens (ultra-wide, wide-angle, wide-angle-x2, telephoto)
        #[arg(short, long)]
        lens: Option<BackDeviceType>,

        /// Dynamic range (sdr, hdr10, dolby-vision)
        #[arg(short, long)]
        range: Option<DynamicRange>,

        /// Requested video format (mp4 or hevc)
        #[arg(short, long)]
        format: Option<VideoFormat>,

        /// Output directory (default: ~/Videos/lutcam)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the LUT catalog and which files are installed
    Luts {
        /// LUT directory (default from config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Apply a LUT to an image
    Grade {
        /// LUT file (raw float RGBA cube)
        #[arg(short, long)]
        lut: PathBuf,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=lutcam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(lutcam::Config::default_path);

    match cli.command {
        Commands::Select {
            formats,
            resolution,
            fps,
            prefilter,
        } => cli::select_formats(&formats, resolution, fps, prefilter),
        Commands::Profile {
            range,
            fps,
            width,
            height,
        } => cli::show_profile(range, fps, width, height),
        Commands::Plan {
            catalog,
            position,
            lens,
            range,
            format,
            output,
        } => {
            let options = cli::PlanOptions {
                position,
                lens,
                range,
                format,
                output,
            };
            cli::plan_recording(&config_path, catalog, options)
        }
        Commands::Luts { dir } => cli::list_luts(&config_path, dir),
        Commands::Grade { lut, input, output } => cli::grade(&lut, &input, &output),
        Commands::Config { save } => cli::show_config(&config_path, save),
    }
}
