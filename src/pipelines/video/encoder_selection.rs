// SPDX-License-Identifier: MPL-2.0

//! Encoder profile derivation for the recording pipeline
//!
//! The profile is computed once per recording start from the dynamic range,
//! the device's frame duration and the output dimensions, then handed to the
//! asset writer.

use crate::constants::encoding;
use crate::errors::ProfileError;
use crate::media::formats::{
    ColorPrimaries, DynamicRange, ProfileLevel, TransferFunction, YCbCrMatrix,
};
use serde::Serialize;
use tracing::debug;

/// Compression and color settings for the video track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderProfile {
    pub profile_level: ProfileLevel,
    pub color_primaries: ColorPrimaries,
    pub transfer_function: TransferFunction,
    pub ycbcr_matrix: YCbCrMatrix,
    /// Average bitrate in bits per second
    pub average_bit_rate: u64,
    pub expected_frame_rate: u32,
}

/// Build the encoder profile for a recording
///
/// # Arguments
/// * `range` - Dynamic range of the recording
/// * `min_frame_duration` - Device minimum frame duration in seconds (must be > 0)
/// * `width` - Output width in pixels (must be > 0)
/// * `height` - Output height in pixels (must be > 0)
///
/// The bitrate is `trunc(0.125 / min_frame_duration) * width * height`.
/// Durations so short that the bitrate no longer fits in a `u64` are
/// rejected with [`ProfileError::InvalidArgument`].
pub fn build_encoder_profile(
    range: DynamicRange,
    min_frame_duration: f64,
    width: u32,
    height: u32,
) -> Result<EncoderProfile, ProfileError> {
    if !min_frame_duration.is_finite() || min_frame_duration <= 0.0 {
        return Err(ProfileError::InvalidArgument(format!(
            "frame duration must be positive, got {}",
            min_frame_duration
        )));
    }
    if width == 0 || height == 0 {
        return Err(ProfileError::InvalidArgument(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }

    let expected_frame_rate = (1.0 / min_frame_duration).round() as u32;
    let bits_per_pixel = (encoding::BITS_PER_PIXEL / min_frame_duration).trunc() as u64;
    let average_bit_rate = bits_per_pixel
        .checked_mul(u64::from(width))
        .and_then(|bits| bits.checked_mul(u64::from(height)))
        .ok_or_else(|| {
            ProfileError::InvalidArgument(format!(
                "bitrate overflows for frame duration {} at {}x{}",
                min_frame_duration, width, height
            ))
        })?;

    let color = range.color_metadata();
    debug!(
        range = %range,
        expected_frame_rate,
        average_bit_rate,
        profile = %color.profile_level,
        "Built encoder profile"
    );

    Ok(EncoderProfile {
        profile_level: color.profile_level,
        color_primaries: color.color_primaries,
        transfer_function: color.transfer_function,
        ycbcr_matrix: color.ycbcr_matrix,
        average_bit_rate,
        expected_frame_rate,
    })
}

/// Build the encoder profile from a whole frame rate instead of a duration
pub fn build_encoder_profile_for_rate(
    range: DynamicRange,
    frame_rate: u32,
    width: u32,
    height: u32,
) -> Result<EncoderProfile, ProfileError> {
    if frame_rate == 0 {
        return Err(ProfileError::InvalidArgument(
            "frame rate must be positive".to_string(),
        ));
    }
    build_encoder_profile(range, 1.0 / f64::from(frame_rate), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdr10_4k60_profile() {
        let profile = build_encoder_profile(DynamicRange::Hdr10, 1.0 / 60.0, 3840, 2160).unwrap();
        assert_eq!(profile.expected_frame_rate, 60);
        assert_eq!(profile.average_bit_rate, 58_060_800);
        assert_eq!(profile.color_primaries, ColorPrimaries::ItuR2020);
        assert_eq!(profile.transfer_function, TransferFunction::SmpteSt2084Pq);
        assert_eq!(profile.ycbcr_matrix, YCbCrMatrix::ItuR2020);
        assert_eq!(profile.profile_level, ProfileLevel::HevcMain10AutoLevel);
    }

    #[test]
    fn test_sdr_1080p30_profile() {
        let profile = build_encoder_profile(DynamicRange::Sdr, 1.0 / 30.0, 1920, 1080).unwrap();
        assert_eq!(profile.expected_frame_rate, 30);
        // trunc(3.75) = 3
        assert_eq!(profile.average_bit_rate, 3 * 1920 * 1080);
        assert_eq!(profile.profile_level, ProfileLevel::HevcMainAutoLevel);
        assert_eq!(profile.transfer_function, TransferFunction::ItuR709_2);
    }

    #[test]
    fn test_dolby_vision_uses_hlg() {
        let profile =
            build_encoder_profile(DynamicRange::DolbyVision, 1.0 / 120.0, 3840, 2160).unwrap();
        assert_eq!(profile.transfer_function, TransferFunction::ItuR2100Hlg);
        assert_eq!(profile.average_bit_rate, 15 * 3840 * 2160);
        assert_eq!(profile.expected_frame_rate, 120);
    }

    #[test]
    fn test_zero_duration_is_invalid_argument() {
        let err = build_encoder_profile(DynamicRange::Sdr, 0.0, 1920, 1080).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidArgument(_)));
    }

    #[test]
    fn test_negative_and_nan_duration_rejected() {
        assert!(build_encoder_profile(DynamicRange::Sdr, -1.0 / 30.0, 1920, 1080).is_err());
        assert!(build_encoder_profile(DynamicRange::Sdr, f64::NAN, 1920, 1080).is_err());
        assert!(build_encoder_profile(DynamicRange::Sdr, f64::INFINITY, 1920, 1080).is_err());
    }

    #[test]
    fn test_tiny_duration_overflow_rejected() {
        let err = build_encoder_profile(DynamicRange::Sdr, 1e-15, 3840, 2160).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidArgument(_)));
        assert!(build_encoder_profile(DynamicRange::Hdr10, f64::MIN_POSITIVE, 2, 2).is_err());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(build_encoder_profile(DynamicRange::Hdr10, 1.0 / 30.0, 0, 1080).is_err());
        assert!(build_encoder_profile(DynamicRange::Hdr10, 1.0 / 30.0, 1920, 0).is_err());
    }

    #[test]
    fn test_profile_for_rate_matches_duration() {
        assert_eq!(
            build_encoder_profile_for_rate(DynamicRange::Sdr, 60, 3840, 2160),
            build_encoder_profile(DynamicRange::Sdr, 1.0 / 60.0, 3840, 2160)
        );
        assert!(build_encoder_profile_for_rate(DynamicRange::Sdr, 0, 3840, 2160).is_err());
    }
}
