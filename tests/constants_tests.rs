// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use lutcam::constants::{TargetResolution, capture, encoding};
use lutcam::errors::FormatError;

#[test]
fn test_resolution_tiers() {
    // Test that all tiers exist (720p, 1080p, 2160p)
    assert_eq!(TargetResolution::ALL.len(), 3);
}

#[test]
fn test_resolution_widths() {
    let widths: Vec<u32> = TargetResolution::ALL.iter().map(|r| r.width()).collect();
    assert_eq!(widths, vec![1280, 1920, 3840]);
}

#[test]
fn test_resolution_from_integer() {
    assert_eq!(TargetResolution::try_from(1080), Ok(TargetResolution::P1080));
    assert_eq!(
        TargetResolution::try_from(1440),
        Err(FormatError::UnsupportedResolution(1440))
    );
}

#[test]
fn test_resolution_parse() {
    assert_eq!("2160".parse::<TargetResolution>(), Ok(TargetResolution::P2160));
    assert_eq!("720p".parse::<TargetResolution>(), Ok(TargetResolution::P720));
    assert!(matches!(
        "4k".parse::<TargetResolution>(),
        Err(FormatError::Parse(_))
    ));
}

#[test]
fn test_resolution_matching_is_exact() {
    assert!(TargetResolution::P2160.matches(3840, 2160));
    // DCI 4K has the right height but the wrong width
    assert!(!TargetResolution::P2160.matches(4096, 2160));
    assert!(!TargetResolution::P1080.matches(1920, 1088));
}

#[test]
fn test_resolution_display_names() {
    for res in TargetResolution::ALL {
        assert!(!res.display_name().is_empty(), "Display name should not be empty");
    }
}

#[test]
fn test_capture_defaults() {
    assert_eq!(capture::DEFAULT_TARGET_FRAME_RATE, 120);
    assert_eq!(capture::MAX_APPLIED_FRAME_RATE, 120);
    assert_eq!(capture::PREFERRED_PIXEL_FORMAT, "420f");
}

#[test]
fn test_hevc_threshold_sits_between_1440p_and_2160p() {
    assert!(encoding::HEVC_HEIGHT_THRESHOLD > 1440);
    assert!(encoding::HEVC_HEIGHT_THRESHOLD < 2160);
}
