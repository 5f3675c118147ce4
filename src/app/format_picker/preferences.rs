// SPDX-License-Identifier: GPL-3.0-only

//! Format selection and preference logic

use crate::backends::camera::types::{FormatDescriptor, FrameRateRange};
use crate::constants::{TargetResolution, capture};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// A format paired with the frame rate range chosen from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedFormat {
    pub format: FormatDescriptor,
    pub frame_rate_range: FrameRateRange,
    /// False when no range reached the target and this is the best-effort fallback
    pub meets_target: bool,
}

/// Outcome of [`select_format`]
///
/// Format and range are stored together so they are either both present or
/// both absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionResult {
    selected: Option<SelectedFormat>,
}

impl SelectionResult {
    pub fn none() -> Self {
        Self { selected: None }
    }

    pub fn format(&self) -> Option<&FormatDescriptor> {
        self.selected.as_ref().map(|s| &s.format)
    }

    pub fn frame_rate_range(&self) -> Option<&FrameRateRange> {
        self.selected.as_ref().map(|s| &s.frame_rate_range)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    pub fn selected(&self) -> Option<&SelectedFormat> {
        self.selected.as_ref()
    }

    pub fn into_selected(self) -> Option<SelectedFormat> {
        self.selected
    }
}

/// Select the capture format and frame rate range for a target
///
/// Only formats whose dimensions match `resolution` exactly are considered.
/// Formats and their ranges are scanned in input order:
/// - the first range whose max frame rate reaches `frame_rate` wins, even if
///   a later one would go higher;
/// - otherwise the last matching range scanned is returned as a best effort;
/// - with no matching format the result is empty.
pub fn select_format(
    formats: &[FormatDescriptor],
    resolution: TargetResolution,
    frame_rate: u32,
) -> SelectionResult {
    let candidates = formats
        .iter()
        .filter(|f| resolution.matches(f.width, f.height))
        .flat_map(|f| f.frame_rate_ranges.iter().map(move |r| (f, r)));

    // Phase 1: first fit
    let mut last_seen = None;
    for (format, range) in candidates {
        if range.sustains(frame_rate) {
            info!(
                format = %format,
                range = %range,
                target_fps = frame_rate,
                "Selected first format meeting target frame rate"
            );
            return SelectionResult {
                selected: Some(SelectedFormat {
                    format: format.clone(),
                    frame_rate_range: *range,
                    meets_target: true,
                }),
            };
        }
        last_seen = Some((format, range));
    }

    // Phase 2: nothing reached the target, fall back to the last pair scanned
    match last_seen {
        Some((format, range)) => {
            info!(
                format = %format,
                range = %range,
                target_fps = frame_rate,
                "No format meets target frame rate, using last matching range"
            );
            SelectionResult {
                selected: Some(SelectedFormat {
                    format: format.clone(),
                    frame_rate_range: *range,
                    meets_target: false,
                }),
            }
        }
        None => {
            debug!(
                resolution = %resolution,
                available = formats.len(),
                "No format matches target resolution"
            );
            SelectionResult::none()
        }
    }
}

/// Narrow a device's formats before selection
///
/// Keeps formats with a 2x native secondary zoom, then full-range 4:2:0
/// bi-planar formats. Each step is skipped if it would leave nothing.
pub fn prefilter_formats(formats: &[FormatDescriptor]) -> Vec<FormatDescriptor> {
    let zoomable = retain_if_any(formats.to_vec(), |f| {
        f.supports_secondary_zoom(capture::PREFERRED_SECONDARY_ZOOM)
    });
    let narrowed = retain_if_any(zoomable, |f| {
        f.pixel_format == capture::PREFERRED_PIXEL_FORMAT
    });

    debug!(
        before = formats.len(),
        after = narrowed.len(),
        "Narrowed candidate formats"
    );
    narrowed
}

fn retain_if_any<F>(formats: Vec<FormatDescriptor>, keep: F) -> Vec<FormatDescriptor>
where
    F: Fn(&FormatDescriptor) -> bool,
{
    if formats.iter().any(&keep) {
        formats.into_iter().filter(|f| keep(f)).collect()
    } else {
        formats
    }
}

/// Frame rate to apply to the device for a selected range
///
/// The range's max frame rate truncated to whole frames, capped at `cap`.
/// Returns `None` when that leaves no whole frame per second (a range below
/// 1 fps, or a zero cap).
pub fn applied_frame_rate(range: &FrameRateRange, cap: u32) -> Option<u32> {
    let max = range.max_frame_rate().floor();
    let rate = if max >= f64::from(cap) { cap } else { max as u32 };
    (rate > 0).then_some(rate)
}

/// Frame duration for a whole frame rate (used for both min and max duration)
///
/// Returns `None` for a zero frame rate.
pub fn frame_duration(frame_rate: u32) -> Option<Duration> {
    (frame_rate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(frame_rate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f64, max: f64) -> FrameRateRange {
        FrameRateRange::new(min, max).unwrap()
    }

    fn create_test_format(width: u32, height: u32, ranges: &[(f64, f64)]) -> FormatDescriptor {
        FormatDescriptor::new(
            width,
            height,
            ranges.iter().map(|(min, max)| range(*min, *max)).collect(),
        )
    }

    #[test]
    fn test_select_format_empty_returns_none() {
        for res in TargetResolution::ALL {
            let result = select_format(&[], res, 30);
            assert!(result.is_empty());
            assert!(result.format().is_none());
            assert!(result.frame_rate_range().is_none());
        }
    }

    #[test]
    fn test_select_format_falls_back_to_last_matching_range() {
        let formats = vec![
            create_test_format(1920, 1080, &[(24.0, 30.0)]),
            create_test_format(3840, 2160, &[(24.0, 60.0)]),
        ];

        let result = select_format(&formats, TargetResolution::P2160, 120);
        let selected = result.selected().unwrap();
        assert_eq!(selected.format.width, 3840);
        assert_eq!(selected.format.height, 2160);
        assert_eq!(selected.frame_rate_range, range(24.0, 60.0));
        assert!(!selected.meets_target);
    }

    #[test]
    fn test_select_format_first_fit_across_formats() {
        let formats = vec![
            create_test_format(3840, 2160, &[(24.0, 30.0)]),
            create_test_format(3840, 2160, &[(24.0, 120.0)]),
        ];

        let result = select_format(&formats, TargetResolution::P2160, 120);
        assert_eq!(result.format(), Some(&formats[1]));
        assert_eq!(result.frame_rate_range(), Some(&range(24.0, 120.0)));
        assert!(result.selected().unwrap().meets_target);
    }

    #[test]
    fn test_select_format_first_fit_not_best_fit() {
        // The 120 fps range qualifies first; the later 240 fps range is never considered
        let formats = vec![
            create_test_format(1920, 1080, &[(1.0, 30.0), (1.0, 120.0)]),
            create_test_format(1920, 1080, &[(1.0, 240.0)]),
        ];

        let result = select_format(&formats, TargetResolution::P1080, 60);
        assert_eq!(result.format(), Some(&formats[0]));
        assert_eq!(result.frame_rate_range(), Some(&range(1.0, 120.0)));
    }

    #[test]
    fn test_select_format_fallback_is_last_not_highest() {
        // Fallback ignores which range is fastest: it is simply the last one scanned
        let formats = vec![
            create_test_format(1280, 720, &[(1.0, 50.0)]),
            create_test_format(1280, 720, &[(1.0, 25.0), (1.0, 15.0)]),
        ];

        let result = select_format(&formats, TargetResolution::P720, 60);
        assert_eq!(result.format(), Some(&formats[1]));
        assert_eq!(result.frame_rate_range(), Some(&range(1.0, 15.0)));
    }

    #[test]
    fn test_select_format_no_dimension_match() {
        let formats = vec![create_test_format(1280, 720, &[(1.0, 240.0)])];
        assert!(select_format(&formats, TargetResolution::P2160, 30).is_empty());
    }

    #[test]
    fn test_select_format_requires_both_dimensions() {
        // Same height, different width (DCI 4K) must not match
        let formats = vec![
            create_test_format(4096, 2160, &[(1.0, 60.0)]),
            create_test_format(3840, 1600, &[(1.0, 60.0)]),
        ];
        assert!(select_format(&formats, TargetResolution::P2160, 30).is_empty());
    }

    #[test]
    fn test_select_format_ignores_matching_format_without_ranges() {
        let formats = vec![create_test_format(1920, 1080, &[])];
        assert!(select_format(&formats, TargetResolution::P1080, 30).is_empty());
    }

    #[test]
    fn test_select_format_result_is_both_or_neither() {
        let formats = vec![
            create_test_format(1920, 1080, &[(1.0, 30.0)]),
            create_test_format(3840, 2160, &[(1.0, 60.0), (1.0, 120.0)]),
            create_test_format(1280, 720, &[(1.0, 240.0)]),
        ];
        for res in TargetResolution::ALL {
            for fps in [1, 24, 30, 60, 120, 240, 480] {
                let result = select_format(&formats, res, fps);
                assert_eq!(result.format().is_some(), result.frame_rate_range().is_some());
            }
        }
    }

    #[test]
    fn test_prefilter_prefers_2x_zoom_and_420f() {
        let formats = vec![
            create_test_format(3840, 2160, &[(1.0, 60.0)]).with_pixel_format("420v"),
            create_test_format(3840, 2160, &[(1.0, 30.0)])
                .with_pixel_format("420v")
                .with_secondary_zoom_factors(vec![2.0]),
            create_test_format(3840, 2160, &[(1.0, 30.0)])
                .with_pixel_format("420f")
                .with_secondary_zoom_factors(vec![2.0]),
        ];

        let narrowed = prefilter_formats(&formats);
        assert_eq!(narrowed, vec![formats[2].clone()]);
    }

    #[test]
    fn test_prefilter_skips_steps_that_would_empty_the_list() {
        let formats = vec![
            create_test_format(1920, 1080, &[(1.0, 60.0)]).with_pixel_format("420v"),
            create_test_format(1280, 720, &[(1.0, 60.0)]).with_pixel_format("x420"),
        ];

        assert_eq!(prefilter_formats(&formats), formats);
    }

    #[test]
    fn test_applied_frame_rate_caps_and_truncates() {
        assert_eq!(applied_frame_rate(&range(1.0, 240.0), 120), Some(120));
        assert_eq!(applied_frame_rate(&range(1.0, 120.0), 120), Some(120));
        assert_eq!(applied_frame_rate(&range(1.0, 59.94), 120), Some(59));
        assert_eq!(applied_frame_rate(&range(1.0, 60.0), 30), Some(30));
    }

    #[test]
    fn test_applied_frame_rate_never_zero() {
        // Sub-1 fps ranges are valid but leave no whole frame rate
        assert_eq!(applied_frame_rate(&range(0.5, 0.9), 120), None);
        assert_eq!(applied_frame_rate(&range(1.0, 60.0), 0), None);
        assert_eq!(applied_frame_rate(&range(0.5, 1.5), 120), Some(1));
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(0), None);
        let d = frame_duration(60).unwrap();
        assert!((d.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }
}
