//! Tone chain on 8-bit pixels: gamma, then brightness, contrast, and saturation.
//!
//! The chain always runs in this order, and the order changes the result:
//!
//! ```text
//!   Input ──→ Gamma LUT ──→ +Brightness ──→ ×Contrast ──→ Saturation ──→ clamp ──→ Output
//!            (skipped at 1.0)
//! ```
//!
//! Every stage truncates toward zero into an `i32` intermediate. Values are
//! free to leave `[0, 255]` between stages; only the final result is clamped.

use crate::error::ToneResult;
use crate::grading::{clamp_channel, mean_gray};
use crate::image::{PixelFormat, RasterBuffer};
use crate::parallel;
use crate::transform::lut::Lut1D;
use crate::transform::params::AdjustmentParams;

/// Apply brightness as an additive offset.
///
/// ```text
/// out = trunc(in + brightness × 255)
/// ```
///
/// `brightness = 0.0` produces no change.
#[inline]
pub fn apply_brightness(value: i32, brightness: f32) -> i32 {
    (value as f32 + brightness * 255.0) as i32
}

/// Apply contrast around the mid-level 128.
///
/// ```text
/// out = trunc(in × contrast + 128 × (1 − contrast))
/// ```
///
/// `contrast = 1.0` produces no change.
#[inline]
pub fn apply_contrast(value: i32, contrast: f32) -> i32 {
    (value as f32 * contrast + 128.0 * (1.0 - contrast)) as i32
}

/// Apply saturation relative to the arithmetic channel mean.
///
/// ```text
/// gray = trunc((r + g + b) / 3)
/// out  = trunc(gray + saturation × (c − gray))
/// ```
///
/// `saturation = 1.0` produces no change; `0.0` collapses the pixel to `gray`.
pub fn apply_saturation(rgb: [i32; 3], saturation: f32) -> [i32; 3] {
    let gray = mean_gray(rgb[0], rgb[1], rgb[2]);
    let g = gray as f32;
    rgb.map(|c| (g + saturation * (c - gray) as f32) as i32)
}

/// Run brightness, contrast, and saturation on one pixel (gamma excluded).
///
/// The result is clamped to `[0, 255]` once, after the full chain.
pub fn adjust_pixel(rgb: [u8; 3], params: &AdjustmentParams) -> [u8; 3] {
    let stage = rgb.map(|c| {
        let c = apply_brightness(c as i32, params.brightness);
        apply_contrast(c, params.contrast)
    });
    apply_saturation(stage, params.saturation).map(clamp_channel)
}

/// Single-channel variant of [`adjust_pixel`]. A gray pixel is its own mean,
/// so saturation never changes it.
pub fn adjust_gray(value: u8, params: &AdjustmentParams) -> u8 {
    let c = apply_brightness(value as i32, params.brightness);
    clamp_channel(apply_contrast(c, params.contrast))
}

/// Apply the full tone chain to `source`, producing a new raster of the same
/// size and format. `source` is never modified.
pub fn apply(source: &RasterBuffer, params: &AdjustmentParams) -> ToneResult<RasterBuffer> {
    let gamma = if params.gamma != 1.0 {
        Some(Lut1D::gamma(params.gamma)?)
    } else {
        None
    };
    let lookup = |v: u8| gamma.as_ref().map_or(v, |lut| lut.map(v));

    let out = match source.format() {
        PixelFormat::Rgb8 => parallel::map_pixels(source, PixelFormat::Rgb8, |px, out| {
            let rgb = [lookup(px[0]), lookup(px[1]), lookup(px[2])];
            out.copy_from_slice(&adjust_pixel(rgb, params));
        }),
        PixelFormat::Gray8 => parallel::map_channels(source, |_, v| adjust_gray(lookup(v), params)),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    fn sample_rgb() -> RasterBuffer {
        let data: Vec<u8> = (0..16u32 * 9 * 3).map(|i| (i * 37 % 256) as u8).collect();
        RasterBuffer::from_raw(16, 9, PixelFormat::Rgb8, data).unwrap()
    }

    #[test]
    fn test_identity_params_return_identical_raster() {
        let src = sample_rgb();
        let out = apply(&src, &AdjustmentParams::default()).unwrap();
        assert_eq!(out, src);

        let gray = RasterBuffer::from_raw(4, 4, PixelFormat::Gray8, (0..16).map(|v| v * 16).collect())
            .unwrap();
        assert_eq!(apply(&gray, &AdjustmentParams::default()).unwrap(), gray);
    }

    #[test]
    fn test_source_is_untouched() {
        let src = sample_rgb();
        let before = src.clone();
        let params = AdjustmentParams {
            brightness: 0.3,
            contrast: 1.4,
            saturation: 0.2,
            gamma: 2.0,
        };
        let out = apply(&src, &params).unwrap();
        assert_eq!(src, before);
        assert_ne!(out, src);
    }

    #[test]
    fn test_brightness_offset_then_clamp() {
        let params = AdjustmentParams {
            brightness: 0.5,
            ..Default::default()
        };
        // 0.5 × 255 = 127.5 → 100 + 127.5 = 227.5 → 227
        assert_eq!(adjust_pixel([100, 100, 100], &params), [227, 227, 227]);
        assert_eq!(adjust_pixel([200, 200, 200], &params), [255, 255, 255]);
    }

    #[test]
    fn test_intermediate_overflow_does_not_wrap() {
        // Brightness pushes to 455, contrast 0 pulls everything back to 128.
        let params = AdjustmentParams {
            brightness: 1.0,
            contrast: 0.0,
            ..Default::default()
        };
        assert_eq!(adjust_pixel([200, 10, 90], &params), [128, 128, 128]);
    }

    #[test]
    fn test_contrast_pivots_on_128() {
        let params = AdjustmentParams {
            contrast: 2.0,
            ..Default::default()
        };
        assert_eq!(adjust_pixel([128, 128, 128], &params), [128, 128, 128]);
        assert_eq!(adjust_pixel([150, 100, 128], &params), [172, 72, 128]);
    }

    #[test]
    fn test_saturation_zero_is_mean_gray() {
        let params = AdjustmentParams {
            saturation: 0.0,
            ..Default::default()
        };
        // mean of 200, 100, 31 = 331 / 3 = 110
        assert_eq!(adjust_pixel([200, 100, 31], &params), [110, 110, 110]);
    }

    #[test]
    fn test_saturation_uses_post_contrast_values() {
        let params = AdjustmentParams {
            contrast: 0.5,
            saturation: 0.0,
            ..Default::default()
        };
        // contrast: 200 → 164, 100 → 114, 30 → 79; mean = 357 / 3 = 119
        assert_eq!(adjust_pixel([200, 100, 30], &params), [119, 119, 119]);
    }

    #[test]
    fn test_gamma_runs_before_brightness() {
        let src = RasterBuffer::filled(1, 1, Pixel::Rgb([128, 128, 128])).unwrap();
        let params = AdjustmentParams {
            gamma: 2.2,
            brightness: 0.1,
            ..Default::default()
        };
        let out = apply(&src, &params).unwrap();
        // gamma: 128 → 186, then + 25.5 → 211
        assert_eq!(out.pixel(0, 0).unwrap(), Pixel::Rgb([211, 211, 211]));
    }

    #[test]
    fn test_gray_raster_stays_gray() {
        let src = RasterBuffer::filled(2, 3, Pixel::Gray(100)).unwrap();
        let params = AdjustmentParams {
            brightness: -0.2,
            saturation: 2.0,
            ..Default::default()
        };
        let out = apply(&src, &params).unwrap();
        assert_eq!(out.format(), PixelFormat::Gray8);
        // 100 − 51 = 49
        assert!(out.as_bytes().iter().all(|&v| v == 49));
    }

    #[test]
    fn test_invalid_gamma_is_reported() {
        let src = sample_rgb();
        let params = AdjustmentParams {
            gamma: 0.0,
            ..Default::default()
        };
        assert!(apply(&src, &params).is_err());
    }
}
