//! Grayscale conversion using ITU-R BT.601 luma weights.

use crate::image::{PixelFormat, RasterBuffer};
use crate::parallel;

/// BT.601 luma weights, scaled by 1000 for fixed-point evaluation.
const LUMA_BT601_MILLI: [u32; 3] = [299, 587, 114];

/// Weighted luma of one pixel: `round(0.299 R + 0.587 G + 0.114 B)`.
///
/// Evaluated as `(299 R + 587 G + 114 B + 500) / 1000` so the result does not
/// depend on floating-point rounding.
#[inline]
pub fn luma_gray(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_BT601_MILLI[0] * r as u32
        + LUMA_BT601_MILLI[1] * g as u32
        + LUMA_BT601_MILLI[2] * b as u32;
    ((sum + 500) / 1000) as u8
}

/// Reduce `source` to a single luma channel. GRAY8 input is copied.
pub fn apply(source: &RasterBuffer) -> RasterBuffer {
    match source.format() {
        PixelFormat::Gray8 => source.clone(),
        PixelFormat::Rgb8 => parallel::map_pixels(source, PixelFormat::Gray8, |px, out| {
            out[0] = luma_gray(px[0], px[1], px[2]);
        }),
    }
}
