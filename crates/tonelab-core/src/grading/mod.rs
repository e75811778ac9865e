//! Grading tools: the reversible tone chain and one-shot corrections.

pub mod grayscale;
pub mod stretch;
pub mod tone;

pub use grayscale::luma_gray;

/// Arithmetic channel mean, truncated: `(r + g + b) / 3`.
///
/// Saturation and the histogram gray channel both use this. Grayscale
/// conversion uses the weighted [`luma_gray`] instead.
#[inline]
pub fn mean_gray(r: i32, g: i32, b: i32) -> i32 {
    (r + g + b) / 3
}

/// Clamp a widened channel value back into `[0, 255]`.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
