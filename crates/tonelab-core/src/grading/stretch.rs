//! Linear histogram stretch.
//!
//! Each channel's occupied range `[min, max]` is rescaled to `[0, 255]`:
//!
//! ```text
//! out = (in − min) × 255 / (max − min)      (integer division)
//! ```
//!
//! RGB channels are stretched independently of one another, so the hue
//! balance can shift compared to a luma-based stretch. A channel holding a
//! single value (`min == max`) is passed through unchanged.

use crate::grading::clamp_channel;
use crate::image::RasterBuffer;
use crate::parallel;
use crate::scopes::histogram::BINS;

/// Occupied range of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    /// Lowest value with a non-zero count.
    pub min: u8,
    /// Highest value with a non-zero count.
    pub max: u8,
}

impl ChannelRange {
    /// Find the occupied range from a 256-bin histogram.
    ///
    /// An empty histogram reports `min == max == 0`.
    pub fn from_bins(bins: &[u64; BINS]) -> Self {
        let min = bins.iter().position(|&n| n > 0);
        let max = bins.iter().rposition(|&n| n > 0);
        match (min, max) {
            (Some(min), Some(max)) => Self {
                min: min as u8,
                max: max as u8,
            },
            _ => Self { min: 0, max: 0 },
        }
    }

    /// True when the channel holds a single value and cannot be stretched.
    pub fn is_degenerate(&self) -> bool {
        self.min >= self.max
    }

    /// Remap one value. Degenerate ranges return the input unchanged.
    #[inline]
    pub fn stretch(&self, value: u8) -> u8 {
        if self.is_degenerate() {
            return value;
        }
        let (min, max) = (self.min as i32, self.max as i32);
        clamp_channel((value as i32 - min) * 255 / (max - min))
    }
}

/// Per-channel occupied ranges of `source`, one per interleaved channel.
pub fn channel_ranges(source: &RasterBuffer) -> Vec<ChannelRange> {
    let channels = source.channels();
    let bins = parallel::fold_rows(
        source,
        || vec![[0u64; BINS]; channels],
        |mut acc, row| {
            for px in row.chunks_exact(channels) {
                for (c, &v) in px.iter().enumerate() {
                    acc[c][v as usize] += 1;
                }
            }
            acc
        },
        |mut a, b| {
            for (ha, hb) in a.iter_mut().zip(&b) {
                for (x, y) in ha.iter_mut().zip(hb) {
                    *x += y;
                }
            }
            a
        },
    );
    bins.iter().map(ChannelRange::from_bins).collect()
}

/// Stretch every channel of `source` to the full range. GRAY8 stretches its
/// single channel, RGB8 stretches R, G, and B independently.
pub fn apply(source: &RasterBuffer) -> RasterBuffer {
    let ranges = channel_ranges(source);
    if ranges.iter().all(ChannelRange::is_degenerate) {
        return source.clone();
    }
    tracing::debug!(?ranges, "linear stretch");
    parallel::map_channels(source, |c, v| ranges[c].stretch(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Pixel, PixelFormat};

    #[test]
    fn test_single_color_is_unchanged() {
        let src = RasterBuffer::filled(5, 4, Pixel::Rgb([90, 12, 200])).unwrap();
        assert_eq!(apply(&src), src);
        let gray = RasterBuffer::filled(5, 4, Pixel::Gray(7)).unwrap();
        assert_eq!(apply(&gray), gray);
    }

    #[test]
    fn test_gray_stretch_to_full_range() {
        let src = RasterBuffer::from_raw(4, 1, PixelFormat::Gray8, vec![50, 100, 150, 200]).unwrap();
        let out = apply(&src);
        // (v − 50) × 255 / 150
        assert_eq!(out.as_bytes(), &[0, 85, 170, 255]);
    }

    #[test]
    fn test_channels_stretch_independently() {
        let src = RasterBuffer::from_raw(
            2,
            1,
            PixelFormat::Rgb8,
            vec![10, 40, 77, 20, 240, 77],
        )
        .unwrap();
        let out = apply(&src);
        // Red spans 10..20, green 40..240, blue is degenerate.
        assert_eq!(out.as_bytes(), &[0, 0, 77, 255, 255, 77]);
    }

    #[test]
    fn test_stretch_is_idempotent() {
        let data: Vec<u8> = (0..30u32 * 3).map(|i| (30 + i * 7 % 150) as u8).collect();
        let src = RasterBuffer::from_raw(10, 3, PixelFormat::Rgb8, data).unwrap();
        let once = apply(&src);
        let twice = apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_channel_range_scan() {
        let mut bins = [0u64; BINS];
        bins[3] = 1;
        bins[250] = 9;
        assert_eq!(ChannelRange::from_bins(&bins), ChannelRange { min: 3, max: 250 });
        assert!(ChannelRange::from_bins(&[0; BINS]).is_degenerate());
    }
}
