//! RGB + gray histogram computation.

use serde::{Deserialize, Serialize};

use crate::grading::mean_gray;
use crate::image::{PixelFormat, RasterBuffer};
use crate::parallel;

/// Number of bins per channel.
pub const BINS: usize = 256;

/// Histogram channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Gray,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 4] = [Self::Red, Self::Green, Self::Blue, Self::Gray];

    const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Gray => 3,
        }
    }
}

/// Histogram data for R, G, B, and gray channels (256 bins each).
///
/// The gray channel bins the truncated arithmetic mean `(r + g + b) / 3`.
/// For GRAY8 rasters the R, G, and B histograms mirror the gray channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramData {
    /// Bin counts for `[R, G, B, Gray]` channels. Each `Vec` has 256 entries.
    pub bins: [Vec<u64>; 4],
    /// Peak bin value across all channels (for normalization).
    pub peak: u64,
}

impl HistogramData {
    pub fn red(&self) -> &[u64] {
        &self.bins[0]
    }

    pub fn green(&self) -> &[u64] {
        &self.bins[1]
    }

    pub fn blue(&self) -> &[u64] {
        &self.bins[2]
    }

    pub fn gray(&self) -> &[u64] {
        &self.bins[3]
    }

    pub fn channel(&self, channel: Channel) -> &[u64] {
        &self.bins[channel.index()]
    }

    /// Total number of samples in a channel. Equals `W·H` for every channel.
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().sum()
    }

    /// Lowest and highest occupied bin, or `None` for an empty channel.
    pub fn occupied_range(&self, channel: Channel) -> Option<(u8, u8)> {
        let bins = self.channel(channel);
        let lo = bins.iter().position(|&n| n > 0)?;
        let hi = bins.iter().rposition(|&n| n > 0)?;
        Some((lo as u8, hi as u8))
    }

    /// Count-weighted mean bin value of a channel.
    pub fn mean(&self, channel: Channel) -> f64 {
        let total = self.total(channel);
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self
            .channel(channel)
            .iter()
            .enumerate()
            .map(|(v, &n)| v as u64 * n)
            .sum();
        weighted as f64 / total as f64
    }
}

/// Compute the histogram of a raster in one parallel pass.
pub fn compute(image: &RasterBuffer) -> HistogramData {
    let format = image.format();
    let counts = parallel::fold_rows(
        image,
        || [[0u64; BINS]; 4],
        |mut acc, row| {
            match format {
                PixelFormat::Rgb8 => {
                    for px in row.chunks_exact(3) {
                        let (r, g, b) = (px[0], px[1], px[2]);
                        acc[0][r as usize] += 1;
                        acc[1][g as usize] += 1;
                        acc[2][b as usize] += 1;
                        acc[3][mean_gray(r as i32, g as i32, b as i32) as usize] += 1;
                    }
                }
                PixelFormat::Gray8 => {
                    for &v in row {
                        acc[3][v as usize] += 1;
                    }
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

    let gray = counts[3].to_vec();
    let bins = match format {
        PixelFormat::Rgb8 => [counts[0].to_vec(), counts[1].to_vec(), counts[2].to_vec(), gray],
        PixelFormat::Gray8 => [gray.clone(), gray.clone(), gray.clone(), gray],
    };
    let peak = bins.iter().flatten().copied().max().unwrap_or(0);

    HistogramData { bins, peak }
}
