//! Raster representation for the tonal pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ToneError, ToneResult};

/// Supported pixel layouts. Both are 8 bits per channel, interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Three channels, R G B.
    Rgb8,
    /// One luminance channel.
    Gray8,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Gray8 => 1,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb8 => write!(f, "RGB8"),
            Self::Gray8 => write!(f, "GRAY8"),
        }
    }
}

/// A single pixel value, tagged with its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    Rgb([u8; 3]),
    Gray(u8),
}

impl Pixel {
    /// Layout this value belongs to.
    pub const fn format(self) -> PixelFormat {
        match self {
            Self::Rgb(_) => PixelFormat::Rgb8,
            Self::Gray(_) => PixelFormat::Gray8,
        }
    }

    /// RGB view of the pixel. Gray values are replicated across all three channels.
    pub const fn to_rgb(self) -> [u8; 3] {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Gray(v) => [v, v, v],
        }
    }
}

/// Owned 8-bit raster. Width and height are always at least 1 and
/// `data.len() == width * height * format.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a zero-filled raster.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> ToneResult<Self> {
        let len = buffer_len(width, height, format)?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![0; len],
        })
    }

    /// Allocate a raster with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> ToneResult<Self> {
        let format = pixel.format();
        let len = buffer_len(width, height, format)?;
        let data = match pixel {
            Pixel::Rgb(rgb) => rgb.iter().copied().cycle().take(len).collect(),
            Pixel::Gray(v) => vec![v; len],
        };
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Wrap existing interleaved bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> ToneResult<Self> {
        let len = buffer_len(width, height, format)?;
        if data.len() != len {
            return Err(ToneError::InvalidDimensions(format!(
                "expected {len} bytes for {width}x{height} {format}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Assemble a raster whose length was derived from an existing valid raster.
    pub(crate) fn from_parts(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * format.channels());
        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Total pixel count, `W·H`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Raw interleaved bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> ToneResult<Pixel> {
        let idx = self.index(x, y)?;
        Ok(match self.format {
            PixelFormat::Rgb8 => Pixel::Rgb([self.data[idx], self.data[idx + 1], self.data[idx + 2]]),
            PixelFormat::Gray8 => Pixel::Gray(self.data[idx]),
        })
    }

    /// Overwrite the pixel at `(x, y)`. The value must match the raster format.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> ToneResult<()> {
        if pixel.format() != self.format {
            return Err(ToneError::FormatMismatch {
                expected: self.format,
                actual: pixel.format(),
            });
        }
        let idx = self.index(x, y)?;
        match pixel {
            Pixel::Rgb(rgb) => self.data[idx..idx + 3].copy_from_slice(&rgb),
            Pixel::Gray(v) => self.data[idx] = v,
        }
        Ok(())
    }

    /// Compare two rasters pixel by pixel through their RGB view.
    ///
    /// A GRAY8 raster equals an RGB8 raster of the same size whose every pixel
    /// has `r == g == b` equal to the gray value.
    pub fn same_pixels(&self, other: &RasterBuffer) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        if self.format == other.format {
            return self.data == other.data;
        }
        self.rgb_pixels().eq(other.rgb_pixels())
    }

    /// Iterate all pixels in row-major order as RGB triples.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(self.channels()).map(|px| match px {
            [r, g, b] => [*r, *g, *b],
            [v] => [*v, *v, *v],
            _ => unreachable!("chunks_exact yields 1 or 3 channels"),
        })
    }

    fn index(&self, x: u32, y: u32) -> ToneResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(ToneError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * self.channels())
    }
}

fn buffer_len(width: u32, height: u32, format: PixelFormat) -> ToneResult<usize> {
    if width == 0 || height == 0 {
        return Err(ToneError::InvalidDimensions(format!(
            "raster must be at least 1x1, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(format.channels()))
        .ok_or_else(|| ToneError::InvalidDimensions("raster size overflows".into()))
}
