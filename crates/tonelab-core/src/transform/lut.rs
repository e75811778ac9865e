//! 1D lookup tables over the 256 possible 8-bit channel values.

use crate::error::{ToneError, ToneResult};
use crate::image::RasterBuffer;
use crate::parallel;

/// Number of entries in an 8-bit LUT.
pub const LUT_SIZE: usize = 256;

/// A per-channel 8-bit lookup table. The same table is applied to every channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut1D {
    /// Output value for each input value.
    pub table: [u8; LUT_SIZE],
}

impl Lut1D {
    /// The identity map, `table[i] == i`.
    pub fn identity() -> Self {
        let mut table = [0u8; LUT_SIZE];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self { table }
    }

    /// Gamma LUT: `table[i] = round(255 × (i / 255)^(1 / gamma))`.
    ///
    /// `gamma == 1.0` returns the exact identity without going through `powf`.
    pub fn gamma(gamma: f64) -> ToneResult<Self> {
        validate_gamma(gamma)?;
        if gamma == 1.0 {
            return Ok(Self::identity());
        }

        let inv = 1.0 / gamma;
        let mut table = [0u8; LUT_SIZE];
        for (i, v) in table.iter_mut().enumerate() {
            let mapped = 255.0 * (i as f64 / 255.0).powf(inv);
            *v = mapped.round().clamp(0.0, 255.0) as u8;
        }
        Ok(Self { table })
    }

    /// Look up a single value.
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// True if every entry maps to itself.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }

    /// Map every channel of `src` through the table. The pixel format is kept.
    pub fn apply(&self, src: &RasterBuffer) -> RasterBuffer {
        parallel::map_channels(src, |_, v| self.map(v))
    }
}

/// Build the 256-entry gamma table as plain integers.
pub fn build_gamma_lut(gamma: f64) -> ToneResult<[u8; LUT_SIZE]> {
    Lut1D::gamma(gamma).map(|lut| lut.table)
}

/// Reject gamma values that cannot produce a valid power curve.
pub fn validate_gamma(gamma: f64) -> ToneResult<()> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(ToneError::InvalidParameter(format!(
            "gamma must be a finite value greater than 0, got {gamma}"
        )));
    }
    Ok(())
}
