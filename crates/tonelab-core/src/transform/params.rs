//! Tonal adjustment parameters and the mapping from UI slider positions.
//!
//! `AdjustmentParams` is the single source of truth for the reversible
//! adjustments. Sliders write `SliderPositions`; the session converts them
//! here before re-running the tone chain.

use serde::{Deserialize, Serialize};

use crate::error::{ToneError, ToneResult};
use crate::transform::lut::validate_gamma;

/// Range of the brightness, contrast, and saturation sliders.
pub const SLIDER_MIN: i32 = -100;
/// Upper end of the brightness, contrast, and saturation sliders.
pub const SLIDER_MAX: i32 = 100;
/// Lowest gamma slider position (gamma 0.1).
pub const GAMMA_POSITION_MIN: i32 = 10;
/// Highest gamma slider position (gamma 3.0).
pub const GAMMA_POSITION_MAX: i32 = 300;
/// Gamma slider position for gamma 1.0.
pub const GAMMA_POSITION_IDENTITY: i32 = 100;

/// Reversible tone adjustments, applied to a copy of the original raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Additive brightness in `[-1, 1]`, scaled by 255. 0.0 = neutral.
    pub brightness: f32,
    /// Contrast multiplier around 128 in `[0, 2]`. 1.0 = neutral.
    pub contrast: f32,
    /// Saturation multiplier around the channel mean in `[0, 2]`. 1.0 = neutral.
    pub saturation: f32,
    /// Gamma exponent, `> 0`. 1.0 = neutral.
    pub gamma: f64,
}

impl Default for AdjustmentParams {
    /// Produces an identity (no-op) adjustment.
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            gamma: 1.0,
        }
    }
}

impl AdjustmentParams {
    /// True when applying these parameters leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Check that every field lies inside its documented range.
    pub fn validate(&self) -> ToneResult<()> {
        check_range("brightness", self.brightness, -1.0, 1.0)?;
        check_range("contrast", self.contrast, 0.0, 2.0)?;
        check_range("saturation", self.saturation, 0.0, 2.0)?;
        validate_gamma(self.gamma)
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> ToneResult<()> {
    if !(min..=max).contains(&value) {
        return Err(ToneError::InvalidParameter(format!(
            "{name} must be within [{min}, {max}], got {value}"
        )));
    }
    Ok(())
}

/// Raw slider positions as a UI (or a preset file) reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderPositions {
    /// `[-100, 100]`, 0 = neutral.
    pub brightness: i32,
    /// `[-100, 100]`, 0 = neutral.
    pub contrast: i32,
    /// `[-100, 100]`, 0 = neutral.
    pub saturation: i32,
    /// `[10, 300]`, 100 = neutral.
    pub gamma: i32,
}

impl Default for SliderPositions {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            saturation: 0,
            gamma: GAMMA_POSITION_IDENTITY,
        }
    }
}

impl SliderPositions {
    /// Convert to parameters. Out-of-range positions are clamped.
    pub fn to_params(&self) -> AdjustmentParams {
        AdjustmentParams {
            brightness: brightness_from_slider(self.brightness),
            contrast: contrast_from_slider(self.contrast),
            saturation: saturation_from_slider(self.saturation),
            gamma: gamma_from_position(self.gamma),
        }
    }

    /// Parse a JSON preset. Missing fields fall back to neutral positions.
    pub fn from_json(text: &str) -> ToneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// `value / 100`, with `value` clamped to `[-100, 100]`.
pub fn brightness_from_slider(value: i32) -> f32 {
    clamp_slider(value) as f32 / 100.0
}

/// `value / 100 + 1`, with `value` clamped to `[-100, 100]`.
pub fn contrast_from_slider(value: i32) -> f32 {
    clamp_slider(value) as f32 / 100.0 + 1.0
}

/// `value / 100 + 1`, with `value` clamped to `[-100, 100]`.
pub fn saturation_from_slider(value: i32) -> f32 {
    clamp_slider(value) as f32 / 100.0 + 1.0
}

/// `position / 100`, with `position` clamped to `[10, 300]`.
pub fn gamma_from_position(position: i32) -> f64 {
    position.clamp(GAMMA_POSITION_MIN, GAMMA_POSITION_MAX) as f64 / 100.0
}

fn clamp_slider(value: i32) -> i32 {
    value.clamp(SLIDER_MIN, SLIDER_MAX)
}

/// Parse a gamma value typed by the user.
pub fn parse_gamma(input: &str) -> ToneResult<f64> {
    let trimmed = input.trim();
    let gamma: f64 = trimmed.parse().map_err(|_| {
        ToneError::InvalidParameter(format!("gamma must be a number, got {trimmed:?}"))
    })?;
    validate_gamma(gamma)?;
    Ok(gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert!(AdjustmentParams::default().is_identity());
        assert_eq!(SliderPositions::default().to_params(), AdjustmentParams::default());
    }

    #[test]
    fn test_slider_mapping() {
        assert_eq!(brightness_from_slider(-100), -1.0);
        assert_eq!(brightness_from_slider(50), 0.5);
        assert_eq!(contrast_from_slider(-100), 0.0);
        assert_eq!(contrast_from_slider(100), 2.0);
        assert_eq!(saturation_from_slider(0), 1.0);
        assert_eq!(gamma_from_position(10), 0.1);
        assert_eq!(gamma_from_position(300), 3.0);
    }

    #[test]
    fn test_slider_out_of_range_is_clamped() {
        assert_eq!(brightness_from_slider(250), 1.0);
        assert_eq!(contrast_from_slider(-500), 0.0);
        assert_eq!(gamma_from_position(0), 0.1);
        assert_eq!(gamma_from_position(1000), 3.0);
    }

    #[test]
    fn test_parse_gamma() {
        assert_eq!(parse_gamma(" 2.2 ").unwrap(), 2.2);
        assert!(matches!(parse_gamma("abc"), Err(ToneError::InvalidParameter(_))));
        assert!(matches!(parse_gamma("0"), Err(ToneError::InvalidParameter(_))));
        assert!(matches!(parse_gamma("-1.5"), Err(ToneError::InvalidParameter(_))));
        assert!(matches!(parse_gamma("NaN"), Err(ToneError::InvalidParameter(_))));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(AdjustmentParams::default().validate().is_ok());
        let bad = AdjustmentParams {
            contrast: 2.5,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ToneError::InvalidParameter(_))));
    }

    #[test]
    fn test_preset_missing_fields_default() {
        let sliders = SliderPositions::from_json(r#"{ "brightness": 20, "gamma": 150 }"#).unwrap();
        assert_eq!(sliders.brightness, 20);
        assert_eq!(sliders.contrast, 0);
        assert_eq!(sliders.gamma, 150);
        assert!(matches!(
            SliderPositions::from_json("{ not json"),
            Err(ToneError::Preset(_))
        ));
    }
}
