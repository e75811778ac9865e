//! Adjust command.
//!
//! Applies the reversible tone chain (gamma, brightness, contrast,
//! saturation) to the loaded image using slider positions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tonelab_core::SliderPositions;

use super::{open_editor, save_editor};
use crate::config::AppConfig;

/// Arguments for the `adjust` command.
#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (format from extension, JPEG when missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Brightness slider, -100..100
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<i32>,

    /// Contrast slider, -100..100
    #[arg(long, allow_hyphen_values = true)]
    pub contrast: Option<i32>,

    /// Saturation slider, -100..100
    #[arg(long, allow_hyphen_values = true)]
    pub saturation: Option<i32>,

    /// Gamma slider, 10..300 (100 = gamma 1.0)
    #[arg(long, allow_hyphen_values = true)]
    pub gamma_position: Option<i32>,

    /// JSON preset with slider positions; flags override its fields
    #[arg(long)]
    pub preset: Option<PathBuf>,
}

impl AdjustArgs {
    /// Slider positions from the preset (if any) with flag overrides applied.
    pub fn sliders(&self) -> Result<SliderPositions> {
        let mut sliders = match &self.preset {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read preset: {}", path.display()))?;
                SliderPositions::from_json(&text)
                    .with_context(|| format!("Invalid preset: {}", path.display()))?
            }
            None => SliderPositions::default(),
        };
        if let Some(v) = self.brightness {
            sliders.brightness = v;
        }
        if let Some(v) = self.contrast {
            sliders.contrast = v;
        }
        if let Some(v) = self.saturation {
            sliders.saturation = v;
        }
        if let Some(v) = self.gamma_position {
            sliders.gamma = v;
        }
        Ok(sliders)
    }
}

/// Run the adjust command.
pub fn run(args: AdjustArgs, config: &AppConfig) -> Result<()> {
    let sliders = args.sliders()?;
    let mut editor = open_editor(&args.input, config)?;

    tracing::info!(?sliders, "adjusting {}", args.input.display());
    editor.apply_sliders(&sliders)?;
    if !editor.is_modified() {
        tracing::warn!("adjustments left the image unchanged");
    }

    save_editor(&editor, &args.output)
}
