//! Info command.
//!
//! Prints dimensions, pixel format, and a gray-channel summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tonelab_core::{Channel, Editor};

use super::open_editor;
use crate::config::AppConfig;

/// Arguments for the `info` command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input image
    pub input: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary printed by `info`.
#[derive(Debug, Serialize, PartialEq)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub gray_min: Option<u8>,
    pub gray_max: Option<u8>,
    pub gray_mean: f64,
    pub peak: u64,
}

impl ImageSummary {
    pub fn from_editor(editor: &Editor) -> Result<Self> {
        let hist = editor.histogram()?;
        let current = editor
            .current()
            .ok_or(tonelab_core::ToneError::NoImageLoaded)?;
        let range = hist.occupied_range(Channel::Gray);
        Ok(Self {
            width: current.width(),
            height: current.height(),
            format: current.format().to_string(),
            gray_min: range.map(|(lo, _)| lo),
            gray_max: range.map(|(_, hi)| hi),
            gray_mean: hist.mean(Channel::Gray),
            peak: hist.peak,
        })
    }
}

/// Run the info command.
pub fn run(args: InfoArgs, config: &AppConfig) -> Result<()> {
    let editor = open_editor(&args.input, config)?;
    let summary = ImageSummary::from_editor(&editor)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", args.input.display());
    println!("  Size:   {}x{}", summary.width, summary.height);
    println!("  Format: {}", summary.format);
    if let (Some(lo), Some(hi)) = (summary.gray_min, summary.gray_max) {
        println!("  Gray:   {lo}..{hi} (mean {:.2})", summary.gray_mean);
    }
    println!("  Peak:   {}", summary.peak);
    Ok(())
}
