//! One-shot correction commands: grayscale, stretch, and gamma.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tonelab_core::parse_gamma;

use super::{open_editor, save_editor};
use crate::config::AppConfig;

/// Arguments shared by `grayscale` and `stretch`.
#[derive(Args, Debug)]
pub struct CorrectArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (format from extension, JPEG when missing)
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `gamma` command.
#[derive(Args, Debug)]
pub struct GammaArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (format from extension, JPEG when missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Gamma value, e.g. 2.2
    #[arg(long)]
    pub value: String,
}

/// Run the grayscale command.
pub fn run_grayscale(args: CorrectArgs, config: &AppConfig) -> Result<()> {
    let mut editor = open_editor(&args.input, config)?;
    editor.convert_to_grayscale()?;
    save_editor(&editor, &args.output)
}

/// Run the stretch command.
pub fn run_stretch(args: CorrectArgs, config: &AppConfig) -> Result<()> {
    let mut editor = open_editor(&args.input, config)?;
    editor.linear_stretch()?;
    if !editor.is_modified() {
        tracing::info!("image already spans the full range");
    }
    save_editor(&editor, &args.output)
}

/// Run the gamma command.
pub fn run_gamma(args: GammaArgs, config: &AppConfig) -> Result<()> {
    // Reject bad input before touching the file system.
    let gamma = parse_gamma(&args.value)?;
    let mut editor = open_editor(&args.input, config)?;
    editor.gamma_correction(gamma)?;
    save_editor(&editor, &args.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonelab_core::codec::{self, ExportFormat};
    use tonelab_core::{Pixel, PixelFormat, RasterBuffer};

    fn write_input(dir: &std::path::Path) -> PathBuf {
        let mut img = RasterBuffer::new(2, 2, PixelFormat::Rgb8).unwrap();
        img.set_pixel(0, 0, Pixel::Rgb([0, 0, 0])).unwrap();
        img.set_pixel(1, 0, Pixel::Rgb([255, 255, 255])).unwrap();
        img.set_pixel(0, 1, Pixel::Rgb([128, 128, 128])).unwrap();
        img.set_pixel(1, 1, Pixel::Rgb([64, 64, 64])).unwrap();
        let path = dir.join("in.png");
        codec::save(&img, &path, ExportFormat::Png, &Default::default()).unwrap();
        path
    }

    #[test]
    fn test_gamma_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("out.png");
        let args = GammaArgs {
            input,
            output: output.clone(),
            value: "2.2".into(),
        };
        run_gamma(args, &AppConfig::from_lookup(|_| None)).unwrap();

        let saved = codec::load(&output).unwrap();
        assert_eq!(saved.pixel(0, 1).unwrap(), Pixel::Rgb([186, 186, 186]));
    }

    #[test]
    fn test_gamma_rejects_garbage_value() {
        let dir = tempfile::tempdir().unwrap();
        let args = GammaArgs {
            input: dir.path().join("missing.png"),
            output: dir.path().join("out.png"),
            value: "abc".into(),
        };
        assert!(run_gamma(args, &AppConfig::from_lookup(|_| None)).is_err());
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn test_grayscale_writes_gray_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("gray.png");
        let args = CorrectArgs {
            input,
            output: output.clone(),
        };
        run_grayscale(args, &AppConfig::from_lookup(|_| None)).unwrap();
        assert_eq!(codec::load(&output).unwrap().format(), PixelFormat::Gray8);
    }
}
