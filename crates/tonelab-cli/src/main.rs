//! tonelab: tone adjustments, corrections, and histograms from the command line.
//!
//! Every command loads one image into a `tonelab_core::Editor`, runs a single
//! operation, and either writes the result or prints a report.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::adjust::AdjustArgs;
use commands::correct::{CorrectArgs, GammaArgs};
use commands::histogram::HistogramArgs;
use commands::info::InfoArgs;
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "tonelab", version, about = "Raster tone and histogram toolkit")]
#[command(after_help = "EXAMPLES:
  tonelab info photo.jpg --json
  tonelab adjust photo.jpg -o out.png --brightness 20 --contrast 15
  tonelab adjust photo.jpg -o out.jpg --preset look.json --saturation -40
  tonelab gamma photo.jpg -o out.png --value 2.2
  tonelab histogram photo.jpg --channel red
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = TONELAB_THREADS or one per core)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print dimensions, format, and a gray summary
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply brightness, contrast, saturation, and gamma sliders
    #[command(visible_alias = "a")]
    Adjust(AdjustArgs),

    /// Convert to BT.601 grayscale
    Grayscale(CorrectArgs),

    /// Stretch each channel to the full 0..255 range
    Stretch(CorrectArgs),

    /// Apply a gamma curve
    Gamma(GammaArgs),

    /// Print histogram bins
    #[command(visible_alias = "h")]
    Histogram(HistogramArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::default().with_threads(cli.threads);
    tracing::debug!(?config, "resolved configuration");

    // Configure thread pool
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::Adjust(args) => commands::adjust::run(args, &config),
        Commands::Grayscale(args) => commands::correct::run_grayscale(args, &config),
        Commands::Stretch(args) => commands::correct::run_stretch(args, &config),
        Commands::Gamma(args) => commands::correct::run_gamma(args, &config),
        Commands::Histogram(args) => commands::histogram::run(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::histogram::ChannelArg;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_adjust_with_negative_sliders() {
        let cli = Cli::try_parse_from([
            "tonelab", "-v", "adjust", "in.png", "-o", "out.png", "--brightness", "-30",
            "--gamma-position", "150",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Adjust(args) = cli.command else {
            panic!("expected adjust");
        };
        assert_eq!(args.brightness, Some(-30));
        assert_eq!(args.gamma_position, Some(150));
        assert_eq!(args.contrast, None);
    }

    #[test]
    fn test_parse_histogram_channel() {
        let cli = Cli::try_parse_from(["tonelab", "histogram", "in.png", "--channel", "blue", "-j", "2"])
            .unwrap();
        assert_eq!(cli.threads, 2);
        let Commands::Histogram(args) = cli.command else {
            panic!("expected histogram");
        };
        assert_eq!(args.channel, Some(ChannelArg::Blue));
        assert!(!args.json);
    }

    #[test]
    fn test_negative_gamma_position_parses() {
        let cli = Cli::try_parse_from([
            "tonelab", "adjust", "in.png", "-o", "out.png", "--gamma-position", "-5",
        ])
        .unwrap();
        let Commands::Adjust(args) = cli.command else {
            panic!("expected adjust");
        };
        assert_eq!(args.gamma_position, Some(-5));
        assert_eq!(args.sliders().unwrap().to_params().gamma, 0.1);
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["tonelab", "stretch", "in.png"]).is_err());
        assert!(Cli::try_parse_from(["tonelab", "gamma", "in.png", "-o", "x.png"]).is_err());
    }
}
