//! Histogram command.
//!
//! Prints the occupied bins of one channel, or all four channels as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tonelab_core::Channel;

use super::open_editor;
use crate::config::AppConfig;

/// Channel names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    Red,
    Green,
    Blue,
    Gray,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Red => Channel::Red,
            ChannelArg::Green => Channel::Green,
            ChannelArg::Blue => Channel::Blue,
            ChannelArg::Gray => Channel::Gray,
        }
    }
}

/// Arguments for the `histogram` command.
#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// Input image
    pub input: PathBuf,

    /// Print as JSON (all channels unless --channel is given)
    #[arg(long)]
    pub json: bool,

    /// Channel to print
    #[arg(short, long, value_enum)]
    pub channel: Option<ChannelArg>,
}

/// Non-empty `(value, count)` pairs of a channel.
pub fn occupied_bins(bins: &[u64]) -> Vec<(usize, u64)> {
    bins.iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(v, &n)| (v, n))
        .collect()
}

/// Run the histogram command.
pub fn run(args: HistogramArgs, config: &AppConfig) -> Result<()> {
    let editor = open_editor(&args.input, config)?;
    let hist = editor.histogram()?;

    if args.json {
        let text = match args.channel {
            Some(channel) => serde_json::to_string(hist.channel(channel.into()))?,
            None => serde_json::to_string_pretty(&hist)?,
        };
        println!("{text}");
        return Ok(());
    }

    let channel: Channel = args.channel.unwrap_or(ChannelArg::Gray).into();
    tracing::debug!(?channel, total = hist.total(channel), "printing histogram");
    for (value, count) in occupied_bins(hist.channel(channel)) {
        println!("{value:>3} {count}");
    }
    Ok(())
}
