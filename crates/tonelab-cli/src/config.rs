//! Runtime configuration for the CLI.

use tonelab_core::EncodeOptions;
use tonelab_core::codec::DEFAULT_JPEG_QUALITY;

/// Environment variable overriding the worker thread count.
pub const THREADS_VAR: &str = "TONELAB_THREADS";
/// Environment variable overriding the JPEG export quality.
pub const JPEG_QUALITY_VAR: &str = "TONELAB_JPEG_QUALITY";

/// Default worker thread count (0 = one per core).
const DEFAULT_THREADS: usize = 0;

/// Settings resolved from the environment, overridable by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Rayon worker threads. 0 leaves the global pool at its default size.
    pub threads: usize,
    /// JPEG quality, 1–100.
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl AppConfig {
    /// Build a config from an arbitrary variable lookup. Unparseable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            threads: lookup(THREADS_VAR)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_THREADS),
            jpeg_quality: lookup(JPEG_QUALITY_VAR)
                .and_then(|s| s.trim().parse::<u8>().ok())
                .filter(|q| (1..=100).contains(q))
                .unwrap_or(DEFAULT_JPEG_QUALITY),
        }
    }

    /// A non-zero `--threads` flag wins over the environment.
    pub fn with_threads(mut self, threads: usize) -> Self {
        if threads > 0 {
            self.threads = threads;
        }
        self
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.jpeg_quality,
        }
    }
}
