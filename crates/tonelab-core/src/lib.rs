//! Tonelab Core: pixel-transform and histogram engine.
//!
//! This crate contains the raster type, tone adjustments, one-shot
//! corrections, histogram scopes, and the original-vs-current image state.
//! No UI or framework dependencies; container I/O goes through the `image` crate.

pub mod codec;
pub mod error;
pub mod grading;
pub mod image;
pub mod parallel;
pub mod scopes;
pub mod session;
pub mod state;
pub mod transform;

// Re-exports for convenience.
pub use codec::{EncodeOptions, ExportFormat};
pub use error::{ToneError, ToneResult};
pub use crate::image::{Pixel, PixelFormat, RasterBuffer};
pub use scopes::histogram::{Channel, HistogramData};
pub use session::{Editor, SharedEditor};
pub use state::{ImageState, ListenerId, Phase};
pub use transform::lut::{Lut1D, build_gamma_lut};
pub use transform::params::{AdjustmentParams, SliderPositions, parse_gamma};
