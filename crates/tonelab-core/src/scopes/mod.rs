//! Scopes computed from the current raster.

pub mod histogram;

pub use histogram::{Channel, HistogramData};
