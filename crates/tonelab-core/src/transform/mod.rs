//! Transform building blocks: lookup tables and adjustment parameters.

pub mod lut;
pub mod params;
