//! Error taxonomy shared by every tonelab operation.

/// Errors produced by raster access, transforms, state transitions, and the codec.
#[derive(Debug, thiserror::Error)]
pub enum ToneError {
    #[error("no image loaded")]
    NoImageLoaded,
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("pixel format mismatch: expected {expected}, got {actual}")]
    FormatMismatch {
        expected: crate::image::PixelFormat,
        actual: crate::image::PixelFormat,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid preset: {0}")]
    Preset(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type ToneResult<T> = Result<T, ToneError>;
