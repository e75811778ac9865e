//! Container decode/encode at the edge of the pipeline, via the `image` crate.
//!
//! Gray and gray-alpha sources decode to GRAY8; every other color type is
//! converted to RGB8. Alpha is dropped.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{ToneError, ToneResult};
use crate::image::{PixelFormat, RasterBuffer};

/// Default JPEG quality used on export.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Containers the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ExportFormat {
    /// Match a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Pick the format from a path's extension, falling back to JPEG.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(Self::Jpeg)
    }

    /// Canonical file extension.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }

    /// Append this format's extension unless the path already carries one
    /// that maps to the same format.
    pub fn ensure_extension(self, path: &Path) -> PathBuf {
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            == Some(self);
        if matches {
            return path.to_path_buf();
        }
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, 1–100.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Decode an in-memory container into a raster.
pub fn decode(bytes: &[u8]) -> ToneResult<RasterBuffer> {
    let img = image::load_from_memory(bytes).map_err(|err| match err {
        image::ImageError::Unsupported(e) => ToneError::UnsupportedFormat(e.to_string()),
        other => ToneError::Decode(other),
    })?;
    let (format, width, height, data) = if img.color().has_color() {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        (PixelFormat::Rgb8, w, h, rgb.into_raw())
    } else {
        let luma = img.to_luma8();
        let (w, h) = luma.dimensions();
        (PixelFormat::Gray8, w, h, luma.into_raw())
    };
    tracing::debug!("decoded {}x{} {} ({:?} source)", width, height, format, img.color());
    RasterBuffer::from_raw(width, height, format, data)
}

/// Encode a raster with default options.
pub fn encode(raster: &RasterBuffer, format: ExportFormat) -> ToneResult<Vec<u8>> {
    encode_with(raster, format, &EncodeOptions::default())
}

/// Encode a raster into the given container.
pub fn encode_with(
    raster: &RasterBuffer,
    format: ExportFormat,
    options: &EncodeOptions,
) -> ToneResult<Vec<u8>> {
    let color = match raster.format() {
        PixelFormat::Rgb8 => ExtendedColorType::Rgb8,
        PixelFormat::Gray8 => ExtendedColorType::L8,
    };
    let (w, h, data) = (raster.width(), raster.height(), raster.as_bytes());

    let mut out = Cursor::new(Vec::new());
    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut out).write_image(data, w, h, color),
        ExportFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut out, quality).write_image(data, w, h, color)
        }
        ExportFormat::Bmp => BmpEncoder::new(&mut out).write_image(data, w, h, color),
    };
    result.map_err(ToneError::Encode)?;
    Ok(out.into_inner())
}

/// Read and decode an image file.
pub fn load(path: &Path) -> ToneResult<RasterBuffer> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encode and write an image file.
pub fn save(
    raster: &RasterBuffer,
    path: &Path,
    format: ExportFormat,
    options: &EncodeOptions,
) -> ToneResult<()> {
    let bytes = encode_with(raster, format, options)?;
    std::fs::write(path, &bytes)?;
    tracing::info!("saved {} ({:?}, {} bytes)", path.display(), format, bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    fn gradient() -> RasterBuffer {
        let data: Vec<u8> = (0..8u32 * 4 * 3).map(|i| (i * 11 % 256) as u8).collect();
        RasterBuffer::from_raw(8, 4, PixelFormat::Rgb8, data).unwrap()
    }

    #[test]
    fn test_png_is_lossless() {
        let src = gradient();
        let bytes = encode(&src, ExportFormat::Png).unwrap();
        assert_eq!(decode(&bytes).unwrap(), src);
    }

    #[test]
    fn test_gray_survives_bmp_and_png() {
        let src = RasterBuffer::filled(5, 5, Pixel::Gray(200)).unwrap();
        let png = decode(&encode(&src, ExportFormat::Png).unwrap()).unwrap();
        assert_eq!(png, src);
        let bmp = decode(&encode(&src, ExportFormat::Bmp).unwrap()).unwrap();
        assert!(bmp.same_pixels(&src));
    }

    #[test]
    fn test_jpeg_keeps_dimensions() {
        let src = gradient();
        let out = decode(&encode(&src, ExportFormat::Jpeg).unwrap()).unwrap();
        assert_eq!((out.width(), out.height()), (8, 4));
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(ToneError::UnsupportedFormat(_))
        ));
        assert!(matches!(decode(&[]), Err(ToneError::UnsupportedFormat(_))));

        let png = encode(&gradient(), ExportFormat::Png).unwrap();
        assert!(matches!(decode(&png[..png.len() / 2]), Err(ToneError::Decode(_))));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("PNG"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_extension("jpeg"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("tif"), None);
        assert_eq!(ExportFormat::from_path(Path::new("a/b.bmp")), ExportFormat::Bmp);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), ExportFormat::Jpeg);
    }

    #[test]
    fn test_ensure_extension() {
        let fmt = ExportFormat::Png;
        assert_eq!(fmt.ensure_extension(Path::new("out.png")), PathBuf::from("out.png"));
        assert_eq!(fmt.ensure_extension(Path::new("out.PNG")), PathBuf::from("out.PNG"));
        assert_eq!(fmt.ensure_extension(Path::new("out")), PathBuf::from("out.png"));
        assert_eq!(
            ExportFormat::Jpeg.ensure_extension(Path::new("shot.png")),
            PathBuf::from("shot.png.jpg")
        );
    }
}
