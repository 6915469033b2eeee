use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageFormat};

use crate::canvas::Canvas;
use crate::error::{FrameError, Result};

/// Serializes canvases to image bytes and back.
///
/// Implementations must keep every channel byte, the dimensions, and the
/// raster order intact, and must reject malformed input with an error.
pub trait ImageCodec {
    /// Serialize `canvas` into `dst`.
    fn write_canvas(&self, canvas: &Canvas, dst: &mut dyn Write) -> Result<()>;

    /// Parse image bytes into a canvas.
    fn read_canvas(&self, src: &[u8]) -> Result<Canvas>;
}

/// PNG compression effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    Fast,
    Default,
    #[default]
    Best,
}

impl From<Compression> for CompressionType {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Fast => CompressionType::Fast,
            Compression::Default => CompressionType::Default,
            Compression::Best => CompressionType::Best,
        }
    }
}

/// RGBA8 PNG through the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec {
    compression: Compression,
}

impl PngCodec {
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }
}

impl ImageCodec for PngCodec {
    fn write_canvas(&self, canvas: &Canvas, dst: &mut dyn Write) -> Result<()> {
        let encoder =
            PngEncoder::new_with_quality(dst, self.compression.into(), FilterType::Adaptive);
        encoder
            .write_image(
                canvas.as_bytes(),
                canvas.width(),
                canvas.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|err| match err {
                ImageError::IoError(io) => FrameError::Io(io),
                other => FrameError::Encode(other),
            })
    }

    fn read_canvas(&self, src: &[u8]) -> Result<Canvas> {
        let image = image::load_from_memory_with_format(src, ImageFormat::Png)
            .map_err(FrameError::Decode)?;

        match image {
            DynamicImage::ImageRgba8(buf) => {
                let (width, height) = buf.dimensions();
                Canvas::from_raw(width, height, buf.into_raw()).ok_or_else(|| {
                    FrameError::UnsupportedPixelFormat("RGBA8 buffer of unexpected length".into())
                })
            }
            other => Err(FrameError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            ))),
        }
    }
}
