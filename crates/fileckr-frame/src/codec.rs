use std::io::{Read, Write};

use fileckr_dims::{nice_squarest_with, squarest, AspectBounds};
use tracing::debug;

use crate::canvas::{Canvas, Dimensions, CHANNELS};
use crate::error::{FrameError, Result};
use crate::header::{Header, HeaderLayout};
use crate::raster::Compression;
use crate::reader::FrameReader;
use crate::writer::FrameWriter;

/// How the canvas rectangle is chosen from the frame length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Closest factor pair of the pixel count, however thin.
    Exact,
    /// Closest pair within the bounds, growing the pixel count if needed.
    Nice(AspectBounds),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Nice(AspectBounds::default())
    }
}

/// Configuration for the frame codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    /// Header written before the payload. Default: size and mode.
    pub layout: HeaderLayout,
    /// Canvas sizing strategy. Default: nice, 10:1 ratio, 20 px short side.
    pub sizing: Sizing,
    /// PNG compression effort. Default: best.
    pub compression: Compression,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            layout: HeaderLayout::STANDARD,
            sizing: Sizing::default(),
            compression: Compression::Best,
        }
    }
}

impl FrameConfig {
    /// Size-and-mode header with bounded aspect ratio.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Size-only header with exact sizing, as written by early releases.
    pub fn legacy() -> Self {
        Self {
            layout: HeaderLayout::LENGTH_ONLY,
            sizing: Sizing::Exact,
            compression: Compression::Best,
        }
    }
}

/// Header plus payload length, in bytes.
pub fn frame_len(layout: &HeaderLayout, size: u64) -> Result<u64> {
    let header_len = layout.encoded_len() as u64;
    size.checked_add(header_len)
        .ok_or(FrameError::CanvasTooLarge { frame_len: u64::MAX })
}

/// Choose a canvas that holds `frame_len` bytes.
pub fn canvas_dimensions(frame_len: u64, sizing: &Sizing) -> Result<Dimensions> {
    let too_large = || FrameError::CanvasTooLarge { frame_len };

    let pixels = frame_len.div_ceil(CHANNELS as u64).max(1);
    let n = i64::try_from(pixels).map_err(|_| too_large())?;

    let (a, b) = match sizing {
        Sizing::Exact => squarest(n),
        Sizing::Nice(bounds) => nice_squarest_with(n, *bounds)?,
    };

    let width = u32::try_from(a).map_err(|_| too_large())?;
    let height = u32::try_from(b).map_err(|_| too_large())?;
    Ok(Dimensions::new(width, height))
}

/// Lay `header` and up to `header.size` bytes of `reader` onto a new canvas.
///
/// If `reader` ends early, the rest of the canvas stays zero.
pub fn encode_frame<R: Read>(reader: R, header: &Header, config: &FrameConfig) -> Result<Canvas> {
    let len = frame_len(&config.layout, header.size)?;
    let dims = canvas_dimensions(len, &config.sizing)?;
    debug!(
        size = header.size,
        frame_len = len,
        width = dims.width,
        height = dims.height,
        "chose canvas dimensions"
    );

    let mut writer = FrameWriter::new(Canvas::new(dims)?);
    writer.write_header(&config.layout, header)?;
    let copied = writer.write_payload(reader, header.size)?;
    if copied < header.size {
        debug!(declared = header.size, copied, "payload source ended early");
    }
    Ok(writer.finish())
}

/// Read the header and payload from `canvas`, writing the payload to `out`.
pub fn decode_frame<W: Write>(canvas: &Canvas, layout: &HeaderLayout, out: W) -> Result<Header> {
    FrameReader::new(layout).read_canvas(canvas, out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let payload = b"hello, fileckr!";
        let header = Header::new(payload.len() as u64, Some(0o600));
        let canvas =
            encode_frame(Cursor::new(payload), &header, &FrameConfig::default()).unwrap();

        let mut out = Vec::new();
        let decoded = decode_frame(&canvas, &HeaderLayout::STANDARD, &mut out).unwrap();

        assert_eq!(decoded, header);
        assert_eq!(out, payload);
    }

    #[test]
    fn test_frame_bytes_follow_wire_format() {
        let header = Header::new(3, Some(0o644));
        let canvas =
            encode_frame(Cursor::new(b"abc"), &header, &FrameConfig::default()).unwrap();

        let bytes = canvas.as_bytes();
        assert_eq!(&bytes[..8], &3u64.to_le_bytes());
        assert_eq!(&bytes[8..12], &0o644u32.to_le_bytes());
        assert_eq!(&bytes[12..15], b"abc");
        assert!(bytes[15..].iter().all(|&b| b == 0));
        assert_eq!(canvas.pixel(3, 0), Some([b'a', b'b', b'c', 0]));
    }

    #[test]
    fn test_standard_canvas_is_nice() {
        let dims = canvas_dimensions(12, &Sizing::default()).unwrap();
        assert_eq!(dims, Dimensions::new(20, 20));

        let dims = canvas_dimensions(12 + 1_000_000, &Sizing::default()).unwrap();
        assert!(dims.capacity() >= 1_000_012);
        assert!(dims.width >= 20 && dims.height / dims.width <= 10);
    }

    #[test]
    fn test_exact_canvas_is_minimal() {
        // 8 + 1 bytes -> 3 pixels -> 1 x 3
        assert_eq!(
            canvas_dimensions(9, &Sizing::Exact).unwrap(),
            Dimensions::new(1, 3)
        );
        assert_eq!(
            canvas_dimensions(8 + 112, &Sizing::Exact).unwrap(),
            Dimensions::new(5, 6)
        );
    }

    #[test]
    fn test_zero_length_frame_still_gets_a_pixel() {
        assert_eq!(
            canvas_dimensions(0, &Sizing::Exact).unwrap(),
            Dimensions::new(1, 1)
        );
    }

    #[test]
    fn test_short_source_is_zero_filled() {
        let header = Header::new(10, Some(0));
        let canvas =
            encode_frame(Cursor::new(b"abcd"), &header, &FrameConfig::default()).unwrap();

        assert_eq!(&canvas.as_bytes()[12..16], b"abcd");
        assert!(canvas.as_bytes()[16..].iter().all(|&b| b == 0));

        let mut out = Vec::new();
        decode_frame(&canvas, &HeaderLayout::STANDARD, &mut out).unwrap();
        assert_eq!(out, b"abcd\0\0\0\0\0\0");
    }

    #[test]
    fn test_long_source_is_cut_at_size() {
        let header = Header::new(2, Some(0));
        let canvas =
            encode_frame(Cursor::new(b"abcdef"), &header, &FrameConfig::default()).unwrap();

        assert_eq!(&canvas.as_bytes()[12..16], b"ab\0\0");
    }

    #[test]
    fn test_frame_len_overflow() {
        let err = frame_len(&HeaderLayout::STANDARD, u64::MAX).unwrap_err();
        assert!(matches!(err, FrameError::CanvasTooLarge { .. }));
    }

    #[test]
    fn test_canvas_too_large_for_u32_side() {
        // A prime pixel count well past u32::MAX yields a 1 x p rectangle.
        let err = canvas_dimensions(4 * 4_294_967_311, &Sizing::Exact).unwrap_err();
        assert!(matches!(err, FrameError::CanvasTooLarge { .. }));
    }
}
