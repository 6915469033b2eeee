use std::io::{Read, Write};

use tracing::debug;

use crate::canvas::Dimensions;
use crate::codec::{decode_frame, encode_frame, FrameConfig};
use crate::error::Result;
use crate::header::{Header, HeaderLayout};
use crate::raster::{ImageCodec, PngCodec};

/// Header and canvas facts read from an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub dimensions: Dimensions,
    /// Frame bytes the canvas carries.
    pub capacity: u64,
    pub header_len: usize,
    pub header: Header,
    /// Whether the declared size fits in the canvas after the header.
    pub fits: bool,
}

/// Encode `size` bytes from `reader` and `mode` as a PNG written to `writer`.
///
/// Returns the header as it was written; `mode` is `None` when the
/// configured layout does not carry it.
pub fn encode<R: Read, W: Write>(
    reader: R,
    size: u64,
    mode: u32,
    writer: W,
    config: &FrameConfig,
) -> Result<Header> {
    encode_with(&PngCodec::new(config.compression), reader, size, mode, writer, config)
}

/// [`encode`] through an explicit image codec.
pub fn encode_with<C: ImageCodec, R: Read, W: Write>(
    codec: &C,
    reader: R,
    size: u64,
    mode: u32,
    mut writer: W,
    config: &FrameConfig,
) -> Result<Header> {
    let header = Header::new(size, config.layout.has_mode().then_some(mode));
    let canvas = encode_frame(reader, &header, config)?;
    codec.write_canvas(&canvas, &mut writer)?;
    writer.flush()?;
    Ok(header)
}

/// Encode an in-memory payload to PNG bytes.
pub fn encode_to_vec(payload: &[u8], mode: u32, config: &FrameConfig) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    encode(payload, payload.len() as u64, mode, &mut png, config)?;
    Ok(png)
}

/// Decode PNG bytes, writing the payload to `writer`.
pub fn decode<W: Write>(image: &[u8], writer: W, layout: &HeaderLayout) -> Result<Header> {
    decode_with(&PngCodec::default(), image, writer, layout)
}

/// [`decode`] through an explicit image codec.
pub fn decode_with<C: ImageCodec, W: Write>(
    codec: &C,
    image: &[u8],
    writer: W,
    layout: &HeaderLayout,
) -> Result<Header> {
    let canvas = codec.read_canvas(image)?;
    debug!(
        width = canvas.width(),
        height = canvas.height(),
        "decoded canvas"
    );
    decode_frame(&canvas, layout, writer)
}

/// Decode PNG bytes into the payload and header.
pub fn decode_to_vec(image: &[u8], layout: &HeaderLayout) -> Result<(Vec<u8>, Header)> {
    let mut out = Vec::new();
    let header = decode(image, &mut out, layout)?;
    Ok((out, header))
}

/// Read only the header of an encoded image.
pub fn inspect(image: &[u8], layout: &HeaderLayout) -> Result<FrameInfo> {
    let canvas = PngCodec::default().read_canvas(image)?;
    let header = layout.decode(canvas.as_bytes())?;
    let header_len = layout.encoded_len();
    let fits = header.size <= canvas.capacity() - header_len as u64;

    Ok(FrameInfo {
        dimensions: canvas.dimensions(),
        capacity: canvas.capacity(),
        header_len,
        header,
        fits,
    })
}
