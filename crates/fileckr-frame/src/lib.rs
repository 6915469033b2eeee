//! Lossless byte framing inside the pixels of an RGBA8 PNG.
//!
//! A file is carried as a frame laid over the canvas in raster order:
//! - A fixed-width header (payload size, optionally the permission mode)
//! - The payload bytes
//! - Zero padding up to the canvas capacity
//!
//! Frame byte `k` lands in pixel `k / 4`, channel `k % 4`. Canvas dimensions
//! come from `fileckr-dims`; PNG serialization is delegated to the `image`
//! crate behind the [`ImageCodec`] trait.

pub mod canvas;
pub mod codec;
pub mod convert;
pub mod error;
pub mod file;
pub mod header;
pub mod raster;
pub mod reader;
pub mod writer;

pub use canvas::{Canvas, Dimensions, CHANNELS};
pub use codec::{canvas_dimensions, decode_frame, encode_frame, frame_len, FrameConfig, Sizing};
pub use convert::{
    decode, decode_to_vec, decode_with, encode, encode_to_vec, encode_with, inspect, FrameInfo,
};
pub use error::{ErrorKind, FrameError, Result};
pub use file::{apply_mode, decode_file, encode_file, file_mode};
pub use header::{Endianness, FieldKind, Header, HeaderField, HeaderLayout};
pub use raster::{Compression, ImageCodec, PngCodec};
pub use reader::{DecodeState, FrameReader};
pub use writer::FrameWriter;

pub use fileckr_dims::AspectBounds;
