use crate::error::{FrameError, Result};

/// Bytes per pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

/// Width and height of a canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Frame bytes the canvas can carry.
    pub fn capacity(&self) -> u64 {
        self.pixels() * CHANNELS as u64
    }
}

/// An RGBA8 raster, non-premultiplied, stored row-major.
///
/// Byte `k` of [`as_bytes`](Self::as_bytes) is channel `k % 4` of pixel
/// `(k / 4 % width, k / 4 / width)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    dims: Dimensions,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a transparent-black canvas.
    pub fn new(dims: Dimensions) -> Result<Self> {
        let len = usize::try_from(dims.capacity()).map_err(|_| FrameError::CanvasTooLarge {
            frame_len: dims.capacity(),
        })?;
        Ok(Self {
            dims,
            data: vec![0; len],
        })
    }

    /// Wrap an existing raster. Returns `None` if `data` does not hold
    /// exactly `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let dims = Dimensions::new(width, height);
        if data.len() as u64 != dims.capacity() {
            return None;
        }
        Some(Self { dims, data })
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn capacity(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; CHANNELS]> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        let idx = (y as usize * self.dims.width as usize + x as usize) * CHANNELS;
        self.data
            .get(idx..idx + CHANNELS)
            .and_then(|px| px.try_into().ok())
    }

    /// Pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }
}
