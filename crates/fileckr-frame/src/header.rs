use std::borrow::Cow;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// What a header field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Payload length in bytes.
    Size,
    /// Permission bits of the source file.
    Mode,
}

/// Byte order of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// One fixed-width unsigned integer in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Width in bytes, 1 through 8.
    pub width: usize,
    pub endianness: Endianness,
}

impl HeaderField {
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        width: usize,
        endianness: Endianness,
    ) -> Self {
        Self {
            name,
            kind,
            width,
            endianness,
        }
    }

    fn max_value(&self) -> u64 {
        if self.width >= 8 {
            u64::MAX
        } else {
            (1u64 << (self.width * 8)) - 1
        }
    }
}

const STANDARD_FIELDS: [HeaderField; 2] = [
    HeaderField::new("size", FieldKind::Size, 8, Endianness::Little),
    HeaderField::new("mode", FieldKind::Mode, 4, Endianness::Little),
];

const LENGTH_ONLY_FIELDS: [HeaderField; 1] = [HeaderField::new(
    "size",
    FieldKind::Size,
    8,
    Endianness::Little,
)];

/// Decoded header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Payload length in bytes.
    pub size: u64,
    /// Permission bits, when the layout carries them.
    pub mode: Option<u32>,
}

impl Header {
    pub fn new(size: u64, mode: Option<u32>) -> Self {
        Self { size, mode }
    }
}

/// Ordered list of header fields at the start of every frame.
///
/// Standard layout:
/// ```text
/// ┌──────────────────┬──────────────┬─────────────────┐
/// │ Size (8B LE)     │ Mode (4B LE) │ Payload ...     │
/// └──────────────────┴──────────────┴─────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    fields: Cow<'static, [HeaderField]>,
}

impl HeaderLayout {
    /// Payload size and permission mode: 12 bytes.
    pub const STANDARD: HeaderLayout = HeaderLayout {
        fields: Cow::Borrowed(&STANDARD_FIELDS),
    };

    /// Payload size only: 8 bytes. Written by early releases.
    pub const LENGTH_ONLY: HeaderLayout = HeaderLayout {
        fields: Cow::Borrowed(&LENGTH_ONLY_FIELDS),
    };

    /// Build a custom layout.
    ///
    /// Requires exactly one size field, at most one mode field, widths in
    /// `1..=8`, and a mode width of at most 4.
    pub fn new(fields: Vec<HeaderField>) -> Result<Self> {
        let sizes = fields.iter().filter(|f| f.kind == FieldKind::Size).count();
        let modes = fields.iter().filter(|f| f.kind == FieldKind::Mode).count();

        if sizes != 1 {
            return Err(FrameError::InvalidLayout("exactly one size field required"));
        }
        if modes > 1 {
            return Err(FrameError::InvalidLayout("at most one mode field allowed"));
        }
        if fields.iter().any(|f| f.width == 0 || f.width > 8) {
            return Err(FrameError::InvalidLayout("field width must be 1..=8 bytes"));
        }
        if fields
            .iter()
            .any(|f| f.kind == FieldKind::Mode && f.width > 4)
        {
            return Err(FrameError::InvalidLayout("mode field is at most 4 bytes"));
        }

        Ok(Self {
            fields: Cow::Owned(fields),
        })
    }

    pub fn fields(&self) -> &[HeaderField] {
        &self.fields
    }

    /// Total header width in bytes.
    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    pub fn has_mode(&self) -> bool {
        self.fields.iter().any(|f| f.kind == FieldKind::Mode)
    }

    /// Append the encoded header to `dst`.
    ///
    /// A missing mode is written as zero; a mode is dropped when the layout
    /// has no mode field.
    pub fn encode(&self, header: &Header, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(self.encoded_len());
        for field in self.fields.iter() {
            let value = match field.kind {
                FieldKind::Size => header.size,
                FieldKind::Mode => u64::from(header.mode.unwrap_or(0)),
            };
            if value > field.max_value() {
                return Err(FrameError::FieldOverflow {
                    field: field.name,
                    value,
                    width: field.width,
                });
            }
            match field.endianness {
                Endianness::Little => dst.put_uint_le(value, field.width),
                Endianness::Big => dst.put_uint(value, field.width),
            }
        }
        Ok(())
    }

    /// Parse a header from the first [`encoded_len`](Self::encoded_len) bytes of `src`.
    pub fn decode(&self, mut src: &[u8]) -> Result<Header> {
        let needed = self.encoded_len();
        if src.len() < needed {
            return Err(FrameError::IncompleteHeader {
                needed,
                available: src.len() as u64,
            });
        }

        let mut header = Header::default();
        for field in self.fields.iter() {
            let value = match field.endianness {
                Endianness::Little => src.get_uint_le(field.width),
                Endianness::Big => src.get_uint(field.width),
            };
            match field.kind {
                FieldKind::Size => header.size = value,
                // Mode fields are at most 4 bytes wide.
                FieldKind::Mode => header.mode = Some(value as u32),
            }
        }
        Ok(header)
    }
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}
