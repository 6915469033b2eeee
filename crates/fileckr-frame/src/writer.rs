use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::canvas::Canvas;
use crate::error::{FrameError, Result};
use crate::header::{Header, HeaderLayout};

/// Writes a frame onto a canvas, front to back.
///
/// Bytes are placed at a cursor that only moves forward. Anything the
/// writer never reaches keeps its initial value, zero for [`Canvas::new`].
pub struct FrameWriter {
    canvas: Canvas,
    cursor: usize,
}

impl FrameWriter {
    /// Start writing at the first byte of `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas, cursor: 0 }
    }

    /// Encode and write `header` at the cursor.
    pub fn write_header(&mut self, layout: &HeaderLayout, header: &Header) -> Result<()> {
        let mut buf = BytesMut::with_capacity(layout.encoded_len());
        layout.encode(header, &mut buf)?;

        let available = self.remaining();
        let dst = self
            .canvas
            .as_bytes_mut()
            .get_mut(self.cursor..self.cursor + buf.len())
            .ok_or(FrameError::IncompleteHeader {
                needed: buf.len(),
                available: available as u64,
            })?;
        dst.copy_from_slice(&buf);
        self.cursor += buf.len();
        Ok(())
    }

    /// Copy up to `size` bytes from `reader` to the cursor.
    ///
    /// Stops early without error on a clean end of input; returns the number
    /// of bytes copied.
    pub fn write_payload<R: Read>(&mut self, reader: R, size: u64) -> Result<u64> {
        let available = self.remaining();
        let want = match usize::try_from(size) {
            Ok(want) if want <= available => want,
            _ => {
                return Err(FrameError::Truncated {
                    declared: size,
                    available: available as u64,
                })
            }
        };

        let start = self.cursor;
        let dst = &mut self.canvas.as_bytes_mut()[start..start + want];
        let mut reader = reader.take(size);
        let mut filled = 0usize;
        while filled < dst.len() {
            match reader.read(&mut dst[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.cursor += filled;
        Ok(filled as u64)
    }

    /// Bytes between the cursor and the end of the canvas.
    pub fn remaining(&self) -> usize {
        self.canvas.as_bytes().len() - self.cursor
    }

    /// Current write offset in frame bytes.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Consume the writer and return the canvas.
    pub fn finish(self) -> Canvas {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;
    use crate::canvas::Dimensions;

    struct OneByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for OneByteReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"))
        }
    }

    struct InterruptOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(Dimensions::new(width, height)).unwrap()
    }

    #[test]
    fn write_header_then_payload() {
        let mut writer = FrameWriter::new(canvas(2, 2));
        writer
            .write_header(&HeaderLayout::LENGTH_ONLY, &Header::new(5, None))
            .unwrap();
        let copied = writer.write_payload(Cursor::new(b"hello"), 5).unwrap();

        assert_eq!(copied, 5);
        assert_eq!(writer.position(), 13);
        let canvas = writer.finish();
        assert_eq!(&canvas.as_bytes()[..8], &5u64.to_le_bytes());
        assert_eq!(&canvas.as_bytes()[8..13], b"hello");
        assert_eq!(&canvas.as_bytes()[13..], &[0, 0, 0]);
    }

    #[test]
    fn partial_reads_are_accumulated() {
        let mut writer = FrameWriter::new(canvas(2, 2));
        let reader = OneByteReader {
            bytes: b"slowly".to_vec(),
            pos: 0,
        };
        let copied = writer.write_payload(reader, 6).unwrap();
        assert_eq!(copied, 6);
        assert_eq!(&writer.finish().as_bytes()[..6], b"slowly");
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut writer = FrameWriter::new(canvas(1, 1));
        let reader = InterruptOnce {
            interrupted: false,
            inner: Cursor::new(b"abcd".to_vec()),
        };
        assert_eq!(writer.write_payload(reader, 4).unwrap(), 4);
    }

    #[test]
    fn early_eof_is_not_an_error() {
        let mut writer = FrameWriter::new(canvas(2, 2));
        let copied = writer.write_payload(Cursor::new(b"ab"), 10).unwrap();
        assert_eq!(copied, 2);
        assert!(writer.finish().as_bytes()[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn read_error_is_surfaced() {
        let mut writer = FrameWriter::new(canvas(1, 1));
        let err = writer.write_payload(FailingReader, 4).unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
    }

    #[test]
    fn payload_larger_than_canvas_is_rejected() {
        let mut writer = FrameWriter::new(canvas(1, 1));
        let err = writer.write_payload(Cursor::new(b"abcde"), 5).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Truncated {
                declared: 5,
                available: 4
            }
        ));
    }

    #[test]
    fn header_larger_than_canvas_is_rejected() {
        let mut writer = FrameWriter::new(canvas(1, 1));
        let err = writer
            .write_header(&HeaderLayout::STANDARD, &Header::new(0, Some(0)))
            .unwrap_err();
        assert!(matches!(err, FrameError::IncompleteHeader { needed: 12, .. }));
    }
}
