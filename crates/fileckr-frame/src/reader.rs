use std::io::Write;

use tracing::{trace, warn};

use crate::canvas::{Canvas, CHANNELS};
use crate::error::{FrameError, Result};
use crate::header::{Header, HeaderLayout};

/// Where the reader is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Collecting bytes of header field `field`.
    ReadingHeader { field: usize },
    /// Emitting payload; `remaining` bytes still to go.
    ReadingPayload { remaining: u64 },
    /// The declared payload has been emitted. Terminal.
    Done,
}

/// Decodes a frame from canvas bytes fed in raster order.
///
/// Transitions run strictly header field by header field, then payload, then
/// [`DecodeState::Done`]. Once done, further input is ignored.
pub struct FrameReader<'a> {
    layout: &'a HeaderLayout,
    state: DecodeState,
    header_buf: Vec<u8>,
    header: Option<Header>,
}

impl<'a> FrameReader<'a> {
    pub fn new(layout: &'a HeaderLayout) -> Self {
        Self {
            layout,
            state: DecodeState::ReadingHeader { field: 0 },
            header_buf: Vec::with_capacity(layout.encoded_len()),
            header: None,
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// The header, once every header field has been read.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.state == DecodeState::Done
    }

    /// Feed the next bytes of the frame, writing payload bytes to `out`.
    ///
    /// Returns how many input bytes were consumed; fewer than `bytes.len()`
    /// only once the reader is done.
    pub fn feed<W: Write>(&mut self, mut bytes: &[u8], out: &mut W) -> Result<usize> {
        let total = bytes.len();
        while !bytes.is_empty() {
            match self.state {
                DecodeState::ReadingHeader { field } => {
                    let field_end: usize = self.layout.fields()[..=field]
                        .iter()
                        .map(|f| f.width)
                        .sum();
                    let take = (field_end - self.header_buf.len()).min(bytes.len());
                    self.header_buf.extend_from_slice(&bytes[..take]);
                    bytes = &bytes[take..];

                    if self.header_buf.len() == field_end {
                        self.finish_field(field)?;
                    }
                }
                DecodeState::ReadingPayload { remaining } => {
                    let take = usize::try_from(remaining)
                        .unwrap_or(usize::MAX)
                        .min(bytes.len());
                    out.write_all(&bytes[..take])?;
                    bytes = &bytes[take..];

                    let remaining = remaining - take as u64;
                    self.state = if remaining == 0 {
                        trace!("payload complete");
                        DecodeState::Done
                    } else {
                        DecodeState::ReadingPayload { remaining }
                    };
                }
                DecodeState::Done => break,
            }
        }
        Ok(total - bytes.len())
    }

    fn finish_field(&mut self, field: usize) -> Result<()> {
        if field + 1 < self.layout.fields().len() {
            trace!(field = self.layout.fields()[field].name, "header field read");
            self.state = DecodeState::ReadingHeader { field: field + 1 };
            return Ok(());
        }

        let header = self.layout.decode(&self.header_buf)?;
        trace!(size = header.size, mode = ?header.mode, "header read");
        self.header = Some(header);
        self.state = if header.size == 0 {
            DecodeState::Done
        } else {
            DecodeState::ReadingPayload {
                remaining: header.size,
            }
        };
        Ok(())
    }

    /// Decode `canvas` in raster order, writing the payload to `out`.
    ///
    /// Fails with [`FrameError::Truncated`] before writing any payload when
    /// the declared size exceeds what the canvas carries after the header.
    pub fn read_canvas<W: Write>(mut self, canvas: &Canvas, mut out: W) -> Result<Header> {
        let header_len = self.layout.encoded_len();
        if canvas.capacity() < header_len as u64 {
            return Err(FrameError::IncompleteHeader {
                needed: header_len,
                available: canvas.capacity(),
            });
        }

        let (head, body) = canvas.as_bytes().split_at(header_len);
        self.feed(head, &mut out)?;
        let header = self.header.ok_or(FrameError::IncompleteHeader {
            needed: header_len,
            available: canvas.capacity(),
        })?;

        let available = body.len() as u64;
        if header.size > available {
            warn!(
                declared = header.size,
                available, "declared size exceeds canvas capacity"
            );
            return Err(FrameError::Truncated {
                declared: header.size,
                available,
            });
        }

        // Finish the pixel the header ended in, then walk whole pixels.
        let lead = ((CHANNELS - header_len % CHANNELS) % CHANNELS).min(body.len());
        let (partial, rest) = body.split_at(lead);
        self.feed(partial, &mut out)?;
        for pixel in rest.chunks_exact(CHANNELS) {
            if self.is_done() {
                break;
            }
            self.feed(pixel, &mut out)?;
        }

        match self.state {
            DecodeState::Done => {
                out.flush()?;
                Ok(header)
            }
            DecodeState::ReadingPayload { remaining } => Err(FrameError::Truncated {
                declared: header.size,
                available: header.size - remaining,
            }),
            DecodeState::ReadingHeader { .. } => Err(FrameError::IncompleteHeader {
                needed: header_len,
                available: canvas.capacity(),
            }),
        }
    }
}
