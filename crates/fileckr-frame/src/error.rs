use fileckr_dims::DimsError;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An I/O error occurred while reading the payload or writing output.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The canvas could not be serialized to an image.
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),

    /// The input bytes are not a valid image.
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),

    /// The image decoded, but not as 8-bit RGBA.
    #[error("unsupported pixel format {0} (expected 8-bit RGBA)")]
    UnsupportedPixelFormat(String),

    /// The declared payload size exceeds what the canvas carries.
    #[error("truncated frame (declared {declared} payload bytes, canvas holds {available})")]
    Truncated { declared: u64, available: u64 },

    /// The canvas is too small to hold even the header.
    #[error("incomplete header (need {needed} bytes, canvas holds {available})")]
    IncompleteHeader { needed: usize, available: u64 },

    /// No canvas can hold a frame of this length.
    #[error("payload too large ({frame_len} frame bytes exceed canvas limits)")]
    CanvasTooLarge { frame_len: u64 },

    /// The header layout is malformed.
    #[error("invalid header layout: {0}")]
    InvalidLayout(&'static str),

    /// A header value does not fit in its field.
    #[error("header field {field} cannot hold {value} in {width} bytes")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        width: usize,
    },

    /// Canvas dimensions could not be chosen.
    #[error("canvas sizing failed: {0}")]
    Dims(#[from] DimsError),
}

/// Coarse classification of a [`FrameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or writing an underlying stream failed.
    Io,
    /// The input is not a valid image in the required pixel format.
    Format,
    /// The declared size exceeds the data actually present.
    Truncated,
    /// The codec was configured with values it cannot honor.
    Config,
}

impl FrameError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::Io(_) | FrameError::Encode(_) => ErrorKind::Io,
            FrameError::Decode(_) | FrameError::UnsupportedPixelFormat(_) => ErrorKind::Format,
            FrameError::Truncated { .. } | FrameError::IncompleteHeader { .. } => {
                ErrorKind::Truncated
            }
            FrameError::CanvasTooLarge { .. }
            | FrameError::InvalidLayout(_)
            | FrameError::FieldOverflow { .. }
            | FrameError::Dims(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
