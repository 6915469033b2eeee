//! Store any file losslessly in the pixels of a PNG.
//!
//! fileckr frames a file's bytes, length, and permission mode and lays them
//! over an RGBA8 canvas whose shape is chosen to be nearly square.
//!
//! # Crate Structure
//!
//! - [`dims`] — Canvas dimension selection (`squarest`, `nice_squarest`)
//! - [`frame`] — Header layouts, frame codec, PNG boundary, file helpers
//!
//! ```no_run
//! use fileckr::frame::{decode_to_vec, encode_to_vec, FrameConfig, HeaderLayout};
//!
//! let png = encode_to_vec(b"hello", 0o644, &FrameConfig::default())?;
//! let (payload, header) = decode_to_vec(&png, &HeaderLayout::STANDARD)?;
//! assert_eq!(payload, b"hello");
//! assert_eq!(header.mode, Some(0o644));
//! # Ok::<(), fileckr::frame::FrameError>(())
//! ```

/// Re-export dimension types.
pub mod dims {
    pub use fileckr_dims::*;
}

/// Re-export frame types.
pub mod frame {
    pub use fileckr_frame::*;
}

pub use fileckr_frame::{decode, decode_file, encode, encode_file, FrameConfig, FrameError};
