//! Canvas dimension selection for fileckr.
//!
//! Picks a width and height whose product is a given pixel count:
//! - [`squarest`] returns the factor pair closest to a square
//! - [`nice_squarest`] additionally bounds the aspect ratio and the short
//!   side, growing the pixel count until a pair qualifies
//!
//! Everything here is pure integer arithmetic with no shared state.

pub mod bounds;
pub mod error;
pub mod factor;
pub mod squarest;

pub use bounds::{AspectBounds, DEFAULT_MAX_RATIO, DEFAULT_MIN_SIDE};
pub use error::{DimsError, Result};
pub use factor::factor;
pub use squarest::{nice_squarest, nice_squarest_with, squarest};
