use crate::error::{DimsError, Result};

/// Default upper bound on `long_side / short_side` (integer division).
pub const DEFAULT_MAX_RATIO: u64 = 10;

/// Default lower bound on the short side, in pixels.
pub const DEFAULT_MIN_SIDE: u64 = 20;

/// Shape constraints applied by [`nice_squarest_with`](crate::nice_squarest_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectBounds {
    /// Largest accepted `b / a` for a pair `(a, b)`, using integer division.
    pub max_ratio: u64,
    /// Smallest accepted short side `a`.
    pub min_side: u64,
}

impl Default for AspectBounds {
    fn default() -> Self {
        Self {
            max_ratio: DEFAULT_MAX_RATIO,
            min_side: DEFAULT_MIN_SIDE,
        }
    }
}

impl AspectBounds {
    /// Create bounds with explicit limits.
    pub fn new(max_ratio: u64, min_side: u64) -> Self {
        Self {
            max_ratio,
            min_side,
        }
    }

    /// Reject bounds that no rectangle can satisfy.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.max_ratio == 0 {
            "max_ratio must be at least 1"
        } else if self.min_side == 0 {
            "min_side must be at least 1"
        } else if self.min_side > i64::MAX.isqrt() as u64 {
            "min_side squared must fit in an i64"
        } else {
            return Ok(());
        };

        Err(DimsError::InvalidBounds {
            max_ratio: self.max_ratio,
            min_side: self.min_side,
            reason,
        })
    }

    /// Whether the pair `(a, b)` with `a <= b` satisfies both limits.
    pub fn admits(&self, a: u64, b: u64) -> bool {
        a > 0 && a >= self.min_side && b / a <= self.max_ratio
    }
}
