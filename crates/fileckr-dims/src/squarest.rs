use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::bounds::AspectBounds;
use crate::error::{DimsError, Result};
use crate::factor::prime_factors;

/// The factor pair `(a, b)` of `n` with `a <= b` and the smallest `b - a`.
///
/// Returns `(0, 0)` for `n <= 0`. A prime `n` yields `(1, n)`.
pub fn squarest(n: i64) -> (i64, i64) {
    if n <= 0 {
        return (0, 0);
    }
    let (a, b) = squarest_u64(n as u64);
    // Both sides divide n, so they fit in i64.
    (a as i64, b as i64)
}

/// [`squarest`] constrained by [`AspectBounds::default`].
pub fn nice_squarest(n: i64) -> Result<(i64, i64)> {
    nice_squarest_with(n, AspectBounds::default())
}

/// The first `squarest(m)` for `m = n, n + 1, ...` that `bounds` admits.
///
/// Returns `(0, 0)` for `n <= 0`. The product of the returned pair may
/// exceed `n`; callers pad the difference.
pub fn nice_squarest_with(n: i64, bounds: AspectBounds) -> Result<(i64, i64)> {
    bounds.validate()?;
    if n <= 0 {
        return Ok((0, 0));
    }

    let start = n as u64;
    let limit = search_limit(start, bounds.min_side);

    let mut m = start;
    while m <= limit {
        let (a, b) = squarest_u64(m);
        if bounds.admits(a, b) {
            if m != start {
                debug!(
                    requested = start,
                    chosen = m,
                    a,
                    b,
                    "grew pixel count to fit aspect bounds"
                );
            }
            return Ok((a as i64, b as i64));
        }
        trace!(m, a, b, "pair rejected by aspect bounds");
        m += 1;
    }

    Err(DimsError::SearchExhausted { start, limit })
}

/// The first perfect square at or above `max(n, min_side^2)`, capped at
/// `i64::MAX`. Its root pair has ratio 1 and a side of at least `min_side`,
/// so every valid bound accepts it.
fn search_limit(n: u64, min_side: u64) -> u64 {
    let floor = n.max(min_side.saturating_mul(min_side));
    let root = floor.isqrt();
    let square = if root * root == floor {
        Some(floor)
    } else {
        (root + 1).checked_mul(root + 1)
    };
    square.unwrap_or(u64::MAX).min(i64::MAX as u64)
}

pub(crate) fn squarest_u64(n: u64) -> (u64, u64) {
    let root = n.isqrt();
    if root * root == n {
        return (root, root);
    }

    let mut candidates = BTreeSet::from([1u64]);
    for f in prime_factors(n) {
        let grown: Vec<u64> = candidates
            .iter()
            .filter_map(|c| c.checked_mul(f))
            .filter(|&c| c <= root)
            .collect();
        candidates.extend(grown);
    }

    let a = candidates.last().copied().unwrap_or(1);
    (a, n / a)
}
