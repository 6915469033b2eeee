/// Prime factors of `n` in non-decreasing order.
///
/// A negative `n` yields a leading `-1` followed by the factors of `|n|`.
/// `0` and `1` have no factors.
pub fn factor(n: i64) -> Vec<i64> {
    if n == 0 {
        return Vec::new();
    }

    let mut factors = Vec::new();
    if n < 0 {
        factors.push(-1);
    }

    // Every prime factor of |i64::MIN| is 2, so all of them fit back into i64.
    factors.extend(prime_factors(n.unsigned_abs()).into_iter().map(|p| p as i64));
    factors
}

/// Trial division: strip out 2, then odd divisors while `i * i <= n`.
pub(crate) fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n == 0 {
        return factors;
    }

    while n % 2 == 0 {
        factors.push(2);
        n /= 2;
    }

    let mut i = 3u64;
    while i <= n / i {
        while n % i == 0 {
            factors.push(i);
            n /= i;
        }
        i += 2;
    }

    if n > 1 {
        factors.push(n);
    }

    factors
}
