//! Classical integer polynomial families.
//!
//! - Cyclotomic polynomials `Φ_n`
//! - Chebyshev polynomials of the first kind `T_n`
//! - The tangent multiple-angle polynomials `Im((1 + i t)^q)`

use rustc_hash::FxHashMap;

use qbar_integers::Integer;
use qbar_rings::Z;

use crate::int_poly::{exact_quotient, IntPoly};

/// Returns the positive divisors of `n` in increasing order.
#[must_use]
pub fn divisors(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            small.push(d);
            if d * d != n {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// Euler's totient function.
#[must_use]
pub fn euler_phi(n: u64) -> u64 {
    let mut result = n;
    let mut m = n;
    let mut p = 2;
    while p * p <= m {
        if m % p == 0 {
            while m % p == 0 {
                m /= p;
            }
            result -= result / p;
        }
        p += 1;
    }
    if m > 1 {
        result -= result / m;
    }
    result
}

/// Returns the `n`-th cyclotomic polynomial.
///
/// Computed from `x^n - 1 = ∏_{d | n} Φ_d`, memoizing the divisors.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
pub fn cyclotomic(n: u64) -> IntPoly {
    assert!(n > 0, "cyclotomic index must be positive");
    let mut memo = FxHashMap::default();
    cyclotomic_memo(n, &mut memo)
}

fn cyclotomic_memo(n: u64, memo: &mut FxHashMap<u64, IntPoly>) -> IntPoly {
    if let Some(p) = memo.get(&n) {
        return p.clone();
    }

    let degree = usize::try_from(n).unwrap_or(usize::MAX);
    let mut result = IntPoly::monomial(Z::new(1), degree).sub(&IntPoly::one());
    for d in divisors(n) {
        if d == n {
            break;
        }
        let factor = cyclotomic_memo(d, memo);
        result = match exact_quotient(&result, &factor) {
            Some(q) => q,
            None => unreachable!("Φ_d divides x^n - 1 for every d | n"),
        };
    }

    memo.insert(n, result.clone());
    result
}

/// Returns the Chebyshev polynomial `T_n`, with `T_n(cos θ) = cos(nθ)`.
#[must_use]
pub fn chebyshev_t(n: usize) -> IntPoly {
    let mut prev = IntPoly::one();
    if n == 0 {
        return prev;
    }
    let mut curr = IntPoly::x();
    let two_x = IntPoly::from_i64s(&[0, 2]);
    for _ in 1..n {
        let next = two_x.mul(&curr).sub(&prev);
        prev = curr;
        curr = next;
    }
    curr
}

/// Returns `Im((1 + i t)^q) = Σ_{k odd} C(q, k) (-1)^{(k-1)/2} t^k`.
///
/// Its roots are `tan(kπ/q)` for `k = 0..q` (omitting the pole when `q` is
/// even).
#[must_use]
pub fn tangent_polynomial(q: usize) -> IntPoly {
    let mut coeffs = vec![Z::new(0); q + 1];
    let mut binom = Integer::from(1i64);
    for k in 0..=q {
        if k % 2 == 1 {
            let value = if (k / 2) % 2 == 0 {
                binom.clone()
            } else {
                -binom.clone()
            };
            coeffs[k] = Z(value);
        }
        // C(q, k+1) = C(q, k) (q - k) / (k + 1)
        binom = binom * Integer::from((q - k) as u64) / Integer::from((k + 1) as u64);
    }
    IntPoly::new(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisors_and_phi() {
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(euler_phi(1), 1);
        assert_eq!(euler_phi(12), 4);
        assert_eq!(euler_phi(7), 6);
    }

    #[test]
    fn test_cyclotomic() {
        assert_eq!(cyclotomic(1), IntPoly::from_i64s(&[-1, 1]));
        assert_eq!(cyclotomic(2), IntPoly::from_i64s(&[1, 1]));
        assert_eq!(cyclotomic(4), IntPoly::from_i64s(&[1, 0, 1]));
        assert_eq!(cyclotomic(6), IntPoly::from_i64s(&[1, -1, 1]));
        assert_eq!(cyclotomic(12), IntPoly::from_i64s(&[1, 0, -1, 0, 1]));
        assert_eq!(cyclotomic(15).degree(), 8);
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(chebyshev_t(0), IntPoly::one());
        assert_eq!(chebyshev_t(2), IntPoly::from_i64s(&[-1, 0, 2]));
        assert_eq!(chebyshev_t(3), IntPoly::from_i64s(&[0, -3, 0, 4]));
    }

    #[test]
    fn test_tangent_polynomial() {
        // Im((1 + it)^3) = 3t - t^3
        assert_eq!(tangent_polynomial(3), IntPoly::from_i64s(&[0, 3, 0, -1]));
        // Im((1 + it)^4) = 4t - 4t^3
        assert_eq!(tangent_polynomial(4), IntPoly::from_i64s(&[0, 4, 0, -4]));
    }
}
