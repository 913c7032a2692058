//! Sturm sequences and real root counting.

use crate::algorithms::gcd::poly_div_rem;
use crate::int_poly::{from_rational_poly, to_rational_poly, IntPoly};

/// Builds the Sturm sequence `p, p', -rem(p, p'), ...`.
///
/// Each remainder is replaced by its primitive integer part, which only
/// rescales by a positive constant and keeps coefficients small.
#[must_use]
pub fn sturm_sequence(p: &IntPoly) -> Vec<IntPoly> {
    let mut seq = vec![p.clone()];
    if p.degree() == 0 {
        return seq;
    }
    seq.push(from_rational_poly(&to_rational_poly(&p.derivative())));

    loop {
        let n = seq.len();
        let (_, rem) = poly_div_rem(&to_rational_poly(&seq[n - 2]), &to_rational_poly(&seq[n - 1]));
        if rem.is_zero() {
            break;
        }
        seq.push(from_rational_poly(&rem.neg()));
    }
    seq
}

fn sign_changes(signs: impl Iterator<Item = i8>) -> usize {
    let mut count = 0;
    let mut last = 0i8;
    for s in signs.filter(|&s| s != 0) {
        if last != 0 && s != last {
            count += 1;
        }
        last = s;
    }
    count
}

fn changes_at_infinity(seq: &[IntPoly], positive: bool) -> usize {
    sign_changes(seq.iter().map(|q| {
        let s = q.leading_coeff().0.signum();
        if positive || q.degree() % 2 == 0 {
            s
        } else {
            -s
        }
    }))
}

/// Counts the distinct real roots of `p`.
#[must_use]
pub fn count_real_roots(p: &IntPoly) -> usize {
    if p.degree() == 0 {
        return 0;
    }
    let seq = sturm_sequence(p);
    changes_at_infinity(&seq, false) - changes_at_infinity(&seq, true)
}
