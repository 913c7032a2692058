//! Polynomials with integer coefficients.
//!
//! Minimal polynomials are kept as primitive integer polynomials with a
//! positive leading coefficient. The helpers here move between `Z[x]` and
//! `Q[x]` and perform the root transformations (shift, scale) that have
//! exact integer formulas.

use qbar_integers::{Integer, Rational};
use qbar_rings::traits::Ring;
use qbar_rings::{Q, Z};

use crate::algorithms::gcd::{poly_div_rem, primitive_part};
use crate::algorithms::squarefree;
use crate::dense::DensePoly;

/// A univariate polynomial over the integers.
pub type IntPoly = DensePoly<Z>;

/// Embeds an integer polynomial into `Q[x]`.
#[must_use]
pub fn to_rational_poly(p: &IntPoly) -> DensePoly<Q> {
    p.map_coeffs(|c| Q::from_big(c.0.clone()))
}

/// Clears denominators and removes the content.
///
/// The result is a positive rational multiple of `p`, so signs of values
/// are preserved.
#[must_use]
pub fn from_rational_poly(p: &DensePoly<Q>) -> IntPoly {
    let lcm = p
        .coeffs()
        .iter()
        .fold(Integer::from(1i64), |acc, c| acc.lcm(&c.0.denominator()));
    let scaled = p.map_coeffs(|c| {
        let value = &c.0 * &Rational::from_integer(lcm.clone());
        Z(value.numerator())
    });
    primitive_part(&scaled)
}

/// Returns the primitive part with a positive leading coefficient.
#[must_use]
pub fn normalize(p: &IntPoly) -> IntPoly {
    let prim = primitive_part(p);
    if prim.leading_coeff().0.is_negative() {
        prim.neg()
    } else {
        prim
    }
}

/// Divides `a` by `b` over the integers, returning `None` if the division
/// is not exact.
///
/// # Panics
///
/// Panics if `b` is zero.
#[must_use]
pub fn exact_quotient(a: &IntPoly, b: &IntPoly) -> Option<IntPoly> {
    let (q, r) = poly_div_rem(&to_rational_poly(a), &to_rational_poly(b));
    if !r.is_zero() || !q.coeffs().iter().all(|c| c.0.is_integer()) {
        return None;
    }
    Some(q.map_coeffs(|c| Z(c.0.numerator())))
}

/// Returns the normalized polynomial whose roots are those of `p` plus `r`,
/// that is `v^n · p(x - u/v)` for `r = u/v`.
#[must_use]
pub fn shift_roots(p: &IntPoly, r: &Rational) -> IntPoly {
    let u = Z(r.numerator());
    let v = Z(r.denominator());
    let n = p.degree();
    let linear = DensePoly::new(vec![-u, v.clone()]);

    let mut acc = DensePoly::constant(p.leading_coeff().clone());
    for (i, a) in p.coeffs().iter().enumerate().rev().skip(1) {
        let v_pow = v.pow(u32::try_from(n - i).unwrap_or(u32::MAX));
        acc = acc
            .mul(&linear)
            .add(&DensePoly::constant(a.clone() * v_pow));
    }
    normalize(&acc)
}

/// Returns the normalized polynomial whose roots are those of `p`
/// multiplied by `r`, that is `u^n · p(v x / u)` for `r = u/v`.
///
/// # Panics
///
/// Panics if `r` is zero.
#[must_use]
pub fn scale_roots(p: &IntPoly, r: &Rational) -> IntPoly {
    assert!(r.signum() != 0, "cannot scale roots by zero");
    let u = Z(r.numerator());
    let v = Z(r.denominator());
    let n = p.degree();
    let coeffs = p
        .coeffs()
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let up = u32::try_from(i).unwrap_or(u32::MAX);
            let rest = u32::try_from(n - i).unwrap_or(u32::MAX);
            a.clone() * v.pow(up) * u.pow(rest)
        })
        .collect();
    normalize(&DensePoly::new(coeffs))
}

/// Returns the largest absolute value of a coefficient.
#[must_use]
pub fn height(p: &IntPoly) -> Integer {
    p.coeffs()
        .iter()
        .map(|c| c.0.abs())
        .max()
        .unwrap_or_else(|| Integer::from(0i64))
}

/// Returns the bit length of the height.
#[must_use]
pub fn height_bits(p: &IntPoly) -> usize {
    height(p).bit_len()
}

/// Returns the sum of squares of the coefficients.
#[must_use]
pub fn norm2_squared(p: &IntPoly) -> Integer {
    p.coeffs()
        .iter()
        .fold(Integer::from(0i64), |acc, c| acc + &c.0 * &c.0)
}

/// Returns the normalized squarefree part of `p`.
#[must_use]
pub fn squarefree_part(p: &IntPoly) -> IntPoly {
    if p.degree() == 0 {
        return IntPoly::one();
    }
    let decomposition = squarefree::squarefree_decomposition(&to_rational_poly(p));
    normalize(&from_rational_poly(&decomposition.squarefree_part()))
}
