//! Polynomial division and GCD.
//!
//! Field-coefficient routines (`poly_div_rem`, `poly_gcd`) work over `Q`;
//! `content` and `primitive_part` work over any Euclidean domain and are
//! used over `Z`.

use qbar_rings::traits::{EuclideanDomain, Field};

use crate::dense::DensePoly;

fn inverse_of_lead<F: Field>(p: &DensePoly<F>) -> F {
    match p.leading_coeff().inv() {
        Some(inv) => inv,
        None => panic!("leading coefficient of a nonzero polynomial must be invertible"),
    }
}

/// Computes the monic GCD of two polynomials over a field.
#[must_use]
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let (_, r) = poly_div_rem(&p, &q);
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Divides `a` by `b`, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn poly_div_rem<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> (DensePoly<F>, DensePoly<F>) {
    assert!(!b.is_zero(), "division by zero polynomial");

    if a.degree() < b.degree() || a.is_zero() {
        return (DensePoly::zero(), a.clone());
    }

    let b_lead_inv = inverse_of_lead(b);
    let b_len = b.coeffs().len();
    let mut quotient = vec![F::zero(); a.degree() - b.degree() + 1];
    let mut remainder = a.coeffs().to_vec();

    while remainder.len() >= b_len {
        let deg_diff = remainder.len() - b_len;
        let top = remainder[remainder.len() - 1].clone();
        if !top.is_zero() {
            let coeff = top * b_lead_inv.clone();
            for (i, bc) in b.coeffs().iter().enumerate() {
                remainder[deg_diff + i] =
                    remainder[deg_diff + i].clone() - coeff.clone() * bc.clone();
            }
            quotient[deg_diff] = coeff;
        }
        remainder.pop();
    }

    (DensePoly::new(quotient), DensePoly::new(remainder))
}

/// Makes a polynomial monic (leading coefficient = 1).
#[must_use]
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    if p.is_zero() {
        return p.clone();
    }
    p.scale(&inverse_of_lead(p))
}

/// Computes the content of a polynomial (GCD of all coefficients).
///
/// Over `Z` the result is nonnegative, since the fold starts at zero and
/// `gcd(0, c) = |c|`; the zero polynomial has content zero.
#[must_use]
pub fn content<R: EuclideanDomain>(p: &DensePoly<R>) -> R {
    p.coeffs().iter().fold(R::zero(), |acc, c| acc.gcd(c))
}

/// Computes the primitive part of a polynomial (divided by its content).
#[must_use]
pub fn primitive_part<R: EuclideanDomain>(p: &DensePoly<R>) -> DensePoly<R> {
    let c = content(p);
    if c.is_zero() || c.is_one() {
        return p.clone();
    }
    DensePoly::new(p.coeffs().iter().map(|x| x.div(&c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_rings::{Q, Z};

    #[test]
    fn test_poly_div_rem() {
        // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
        let a = DensePoly::<Q>::from_i64s(&[1, 2, 1]);
        let b = DensePoly::<Q>::from_i64s(&[1, 1]);
        let (q, r) = poly_div_rem(&a, &b);
        assert_eq!(q, b);
        assert!(r.is_zero());

        // (x^3 + 1) / (x^2) = x, remainder 1
        let (q, r) = poly_div_rem(
            &DensePoly::<Q>::from_i64s(&[1, 0, 0, 1]),
            &DensePoly::from_i64s(&[0, 0, 1]),
        );
        assert_eq!(q, DensePoly::x());
        assert_eq!(r, DensePoly::one());
    }

    #[test]
    fn test_poly_gcd() {
        // gcd(x^2 - 1, x^2 - 2x + 1) = x - 1
        let a = DensePoly::<Q>::from_i64s(&[-1, 0, 1]);
        let b = DensePoly::<Q>::from_i64s(&[1, -2, 1]);
        assert_eq!(poly_gcd(&a, &b), DensePoly::from_i64s(&[-1, 1]));
    }

    #[test]
    fn test_content_and_primitive_part() {
        let p = DensePoly::<Z>::from_i64s(&[6, -4, 2]);
        assert_eq!(content(&p), Z::new(2));
        assert_eq!(primitive_part(&p), DensePoly::from_i64s(&[3, -2, 1]));
    }

    #[test]
    fn test_content_of_a_constant_keeps_its_sign() {
        let p = DensePoly::<Z>::from_i64s(&[-1]);
        assert_eq!(content(&p), Z::new(1));
        assert_eq!(primitive_part(&p), p);
        assert_eq!(primitive_part(&DensePoly::<Z>::from_i64s(&[-6])), DensePoly::from_i64s(&[-1]));
    }

    #[test]
    fn test_content_skips_zero_coefficients() {
        // x^5 - 2
        let p = DensePoly::<Z>::from_i64s(&[-2, 0, 0, 0, 0, 1]);
        assert_eq!(content(&p), Z::new(1));
        let q = DensePoly::<Z>::from_i64s(&[0, 0, -4, 0, 6]);
        assert_eq!(content(&q), Z::new(2));
        assert_eq!(content(&DensePoly::<Z>::zero()), Z::new(0));
    }
}
