//! Hensel lifting for polynomial factorization.
//!
//! Lifts a factorization `f ≡ lc(f) · g₁ ⋯ g_r (mod p)` into monic
//! factors modulo `p^k`. Each factor is lifted independently against its
//! cofactor with linear lifting, one power of `p` per step, so the factors
//! are processed in parallel.

use rayon::prelude::*;

use qbar_integers::{Integer, PrimeField};
use qbar_poly::IntPoly;
use qbar_rings::Z;

use crate::error::{FactorError, Result};
use crate::modp::{self, ModPoly};

/// Result of Hensel lifting.
#[derive(Clone, Debug)]
pub struct HenselLiftResult {
    /// The lifted monic factors, coefficients in `[0, p^k)`.
    pub factors: Vec<IntPoly>,
    /// The prime used.
    pub prime: u64,
    /// The final modulus `p^k`.
    pub modulus: Integer,
    /// The exponent `k`.
    pub exponent: u32,
}

/// Nonnegative residue of `a` modulo `m > 0`.
#[must_use]
pub fn mod_floor(a: &Integer, m: &Integer) -> Integer {
    a - &(m * &a.floor_div(m))
}

/// Inverse of `a` modulo `m`, if it exists.
#[must_use]
pub fn inverse_mod(a: &Integer, m: &Integer) -> Option<Integer> {
    let mut old_r = mod_floor(a, m);
    let mut r = m.clone();
    let mut old_s = Integer::new(1);
    let mut s = Integer::new(0);

    while !num_traits::Zero::is_zero(&r) {
        let q = old_r.floor_div(&r);
        let next_r = &old_r - &(&q * &r);
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &(&q * &s);
        old_s = std::mem::replace(&mut s, next_s);
    }

    if old_r == Integer::new(1) {
        Some(mod_floor(&old_s, m))
    } else {
        None
    }
}

/// Reduces every coefficient into `[0, m)`.
#[must_use]
pub fn reduce_coeffs(p: &IntPoly, m: &Integer) -> IntPoly {
    IntPoly::new(p.coeffs().iter().map(|c| Z(mod_floor(&c.0, m))).collect())
}

/// Lifts residues in `[0, p)` to an integer polynomial.
fn lift_residues(a: &[u64]) -> IntPoly {
    IntPoly::new(a.iter().map(|&c| Z(Integer::from(c))).collect())
}

/// Lifts monic modular factors of `f` to modulus `p^k`.
///
/// # Errors
///
/// Fails if `p` divides the leading coefficient of `f` or the factors are
/// not pairwise coprime modulo `p`.
pub fn hensel_lift(
    f: &IntPoly,
    factors_mod_p: &[ModPoly],
    field: PrimeField,
    k: u32,
) -> Result<HenselLiftResult> {
    let p = Integer::from(field.modulus());
    let modulus = p.pow(k);

    let lead_inv = inverse_mod(&f.leading_coeff().0, &modulus).ok_or(FactorError::LeadingCoefficientVanishes {
        prime: field.modulus(),
    })?;
    let monic = reduce_coeffs(&f.scale(&Z(lead_inv)), &modulus);

    let factors = (0..factors_mod_p.len())
        .into_par_iter()
        .map(|i| {
            let cofactor = factors_mod_p
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(vec![1u64], |acc, (_, g)| modp::mul(&acc, g, field));
            lift_pair(&monic, &factors_mod_p[i], &cofactor, field, k)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(HenselLiftResult {
        factors,
        prime: field.modulus(),
        modulus,
        exponent: k,
    })
}

/// Lifts `f ≡ g · h (mod p)` with `f` monic modulo `p^k`, returning the
/// lift of `g`.
fn lift_pair(f: &IntPoly, g: &[u64], h: &[u64], field: PrimeField, k: u32) -> Result<IntPoly> {
    let (unit, _, t) = modp::extended_gcd(g, h, field);
    if unit != [1u64] {
        return Err(FactorError::FactorsNotCoprime {
            prime: field.modulus(),
        });
    }

    let p = Integer::from(field.modulus());
    let mut big_g = lift_residues(g);
    let mut big_h = lift_residues(h);
    let mut p_m = p.clone();

    for _ in 1..k {
        let diff = f.sub(&big_g.mul(&big_h));
        let e: Vec<u64> = modp::trim(
            diff.coeffs()
                .iter()
                .map(|c| field.reduce_integer(&(&c.0 / &p_m)))
                .collect(),
        );

        // e ≡ τ h + σ g with deg τ < deg g
        let tau = modp::rem(&modp::mul(&e, &t, field), g, field);
        let sigma = modp::div_rem(&modp::sub(&e, &modp::mul(&tau, h, field), field), g, field).0;

        let step = Z(p_m.clone());
        big_g = big_g.add(&lift_residues(&tau).scale(&step));
        big_h = big_h.add(&lift_residues(&sigma).scale(&step));
        p_m = &p_m * &p;
    }

    Ok(big_g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_mod() {
        let m = Integer::new(25);
        let inv = inverse_mod(&Integer::new(3), &m);
        assert_eq!(inv, Some(Integer::new(17)));
        assert_eq!(inverse_mod(&Integer::new(5), &m), None);
        assert_eq!(mod_floor(&Integer::new(-3), &m), Integer::new(22));
    }

    #[test]
    fn test_lift_square_root_of_two_mod_seven() {
        // x^2 - 2 = (x - 3)(x + 3) mod 7
        let field = PrimeField::new(7);
        let f = IntPoly::from_i64s(&[-2, 0, 1]);
        let result = hensel_lift(&f, &[vec![4, 1], vec![3, 1]], field, 4).unwrap();
        let m = Integer::new(2401);
        assert_eq!(result.modulus, m);

        let product = reduce_coeffs(&result.factors[0].mul(&result.factors[1]), &m);
        assert_eq!(product, reduce_coeffs(&f, &m));
        // the root r of the first factor satisfies r^2 = 2 mod 7^4
        let r = mod_floor(&-result.factors[0].coeff(0).0, &m);
        assert_eq!(mod_floor(&(&r * &r), &m), Integer::new(2));
    }

    #[test]
    fn test_lift_non_monic() {
        // 2x^2 - 1 = 2 (x - 2)(x + 2) mod 7 since 2 * 4 = 1
        let field = PrimeField::new(7);
        let f = IntPoly::from_i64s(&[-1, 0, 2]);
        let result = hensel_lift(&f, &[vec![5, 1], vec![2, 1]], field, 3).unwrap();
        let m = Integer::new(343);
        let product = reduce_coeffs(
            &result.factors[0].mul(&result.factors[1]).scale(&Z::new(2)),
            &m,
        );
        assert_eq!(product, reduce_coeffs(&f, &m));
    }

    #[test]
    fn test_lift_rejects_bad_input() {
        let field = PrimeField::new(7);
        // 7x^2 - 2: the prime divides the leading coefficient
        let f = IntPoly::from_i64s(&[-2, 0, 7]);
        assert_eq!(
            hensel_lift(&f, &[vec![1]], field, 2).unwrap_err(),
            FactorError::LeadingCoefficientVanishes { prime: 7 }
        );

        // (x - 1)^2 split as two equal factors
        let g = IntPoly::from_i64s(&[1, -2, 1]);
        assert_eq!(
            hensel_lift(&g, &[vec![6, 1], vec![6, 1]], field, 2).unwrap_err(),
            FactorError::FactorsNotCoprime { prime: 7 }
        );
    }
}
