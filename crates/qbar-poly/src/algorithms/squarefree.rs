//! Squarefree decomposition over a field of characteristic 0.
//!
//! f = u · f₁ · f₂² · f₃³ · ...
//!
//! with every fᵢ monic, squarefree and coprime to the others. Computed with
//! Yun's algorithm.

use qbar_rings::traits::Field;

use crate::algorithms::gcd::{make_monic, poly_div_rem, poly_gcd};
use crate::dense::DensePoly;

/// A factor with its multiplicity in the squarefree decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquarefreeFactor<F: Field> {
    /// The squarefree polynomial factor.
    pub factor: DensePoly<F>,
    /// The multiplicity (power) of this factor.
    pub multiplicity: u32,
}

/// Result of squarefree decomposition.
#[derive(Clone, Debug)]
pub struct SquarefreeDecomposition<F: Field> {
    /// The leading coefficient.
    pub unit: F,
    /// The squarefree factors with multiplicities.
    pub factors: Vec<SquarefreeFactor<F>>,
}

impl<F: Field> SquarefreeDecomposition<F> {
    /// Returns the product of the distinct factors (monic).
    #[must_use]
    pub fn squarefree_part(&self) -> DensePoly<F> {
        self.factors
            .iter()
            .fold(DensePoly::one(), |acc, sf| acc.mul(&sf.factor))
    }
}

/// Computes the squarefree decomposition of `f` using Yun's algorithm.
#[must_use]
pub fn squarefree_decomposition<F: Field>(f: &DensePoly<F>) -> SquarefreeDecomposition<F> {
    if f.degree() == 0 {
        return SquarefreeDecomposition {
            unit: f.coeff(0),
            factors: Vec::new(),
        };
    }

    let unit = f.leading_coeff().clone();
    let f_monic = make_monic(f);
    let f_prime = f_monic.derivative();

    let g = poly_gcd(&f_monic, &f_prime);
    if g.degree() == 0 {
        return SquarefreeDecomposition {
            unit,
            factors: vec![SquarefreeFactor {
                factor: f_monic,
                multiplicity: 1,
            }],
        };
    }

    let (mut a, _) = poly_div_rem(&f_monic, &g);
    let (mut b, _) = poly_div_rem(&f_prime, &g);

    let mut factors = Vec::new();
    let mut multiplicity = 1u32;

    loop {
        let c = b.sub(&a.derivative());
        if c.is_zero() {
            if a.degree() > 0 {
                factors.push(SquarefreeFactor {
                    factor: a,
                    multiplicity,
                });
            }
            break;
        }

        let d = poly_gcd(&a, &c);
        if d.degree() > 0 {
            factors.push(SquarefreeFactor {
                factor: d.clone(),
                multiplicity,
            });
        }

        let (next_a, _) = poly_div_rem(&a, &d);
        let (next_b, _) = poly_div_rem(&c, &d);
        if next_a.degree() == 0 {
            break;
        }

        a = next_a;
        b = next_b;
        multiplicity += 1;
    }

    SquarefreeDecomposition { unit, factors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_rings::Q;

    fn q_poly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::from_i64s(coeffs)
    }

    #[test]
    fn test_squarefree_input() {
        let f = q_poly(&[-2, 0, 1]);
        let decomp = squarefree_decomposition(&f);
        assert_eq!(decomp.factors.len(), 1);
        assert_eq!(decomp.factors[0].multiplicity, 1);
    }

    #[test]
    fn test_repeated_factors() {
        // (x + 1)^2 (x + 2)^3
        let f = q_poly(&[1, 1]).pow(2).mul(&q_poly(&[2, 1]).pow(3));
        let decomp = squarefree_decomposition(&f);
        assert_eq!(decomp.factors.len(), 2);
        assert_eq!(decomp.factors[0].factor, q_poly(&[1, 1]));
        assert_eq!(decomp.factors[0].multiplicity, 2);
        assert_eq!(decomp.factors[1].factor, q_poly(&[2, 1]));
        assert_eq!(decomp.factors[1].multiplicity, 3);
        let expanded = decomp.factors.iter().fold(DensePoly::constant(decomp.unit.clone()), |acc, sf| {
            acc.mul(&sf.factor.pow(sf.multiplicity))
        });
        assert_eq!(expanded, f);
    }

    #[test]
    fn test_constant_has_no_factors() {
        let decomp = squarefree_decomposition(&q_poly(&[-5]));
        assert!(decomp.factors.is_empty());
        assert_eq!(decomp.unit, Q::from_integer(-5));
        assert_eq!(decomp.squarefree_part(), DensePoly::one());
    }

    #[test]
    fn test_squarefree_part() {
        // 3 (x - 1)^3 x
        let f = q_poly(&[-1, 1]).pow(3).mul(&q_poly(&[0, 3]));
        assert_eq!(squarefree_decomposition(&f).squarefree_part(), q_poly(&[0, -1, 1]));
    }
}
