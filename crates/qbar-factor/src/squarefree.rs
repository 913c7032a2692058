//! Squarefree factorization over Z.
//!
//! f = c · f₁ · f₂² · f₃³ ⋯
//!
//! with every fᵢ primitive, squarefree, pairwise coprime and with a
//! positive leading coefficient, and `c` the signed content.

use qbar_poly::algorithms::gcd::content;
use qbar_poly::algorithms::squarefree::squarefree_decomposition;
use qbar_poly::int_poly::{from_rational_poly, normalize, to_rational_poly};
use qbar_poly::IntPoly;
use qbar_rings::Z;

/// A squarefree factor with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquarefreeFactor {
    /// The squarefree polynomial.
    pub factor: IntPoly,
    /// The multiplicity (power) of this factor.
    pub multiplicity: u32,
}

/// Result of squarefree factorization.
#[derive(Clone, Debug)]
pub struct SquarefreeFactorization {
    /// Signed content.
    pub content: Z,
    /// Squarefree factors with multiplicities.
    pub factors: Vec<SquarefreeFactor>,
}

/// Computes the squarefree factorization of a polynomial over Z.
#[must_use]
pub fn squarefree_factorization(f: &IntPoly) -> SquarefreeFactorization {
    if f.degree() == 0 {
        return SquarefreeFactorization {
            content: f.coeff(0),
            factors: Vec::new(),
        };
    }

    let c = content(f);
    let signed = if f.leading_coeff().0.is_negative() {
        -c
    } else {
        c
    };

    let factors = squarefree_decomposition(&to_rational_poly(f))
        .factors
        .into_iter()
        .map(|sf| SquarefreeFactor {
            factor: normalize(&from_rational_poly(&sf.factor)),
            multiplicity: sf.multiplicity,
        })
        .collect();

    SquarefreeFactorization {
        content: signed,
        factors,
    }
}
