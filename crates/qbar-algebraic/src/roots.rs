//! Roots of integer polynomials as algebraic numbers.

use rayon::prelude::*;

use qbar_interval::Disc;
use qbar_poly::int_poly::from_rational_poly;
use qbar_poly::{DensePoly, IntPoly};
use qbar_rings::Q;

use crate::compare::sort_root_order;
use crate::config::AlgebraicConfig;
use crate::error::{AlgebraicError, Result};
use crate::isolate::{candidate_factors, certify_roots, select_root, Selection};
use crate::number::AlgebraicNumber;

/// The unique root of `poly` matching the location `approx`.
///
/// # Errors
///
/// Returns `AmbiguousRoot` when `approx` is too wide to tell roots apart,
/// and `InvalidArgument` when no root lies in it.
pub fn root_near(poly: &IntPoly, approx: &Disc) -> Result<AlgebraicNumber> {
    root_near_with_config(poly, approx, AlgebraicConfig::default())
}

/// [`root_near`] with an explicit configuration.
///
/// # Errors
///
/// As for [`root_near`].
pub fn root_near_with_config(poly: &IntPoly, approx: &Disc, config: AlgebraicConfig) -> Result<AlgebraicNumber> {
    let factors = candidate_factors(poly)?;
    match select_root(&factors, approx, &config)? {
        Selection::Unique { poly, disc } => Ok(AlgebraicNumber::from_certified(poly, disc, config)),
        Selection::Ambiguous => Err(AlgebraicError::AmbiguousRoot {
            precision: u32::try_from(-approx.radius().log2_estimate()).unwrap_or(0),
        }),
        Selection::Missing => Err(AlgebraicError::InvalidArgument(format!(
            "no root of {poly} lies in {approx}"
        ))),
    }
}

/// All distinct complex roots of `poly`, in root order.
///
/// # Errors
///
/// Returns `InvalidArgument` for the zero polynomial.
pub fn roots(poly: &IntPoly) -> Result<Vec<AlgebraicNumber>> {
    roots_with_config(poly, AlgebraicConfig::default())
}

/// [`roots`] with an explicit configuration.
///
/// # Errors
///
/// As for [`roots`].
pub fn roots_with_config(poly: &IntPoly, config: AlgebraicConfig) -> Result<Vec<AlgebraicNumber>> {
    let factors = candidate_factors(poly)?;
    let mut all: Vec<AlgebraicNumber> = factors
        .par_iter()
        .map(|f| -> Result<Vec<AlgebraicNumber>> {
            Ok(certify_roots(f, &config)?
                .into_iter()
                .map(|disc| AlgebraicNumber::from_certified(f.clone(), disc, config))
                .collect())
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();
    sort_root_order(&mut all)?;
    Ok(all)
}

/// The distinct real roots of `poly`, in descending order.
///
/// # Errors
///
/// As for [`roots`].
pub fn real_roots(poly: &IntPoly) -> Result<Vec<AlgebraicNumber>> {
    Ok(roots(poly)?.into_iter().filter(AlgebraicNumber::is_real).collect())
}

/// The root at `index` in root order.
///
/// # Errors
///
/// Returns `InvalidRootIndex` if `index` is out of range.
pub fn root_by_index(poly: &IntPoly, index: usize) -> Result<AlgebraicNumber> {
    let mut all = roots(poly)?;
    let count = all.len();
    if index >= count {
        return Err(AlgebraicError::InvalidRootIndex { index, count });
    }
    Ok(all.swap_remove(index))
}

/// All distinct roots of a rational polynomial, in root order.
///
/// # Errors
///
/// As for [`roots`].
pub fn rational_poly_roots(poly: &DensePoly<Q>) -> Result<Vec<AlgebraicNumber>> {
    roots(&from_rational_poly(poly))
}

impl AlgebraicNumber {
    /// The conjugate at `index` in root order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRootIndex` if `index` is at least the degree.
    pub fn conjugate(&self, index: usize) -> Result<Self> {
        let mut all = self.conjugates()?;
        let count = all.len();
        if index >= count {
            return Err(AlgebraicError::InvalidRootIndex { index, count });
        }
        Ok(all.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_integers::Rational;
    use qbar_interval::ComplexQ;

    #[test]
    fn test_roots_in_root_order() {
        // (x - 1)(x + 2)(x² + 1)(x² - 2)
        let p = IntPoly::from_i64s(&[-2, 1, 1])
            .mul(&IntPoly::from_i64s(&[1, 0, 1]))
            .mul(&IntPoly::from_i64s(&[-2, 0, 1]));
        let rs = roots(&p).unwrap();
        assert_eq!(rs.len(), 6);
        assert!(rs[..4].iter().all(AlgebraicNumber::is_real));
        let values: Vec<f64> = rs[..4].iter().map(AlgebraicNumber::to_f64).collect();
        assert!(values.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(rs[1].to_rational(), Some(Rational::from(1)));
        assert!(rs[4].is_upper_half());
        assert_eq!(rs[5], rs[4].conj());
        assert_eq!(real_roots(&p).unwrap().len(), 4);
    }

    #[test]
    fn test_root_by_index() {
        let p = IntPoly::from_i64s(&[-6, 11, -6, 1]);
        assert_eq!(root_by_index(&p, 0).unwrap().to_rational(), Some(Rational::from(3)));
        assert_eq!(root_by_index(&p, 2).unwrap().to_rational(), Some(Rational::from(1)));
        assert_eq!(
            root_by_index(&p, 3).unwrap_err(),
            AlgebraicError::InvalidRootIndex { index: 3, count: 3 }
        );
    }

    #[test]
    fn test_root_near() {
        let p = IntPoly::from_i64s(&[-2, 0, 1]);
        let near = Disc::new(ComplexQ::from_real(Rational::from_i64(-3, 2)), Rational::from_i64(1, 4));
        let r = root_near(&p, &near).unwrap();
        assert!((r.to_f64() + std::f64::consts::SQRT_2).abs() < 1e-12);

        let wide = Disc::new(ComplexQ::zero(), Rational::from(4));
        assert!(matches!(root_near(&p, &wide), Err(AlgebraicError::AmbiguousRoot { .. })));

        let far = Disc::new(ComplexQ::from_real(Rational::from(10)), Rational::from(1));
        assert!(matches!(root_near(&p, &far), Err(AlgebraicError::InvalidArgument(_))));
    }

    #[test]
    fn test_conjugate_index() {
        let x = AlgebraicNumber::from_integer(3).sqrt().unwrap();
        assert_eq!(x.conjugate(0).unwrap(), x);
        assert_eq!(x.conjugate(1).unwrap(), x.neg());
        assert!(x.conjugate(2).is_err());
    }
}
