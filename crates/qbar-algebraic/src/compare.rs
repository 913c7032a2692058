//! Exact equality, projection orders and root order.
//!
//! Every order compares a real projection of two numbers (real part,
//! imaginary part, modulus, ...). Interval enclosures of the projections
//! are tried first, up to `exact_comparison_bits`; after that the
//! projections are computed as real algebraic numbers, which settles ties
//! exactly and lets separation continue to the precision ceiling.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use qbar_integers::Rational;
use qbar_interval::Interval;

use crate::error::{AlgebraicError, Result};
use crate::number::AlgebraicNumber;

/// Rounds of alternating refinement allowed when deciding equality.
const MAX_EQUALITY_ROUNDS: usize = 64;

/// Largest single refinement jump, in bits, while deciding equality.
const MAX_EQUALITY_SHRINK: i64 = 1024;

/// A real-valued projection of a complex number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Projection {
    /// `Re z`.
    Real,
    /// `Im z`.
    Imag,
    /// `|z|`.
    Abs,
    /// `|Re z|`.
    AbsReal,
    /// `|Im z|`.
    AbsImag,
}

impl Projection {
    /// Encloses the projection of `x` at `bits` of precision.
    fn interval(self, x: &AlgebraicNumber, bits: u32) -> Result<Interval> {
        if x.is_real() && matches!(self, Self::Imag | Self::AbsImag) {
            return Ok(Interval::point(Rational::from(0)));
        }
        let disc = x.enclosure(bits)?;
        Ok(match self {
            Self::Real => disc.real_part(),
            Self::Imag => disc.imag_part(),
            Self::Abs => disc.abs_interval(),
            Self::AbsReal => disc.real_part().abs(),
            Self::AbsImag => disc.imag_part().abs(),
        })
    }

    /// The projection of `x` as an exact real algebraic number.
    fn value(self, x: &AlgebraicNumber) -> Result<AlgebraicNumber> {
        match self {
            Self::Real => x.re(),
            Self::Imag => x.im(),
            Self::Abs => x.abs(),
            Self::AbsReal => x.re()?.abs(),
            Self::AbsImag => x.im()?.abs(),
        }
    }
}

impl AlgebraicNumber {
    /// Decides exact equality.
    ///
    /// Equal numbers share a minimal polynomial; among its roots, `self`
    /// and `other` coincide when one isolating disc can be refined into the
    /// doubled disc of the other, and differ once the discs are disjoint.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistency` if two roots of the same polynomial
    /// cannot be separated.
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        if !Arc::ptr_eq(self.shared_polynomial(), other.shared_polynomial())
            && self.minimal_polynomial() != other.minimal_polynomial()
        {
            return Ok(false);
        }
        if self.is_rational() {
            return Ok(true);
        }
        if self.is_real() != other.is_real() {
            return Ok(false);
        }

        let mut shrink = 2i64;
        for _ in 0..MAX_EQUALITY_ROUNDS {
            let a = self.current_enclosure();
            let b = other.current_enclosure();
            // A point enclosure is an exact root; the other disc holds at
            // most one root.
            match (a.is_point(), b.is_point()) {
                (true, true) => return Ok(a.center() == b.center()),
                (true, false) => return Ok(b.contains_point(a.center())),
                (false, true) => return Ok(a.contains_point(b.center())),
                (false, false) => {}
            }
            if a.is_within_doubled(&b) || b.is_within_doubled(&a) {
                return Ok(true);
            }
            if !a.intersects(&b) {
                return Ok(false);
            }

            let (wider, narrower) = if a.radius() >= b.radius() {
                (self, &b)
            } else {
                (other, &a)
            };
            wider.refine_radius(&(narrower.radius() * &Rational::pow2(-shrink)))?;
            shrink = (shrink * 2).min(MAX_EQUALITY_SHRINK);
        }

        Err(AlgebraicError::InternalConsistency(
            "roots of one minimal polynomial could not be separated".into(),
        ))
    }

    /// Compares a projection of `self` with the same projection of `other`.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousRoot` if distinct projections cannot be separated
    /// below the precision ceiling.
    pub fn compare_projection(&self, other: &Self, projection: Projection) -> Result<Ordering> {
        let budget = self.config().exact_comparison_bits;
        for bits in self.config().precisions_up_to(budget) {
            let a = projection.interval(self, bits)?;
            let b = projection.interval(other, bits)?;
            if let Some(ordering) = a.compare(&b) {
                return Ok(ordering);
            }
        }

        debug!(?projection, budget, "numeric comparison inconclusive, comparing exactly");
        let a = projection.value(self)?;
        let b = projection.value(other)?;
        compare_real_values(&a, &b)
    }

    /// The standard order on real numbers.
    ///
    /// # Errors
    ///
    /// Returns `NonrealComparison` if either number is nonreal.
    pub fn cmp_real(&self, other: &Self) -> Result<Ordering> {
        if !self.is_real() || !other.is_real() {
            return Err(AlgebraicError::NonrealComparison);
        }
        self.compare_projection(other, Projection::Real)
    }

    /// Sign of a real number.
    ///
    /// # Errors
    ///
    /// Returns `NonrealComparison` for a nonreal number.
    pub fn signum_real(&self) -> Result<Ordering> {
        if let Some(r) = self.to_rational() {
            return Ok(r.signum().cmp(&0));
        }
        self.cmp_real(&Self::from_integer(0).with_config(self.config()))
    }

    /// Returns true if the number lies in the open upper half plane.
    ///
    /// For a nonreal number the isolating disc center lies on the same side
    /// of the real axis as the number itself.
    #[must_use]
    pub fn is_upper_half(&self) -> bool {
        !self.is_real() && self.current_enclosure().center().im.is_positive()
    }

    /// The canonical total order used to sort roots and conjugates.
    ///
    /// Real numbers come first, in descending order. Nonreal numbers
    /// follow, by descending real part, then ascending `|Im|`, with the
    /// upper member of a conjugate pair first. `Less` means `self` sorts
    /// before `other`.
    ///
    /// # Errors
    ///
    /// Propagates comparison failures.
    pub fn cmp_root_order(&self, other: &Self) -> Result<Ordering> {
        match (self.is_real(), other.is_real()) {
            (true, false) => return Ok(Ordering::Less),
            (false, true) => return Ok(Ordering::Greater),
            (true, true) if self.try_eq(other)? => return Ok(Ordering::Equal),
            (true, true) => return other.cmp_real(self),
            (false, false) => {}
        }
        if self.try_eq(other)? {
            return Ok(Ordering::Equal);
        }
        let upper_first = if self.is_upper_half() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        if self.conj().try_eq(other)? {
            return Ok(upper_first);
        }

        let by_real = other.compare_projection(self, Projection::Real)?;
        if by_real != Ordering::Equal {
            return Ok(by_real);
        }
        let by_imag = self.compare_projection(other, Projection::AbsImag)?;
        if by_imag != Ordering::Equal {
            return Ok(by_imag);
        }
        // Same real part and same |Im| means a conjugate pair.
        Ok(upper_first)
    }
}

/// Sorts numbers in root order.
///
/// # Errors
///
/// Propagates comparison failures; the slice is left partially sorted.
pub fn sort_root_order(values: &mut [AlgebraicNumber]) -> Result<()> {
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 && values[j].cmp_root_order(&values[j - 1])? == Ordering::Less {
            values.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

/// Orders two real algebraic numbers, deciding ties exactly.
fn compare_real_values(a: &AlgebraicNumber, b: &AlgebraicNumber) -> Result<Ordering> {
    if a.try_eq(b)? {
        return Ok(Ordering::Equal);
    }
    let mut last = a.config().working_precision;
    for bits in a.config().precisions() {
        last = bits;
        if let Some(ordering) = a.real_interval(bits)?.compare(&b.real_interval(bits)?) {
            return Ok(ordering);
        }
    }
    Err(AlgebraicError::AmbiguousRoot { precision: last })
}

macro_rules! projection_predicates {
    ($($projection:ident, $name:literal => $less:ident, $less_equal:ident, $greater:ident, $greater_equal:ident, $equal:ident;)*) => {
        impl AlgebraicNumber {
            $(
                #[doc = concat!("Returns true if the ", $name, " of `self` is less than that of `other`.")]
                ///
                /// # Errors
                ///
                /// Propagates comparison failures.
                pub fn $less(&self, other: &Self) -> Result<bool> {
                    Ok(self.compare_projection(other, Projection::$projection)?.is_lt())
                }

                #[doc = concat!("Returns true if the ", $name, " of `self` is at most that of `other`.")]
                ///
                /// # Errors
                ///
                /// Propagates comparison failures.
                pub fn $less_equal(&self, other: &Self) -> Result<bool> {
                    Ok(self.compare_projection(other, Projection::$projection)?.is_le())
                }

                #[doc = concat!("Returns true if the ", $name, " of `self` is greater than that of `other`.")]
                ///
                /// # Errors
                ///
                /// Propagates comparison failures.
                pub fn $greater(&self, other: &Self) -> Result<bool> {
                    Ok(self.compare_projection(other, Projection::$projection)?.is_gt())
                }

                #[doc = concat!("Returns true if the ", $name, " of `self` is at least that of `other`.")]
                ///
                /// # Errors
                ///
                /// Propagates comparison failures.
                pub fn $greater_equal(&self, other: &Self) -> Result<bool> {
                    Ok(self.compare_projection(other, Projection::$projection)?.is_ge())
                }

                #[doc = concat!("Returns true if `self` and `other` have the same ", $name, ".")]
                ///
                /// # Errors
                ///
                /// Propagates comparison failures.
                pub fn $equal(&self, other: &Self) -> Result<bool> {
                    Ok(self.compare_projection(other, Projection::$projection)?.is_eq())
                }
            )*
        }
    };
}

projection_predicates! {
    Real, "real part" => is_less_real, is_less_equal_real, is_greater_real, is_greater_equal_real, is_equal_real;
    Imag, "imaginary part" => is_less_imag, is_less_equal_imag, is_greater_imag, is_greater_equal_imag, is_equal_imag;
    Abs, "absolute value" => is_less_abs, is_less_equal_abs, is_greater_abs, is_greater_equal_abs, is_equal_abs;
    AbsReal, "absolute real part" => is_less_abs_real, is_less_equal_abs_real, is_greater_abs_real, is_greater_equal_abs_real, is_equal_abs_real;
    AbsImag, "absolute imaginary part" => is_less_abs_imag, is_less_equal_abs_imag, is_greater_abs_imag, is_greater_equal_abs_imag, is_equal_abs_imag;
}

impl PartialOrd for AlgebraicNumber {
    /// The real order; `None` if either number is nonreal.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.cmp_real(other).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_interval::ComplexQ;

    fn q(n: i64, d: i64) -> AlgebraicNumber {
        AlgebraicNumber::from_rational(Rational::from_i64(n, d))
    }

    fn gaussian(re: i64, im: i64) -> AlgebraicNumber {
        AlgebraicNumber::from_gaussian(ComplexQ::new(Rational::from(re), Rational::from(im)))
    }

    #[test]
    fn test_rational_order() {
        assert_eq!(q(1, 3).cmp_real(&q(1, 2)), Ok(Ordering::Less));
        assert!(q(2, 4) == q(1, 2));
        assert!(q(-1, 2) < q(0, 1));
        assert_eq!(q(-5, 7).signum_real(), Ok(Ordering::Less));
    }

    #[test]
    fn test_nonreal_real_order_fails() {
        let z = gaussian(1, 1);
        assert_eq!(z.cmp_real(&q(0, 1)), Err(AlgebraicError::NonrealComparison));
        assert_eq!(z.partial_cmp(&q(0, 1)), None);
    }

    #[test]
    fn test_projection_orders() {
        let a = gaussian(3, 4);
        let b = gaussian(-1, -4);
        assert_eq!(a.is_equal_abs_imag(&b), Ok(true));
        assert_eq!(a.is_less_real(&b), Ok(false));
        assert_eq!(a.is_greater_imag(&b), Ok(true));
        assert_eq!(a.is_greater_abs(&b), Ok(true));
        assert_eq!(b.is_less_equal_abs_real(&a), Ok(true));
    }

    #[test]
    fn test_root_order_of_conjugates() {
        let up = gaussian(1, 2);
        let down = gaussian(1, -2);
        assert!(up.is_upper_half());
        assert_eq!(up.cmp_root_order(&down), Ok(Ordering::Less));
        assert_eq!(down.cmp_root_order(&up), Ok(Ordering::Greater));
        assert_eq!(q(-7, 1).cmp_root_order(&up), Ok(Ordering::Less));
        assert_eq!(q(3, 1).cmp_root_order(&q(5, 1)), Ok(Ordering::Greater));
    }

    #[test]
    fn test_sort_root_order() {
        let mut values = vec![gaussian(0, -1), q(1, 1), gaussian(2, 1), gaussian(0, 1), q(3, 1), gaussian(2, -1)];
        sort_root_order(&mut values).unwrap();
        let expected = [q(3, 1), q(1, 1), gaussian(2, 1), gaussian(2, -1), gaussian(0, 1), gaussian(0, -1)];
        assert_eq!(values, expected);
    }
}
