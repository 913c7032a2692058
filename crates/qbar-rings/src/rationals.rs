//! The field of rational numbers Q.

use num_traits::{One, Zero};
use qbar_integers::{Integer, Rational};

use crate::traits::{EuclideanDomain, Field, Ring};
use crate::wrapper::coefficient_wrapper;

/// Rational coefficients, used wherever a computation needs to divide:
/// polynomial GCDs, Sturm sequences, interpolation and lattice reduction.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Q(pub Rational);

impl Q {
    /// Creates `num / den` in lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        Self(Rational::from_i64(num, den))
    }

    /// Embeds a machine integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(Rational::from(n))
    }

    /// Embeds an arbitrary precision integer.
    #[must_use]
    pub fn from_big(n: Integer) -> Self {
        Self(Rational::from_integer(n))
    }
}

coefficient_wrapper!(Q, Rational);

impl Ring for Q {
    fn zero() -> Self {
        Self(Rational::zero())
    }

    fn one() -> Self {
        Self(Rational::one())
    }

    fn from_i64(n: i64) -> Self {
        Self::from_integer(n)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl EuclideanDomain for Q {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (Self(&self.0 / &other.0), Self::zero())
    }

    /// Every nonzero rational is a unit.
    fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() && other.is_zero() {
            Self::zero()
        } else {
            Self::one()
        }
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.recip()))
        }
    }
}
