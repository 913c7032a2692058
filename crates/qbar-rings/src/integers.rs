//! The ring of integers Z.

use num_traits::{One, Zero};
use qbar_integers::Integer;

use crate::traits::{EuclideanDomain, Ring};
use crate::wrapper::coefficient_wrapper;

/// Integer coefficients, the ring minimal polynomials live in.
///
/// Division truncates toward zero, so `div` is exact whenever the divisor
/// divides the dividend. Bareiss elimination and exact polynomial division
/// only ever ask for that case.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Z(pub Integer);

impl Z {
    /// Wraps a machine integer.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(Integer::new(value))
    }
}

coefficient_wrapper!(Z, Integer);

impl Ring for Z {
    fn zero() -> Self {
        Self(Integer::zero())
    }

    fn one() -> Self {
        Self(Integer::one())
    }

    fn from_i64(n: i64) -> Self {
        Self::new(n)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl EuclideanDomain for Z {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (Self(&self.0 / &other.0), Self(&self.0 % &other.0))
    }

    /// Nonnegative, with `gcd(0, 0) = 0`.
    fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }
}
