//! Algebraic structure traits.
//!
//! Polynomials, resultants and matrices are written once against these
//! traits and instantiated over `Z` (minimal polynomials, resultants) and
//! `Q` (GCDs, Sturm sequences, characteristic polynomials).

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A commutative ring with identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
pub trait Ring:
    Clone + Eq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// The image of a machine integer.
    fn from_i64(n: i64) -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Computes `n * self`.
    fn mul_by_scalar(&self, n: i64) -> Self {
        self.clone() * Self::from_i64(n)
    }

    /// Computes self^n by binary exponentiation.
    fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            exp >>= 1;
            if exp > 0 {
                base = base.clone() * base;
            }
        }

        result
    }
}

/// A Euclidean domain supports division with remainder.
///
/// For any a, b with b ≠ 0, there exist q, r such that a = b*q + r and
/// either r = 0 or r is smaller than b. Fraction-free elimination relies on
/// `div` being exact whenever b divides a.
pub trait EuclideanDomain: Ring {
    /// Computes the quotient and remainder of division.
    ///
    /// # Panics
    ///
    /// May panic if `other` is zero.
    fn div_rem(&self, other: &Self) -> (Self, Self);

    /// Computes the quotient of division.
    fn div(&self, other: &Self) -> Self {
        self.div_rem(other).0
    }

    /// Computes a greatest common divisor, with `gcd(0, 0) = 0`.
    fn gcd(&self, other: &Self) -> Self;
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: EuclideanDomain {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn field_div(&self, other: &Self) -> Self {
        match other.inv() {
            Some(inv) => self.clone() * inv,
            None => panic!("division by zero"),
        }
    }
}
