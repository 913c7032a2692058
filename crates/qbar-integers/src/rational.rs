//! Arbitrary precision rational numbers.
//!
//! Besides exact field arithmetic this module carries the rounding
//! primitives used to keep enclosure centers short: rounding to a dyadic
//! grid, outward rounding to a few significant bits, and rigorous
//! lower/upper bounds for square roots.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::Integer;

/// An arbitrary precision rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let (numerator, denominator) = if denominator.is_negative() {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Returns `2^exp` for a possibly negative exponent.
    #[must_use]
    pub fn pow2(exp: i64) -> Self {
        let magnitude = u32::try_from(exp.unsigned_abs()).unwrap_or(u32::MAX);
        let p = Self::from_integer(Integer::pow2(magnitude));
        if exp >= 0 {
            p
        } else {
            p.recip()
        }
    }

    /// Exact value of a finite `f64`; `None` for NaN and infinities.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::zero());
        }
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = i64::try_from((bits >> 52) & 0x7ff).unwrap_or(0);
        let fraction = bits & ((1u64 << 52) - 1);
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };
        let magnitude = Self::from_integer(Integer::from(mantissa)) * Self::pow2(exponent);
        Some(if negative { -magnitude } else { magnitude })
    }

    /// Approximate conversion to `f64`, for display and starting guesses.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let num = self.numerator();
        let den = self.denominator();
        // Scale so that the integer quotient keeps about 62 significant bits.
        let shift = 62 - (i64::try_from(num.bit_len()).unwrap_or(i64::MAX)
            - i64::try_from(den.bit_len()).unwrap_or(i64::MAX));
        let scaled = (self * &Self::pow2(shift)).trunc();
        let exp = i32::try_from(-shift).unwrap_or(if shift > 0 { i32::MIN } else { i32::MAX });
        if exp.abs() > 1000 {
            // Split the power to avoid intermediate overflow to zero or infinity.
            let half = exp / 2;
            scaled.to_f64() * 2f64.powi(half) * 2f64.powi(exp - half)
        } else {
            scaled.to_f64() * 2f64.powi(exp)
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(dashu::integer::IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Largest integer not above `self`.
    #[must_use]
    pub fn floor(&self) -> Integer {
        self.numerator().floor_div(&self.denominator())
    }

    /// Smallest integer not below `self`.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        self.numerator().ceil_div(&self.denominator())
    }

    /// Integer part, rounding toward zero.
    #[must_use]
    pub fn trunc(&self) -> Integer {
        self.numerator() / self.denominator()
    }

    /// Nearest integer, ties rounded up.
    #[must_use]
    pub fn round(&self) -> Integer {
        (self + &Self::from_i64(1, 2)).floor()
    }

    /// Nearest multiple of `2^-bits`.
    #[must_use]
    pub fn round_to_bits(&self, bits: u32) -> Self {
        let scale = Integer::pow2(bits);
        let scaled = self * &Self::from_integer(scale.clone());
        Self::new(scaled.round(), scale)
    }

    /// Smallest dyadic with `sig_bits` significant bits that is `>= self`.
    ///
    /// Used to keep radii short while only ever rounding them outward.
    #[must_use]
    pub fn round_up_relative(&self, sig_bits: u32) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let shift = i64::from(sig_bits) - self.log2_estimate();
        let scale = Self::pow2(shift);
        Self::from_integer((self * &scale).ceil()) / scale
    }

    /// Estimate `e` of `log2 |self|` with `|log2 |self| - e| < 1`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is zero.
    #[must_use]
    pub fn log2_estimate(&self) -> i64 {
        assert!(!self.is_zero(), "logarithm of zero");
        i64::try_from(self.numerator().bit_len()).unwrap_or(i64::MAX)
            - i64::try_from(self.denominator().bit_len()).unwrap_or(i64::MAX)
    }

    /// A rational `s` with `s <= sqrt(self)`, accurate to about `sig_bits`
    /// bits relative to the result.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative.
    #[must_use]
    pub fn sqrt_lower(&self, sig_bits: u32) -> Self {
        assert!(!self.is_negative(), "square root of a negative rational");
        if self.is_zero() {
            return Self::zero();
        }
        let bits = self.sqrt_scale(sig_bits);
        let scaled = (self * &Self::pow2(2 * i64::from(bits))).floor();
        Self::new(scaled.isqrt(), Integer::pow2(bits))
    }

    /// A rational `s` with `s >= sqrt(self)`, accurate to about `sig_bits`
    /// bits relative to the result.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative.
    #[must_use]
    pub fn sqrt_upper(&self, sig_bits: u32) -> Self {
        assert!(!self.is_negative(), "square root of a negative rational");
        if self.is_zero() {
            return Self::zero();
        }
        let bits = self.sqrt_scale(sig_bits);
        let scaled = (self * &Self::pow2(2 * i64::from(bits))).ceil();
        Self::new(scaled.isqrt() + Integer::one(), Integer::pow2(bits))
    }

    fn sqrt_scale(&self, sig_bits: u32) -> u32 {
        let wanted = i64::from(sig_bits) - self.log2_estimate() / 2 + 2;
        u32::try_from(wanted.max(0)).unwrap_or(u32::MAX)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && DashuSigned::is_positive(&self.0)
    }

    /// Returns the inner `dashu::RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Rational> for Rational {
    type Output = Self;

    fn div(self, rhs: &Rational) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        Rational(&self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Rational::from_i64(1, 2);
        let b = Rational::from_i64(1, 3);

        let sum = a.clone() + b.clone();
        assert_eq!(sum.numerator().to_i64(), Some(5));
        assert_eq!(sum.denominator().to_i64(), Some(6));

        let prod = a * b;
        assert_eq!(prod.numerator().to_i64(), Some(1));
        assert_eq!(prod.denominator().to_i64(), Some(6));
    }

    #[test]
    fn test_negative_denominator() {
        let r = Rational::from_i64(3, -6);
        assert_eq!(r, Rational::from_i64(-1, 2));
        assert!(r.is_negative());
    }

    #[test]
    fn test_floor_ceil_round() {
        let r = Rational::from_i64(-7, 2);
        assert_eq!(r.floor(), Integer::new(-4));
        assert_eq!(r.ceil(), Integer::new(-3));
        assert_eq!(r.trunc(), Integer::new(-3));
        assert_eq!(r.round(), Integer::new(-3));
        assert_eq!(Rational::from_i64(5, 3).round(), Integer::new(2));
    }

    #[test]
    fn test_from_f64_is_exact() {
        let tenth = Rational::from_f64(0.1).unwrap();
        assert_eq!(tenth.denominator(), Integer::pow2(55));
        assert_eq!(tenth.numerator(), Integer::new(3_602_879_701_896_397));
        assert_eq!(Rational::from_f64(-2.5).unwrap(), Rational::from_i64(-5, 2));
        assert!(Rational::from_f64(f64::NAN).is_none());
        assert!((tenth.to_f64() - 0.1).abs() < 1e-17);
    }

    #[test]
    fn test_round_to_bits() {
        let third = Rational::from_i64(1, 3);
        let r = third.round_to_bits(10);
        assert!((&r - &third).abs() <= Rational::pow2(-11));
        assert!(r.denominator().bit_len() <= 11);
    }

    #[test]
    fn test_round_up_relative_is_outward() {
        let x = Rational::from_i64(1, 7);
        let up = x.round_up_relative(8);
        assert!(up >= x);
        assert!(&up - &x <= &x * &Rational::pow2(-6));
    }

    #[test]
    fn test_sqrt_bounds() {
        let two = Rational::from(2);
        let lo = two.sqrt_lower(40);
        let hi = two.sqrt_upper(40);
        assert!(&lo * &lo <= two);
        assert!(&hi * &hi >= two);
        assert!(&hi - &lo < Rational::pow2(-35));

        let tiny = Rational::pow2(-300);
        let hi = tiny.sqrt_upper(20);
        assert!(&hi * &hi >= tiny);
        assert!(hi < Rational::pow2(-149));
    }

    #[test]
    fn test_sign_of_zero() {
        let zero = Rational::from(0);
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert_eq!(zero.signum(), 0);
        assert!(Rational::from_i64(1, 3).is_positive());
        assert!(Rational::from_i64(-1, 3).is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_i64(3, 1).to_string(), "3");
        assert_eq!(Rational::from_i64(2, 3).to_string(), "2/3");
    }
}
