//! Gaussian rationals.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use qbar_integers::Rational;

/// Relative precision used for the square roots behind magnitude bounds.
pub(crate) const MAGNITUDE_BITS: u32 = 40;

/// A complex number `re + i·im` with rational parts.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ComplexQ {
    /// Real part.
    pub re: Rational,
    /// Imaginary part.
    pub im: Rational,
}

impl ComplexQ {
    /// Creates a complex number from its parts.
    #[must_use]
    pub fn new(re: Rational, im: Rational) -> Self {
        Self { re, im }
    }

    /// Embeds a rational.
    #[must_use]
    pub fn from_real(re: Rational) -> Self {
        Self {
            re,
            im: Rational::zero(),
        }
    }

    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self::from_real(Rational::one())
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self::new(Rational::zero(), Rational::one())
    }

    /// Returns true if both parts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// Returns true if the imaginary part is zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), -&self.im)
    }

    /// `|z|²`, exact.
    #[must_use]
    pub fn norm_sq(&self) -> Rational {
        &self.re * &self.re + &self.im * &self.im
    }

    /// Upper bound on `|z|`.
    #[must_use]
    pub fn abs_upper(&self) -> Rational {
        self.norm_sq().sqrt_upper(MAGNITUDE_BITS)
    }

    /// Lower bound on `|z|`.
    #[must_use]
    pub fn abs_lower(&self) -> Rational {
        self.norm_sq().sqrt_lower(MAGNITUDE_BITS)
    }

    /// Multiplies both parts by a rational.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        Self::new(&self.re * c, &self.im * c)
    }

    /// Multiplicative inverse, `None` for zero.
    #[must_use]
    pub fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let n = self.norm_sq();
        Some(Self::new(&self.re / &n, -(&self.im / &n)))
    }

    /// `self / other`, `None` when `other` is zero.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        other.inv().map(|inv| self * &inv)
    }

    /// Raises to a nonnegative integer power.
    #[must_use]
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::one();
        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Rounds both parts to the nearest multiple of `2^-bits`.
    ///
    /// The rounded value is within `2^-bits` of `self`.
    #[must_use]
    pub fn round_to_bits(&self, bits: u32) -> Self {
        Self::new(self.re.round_to_bits(bits), self.im.round_to_bits(bits))
    }

    /// Approximate `(re, im)` as floats.
    #[must_use]
    pub fn to_f64(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }
}

impl fmt::Debug for ComplexQ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?} + {:?}i)", self.re, self.im)
    }
}

impl fmt::Display for ComplexQ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            write!(f, "{}", self.re)
        } else if self.im.is_negative() {
            write!(f, "{} - {}i", self.re, -&self.im)
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}

impl From<Rational> for ComplexQ {
    fn from(re: Rational) -> Self {
        Self::from_real(re)
    }
}

impl Add for &ComplexQ {
    type Output = ComplexQ;

    fn add(self, other: Self) -> ComplexQ {
        ComplexQ::new(&self.re + &other.re, &self.im + &other.im)
    }
}

impl Add for ComplexQ {
    type Output = ComplexQ;

    fn add(self, other: Self) -> ComplexQ {
        &self + &other
    }
}

impl Sub for &ComplexQ {
    type Output = ComplexQ;

    fn sub(self, other: Self) -> ComplexQ {
        ComplexQ::new(&self.re - &other.re, &self.im - &other.im)
    }
}

impl Sub for ComplexQ {
    type Output = ComplexQ;

    fn sub(self, other: Self) -> ComplexQ {
        &self - &other
    }
}

impl Mul for &ComplexQ {
    type Output = ComplexQ;

    fn mul(self, other: Self) -> ComplexQ {
        ComplexQ::new(
            &self.re * &other.re - &self.im * &other.im,
            &self.re * &other.im + &self.im * &other.re,
        )
    }
}

impl Mul for ComplexQ {
    type Output = ComplexQ;

    fn mul(self, other: Self) -> ComplexQ {
        &self * &other
    }
}

impl Neg for &ComplexQ {
    type Output = ComplexQ;

    fn neg(self) -> ComplexQ {
        ComplexQ::new(-&self.re, -&self.im)
    }
}

impl Neg for ComplexQ {
    type Output = ComplexQ;

    fn neg(self) -> ComplexQ {
        -&self
    }
}
