//! Complex discs with rational centers and radii.
//!
//! A `Disc` `D(c, r)` stands for every complex number within distance `r`
//! of `c`. All operations are rigorous: the result contains every value
//! the operation can take on points of the operands. Magnitudes enter
//! radii only through upper bounds, and centers are kept exact unless
//! explicitly rounded.

use std::fmt;

use num_traits::{One, Zero};
use qbar_integers::Rational;
use qbar_poly::IntPoly;

use crate::complex::ComplexQ;
use crate::interval::Interval;

/// Significant bits kept in rounded radii.
const RADIUS_BITS: u32 = 32;

/// The closed disc `{z : |z - center| <= radius}`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Disc {
    center: ComplexQ,
    radius: Rational,
}

impl Disc {
    /// Creates `D(center, radius)`.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative.
    #[must_use]
    pub fn new(center: ComplexQ, radius: Rational) -> Self {
        assert!(!radius.is_negative(), "negative radius");
        Self { center, radius }
    }

    /// The point disc `D(z, 0)`.
    #[must_use]
    pub fn point(z: ComplexQ) -> Self {
        Self {
            center: z,
            radius: Rational::zero(),
        }
    }

    /// The point disc at a rational.
    #[must_use]
    pub fn real_point(x: Rational) -> Self {
        Self::point(ComplexQ::from_real(x))
    }

    /// The smallest disc with a real center covering `interval`.
    #[must_use]
    pub fn from_interval(interval: &Interval) -> Self {
        Self {
            center: ComplexQ::from_real(interval.midpoint()),
            radius: interval.radius(),
        }
    }

    /// Center.
    #[must_use]
    pub fn center(&self) -> &ComplexQ {
        &self.center
    }

    /// Radius.
    #[must_use]
    pub fn radius(&self) -> &Rational {
        &self.radius
    }

    /// Returns true if the radius is zero.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.radius.is_zero()
    }

    /// Returns true if the center is real.
    #[must_use]
    pub fn has_real_center(&self) -> bool {
        self.center.is_real()
    }

    /// `D(c, 2r)`.
    #[must_use]
    pub fn doubled(&self) -> Self {
        Self {
            center: self.center.clone(),
            radius: &self.radius + &self.radius,
        }
    }

    /// Same center, new radius.
    #[must_use]
    pub fn with_radius(&self, radius: Rational) -> Self {
        Self::new(self.center.clone(), radius)
    }

    /// Upper bound on `|z|` over the disc.
    #[must_use]
    pub fn magnitude_upper(&self) -> Rational {
        self.center.abs_upper() + &self.radius
    }

    /// Lower bound on `|z|` over the disc (zero if the disc meets zero).
    #[must_use]
    pub fn magnitude_lower(&self) -> Rational {
        let lower = self.center.abs_lower() - &self.radius;
        if lower.is_negative() {
            Rational::zero()
        } else {
            lower
        }
    }

    /// Returns true if `z` lies in the disc.
    #[must_use]
    pub fn contains_point(&self, z: &ComplexQ) -> bool {
        (&self.center - z).norm_sq() <= &self.radius * &self.radius
    }

    /// Returns true if zero lies in the disc.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.center.norm_sq() <= &self.radius * &self.radius
    }

    /// Returns true if `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains_disc(&self, other: &Self) -> bool {
        let slack = &self.radius - &other.radius;
        if slack.is_negative() {
            return false;
        }
        (&self.center - &other.center).norm_sq() <= &slack * &slack
    }

    /// Returns true if the discs share a point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let reach = &self.radius + &other.radius;
        (&self.center - &other.center).norm_sq() <= &reach * &reach
    }

    /// Returns true if `self` lies inside `D(other.center, 2·other.radius)`.
    #[must_use]
    pub fn is_within_doubled(&self, other: &Self) -> bool {
        other.doubled().contains_disc(self)
    }

    /// Real projection `[re c - r, re c + r]`.
    #[must_use]
    pub fn real_part(&self) -> Interval {
        Interval::ball(&self.center.re, &self.radius)
    }

    /// Imaginary projection `[im c - r, im c + r]`.
    #[must_use]
    pub fn imag_part(&self) -> Interval {
        Interval::ball(&self.center.im, &self.radius)
    }

    /// Interval containing `|z|` for every `z` in the disc.
    #[must_use]
    pub fn abs_interval(&self) -> Interval {
        Interval::new(self.magnitude_lower(), self.magnitude_upper())
    }

    /// Sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            center: &self.center + &other.center,
            radius: &self.radius + &other.radius,
        }
    }

    /// Difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            center: &self.center - &other.center,
            radius: &self.radius + &other.radius,
        }
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            center: -&self.center,
            radius: self.radius.clone(),
        }
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            center: self.center.conj(),
            radius: self.radius.clone(),
        }
    }

    /// Product: `(a + e)(b + f) = ab + (af + be + ef)`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut radius = Rational::zero();
        if !other.radius.is_zero() {
            radius = radius + self.center.abs_upper() * &other.radius;
        }
        if !self.radius.is_zero() {
            radius = radius + other.center.abs_upper() * &self.radius;
        }
        radius = radius + &self.radius * &other.radius;
        Self {
            center: &self.center * &other.center,
            radius,
        }
    }

    /// Multiplies by an exact rational.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        Self {
            center: self.center.scale(c),
            radius: &self.radius * &c.abs(),
        }
    }

    /// Multiplicative inverse, `None` if the disc may contain zero.
    ///
    /// `|1/(c+e) - 1/c| = |e| / (|c||c+e|) <= r / (|c|(|c| - r))`.
    #[must_use]
    pub fn inv(&self) -> Option<Self> {
        let lower = self.center.abs_lower();
        if lower <= self.radius {
            return None;
        }
        let center = self.center.inv()?;
        let radius = if self.radius.is_zero() {
            Rational::zero()
        } else {
            &self.radius / &(&lower * &(&lower - &self.radius))
        };
        Some(Self { center, radius })
    }

    /// Quotient, `None` if the divisor may contain zero.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        other.inv().map(|inv| self.mul(&inv))
    }

    /// Nonnegative integer power by repeated squaring.
    #[must_use]
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::real_point(Rational::one());
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Rounds the center to the `2^-bits` grid and the radius outward to a
    /// short dyadic, growing the radius to cover the moved center.
    #[must_use]
    pub fn round(&self, bits: u32) -> Self {
        let center = self.center.round_to_bits(bits);
        let mut radius = self.radius.clone();
        if center != self.center {
            radius = radius + Rational::pow2(-i64::from(bits));
        }
        Self {
            center,
            radius: radius.round_up_relative(RADIUS_BITS),
        }
    }

    /// Encloses `p(z)` for every `z` in the disc, by Horner's scheme in
    /// disc arithmetic.
    #[must_use]
    pub fn eval_poly(&self, p: &IntPoly) -> Self {
        self.horner(p, None)
    }

    /// Like [`Disc::eval_poly`], rounding every intermediate result to
    /// `bits` fractional bits to keep the centers short.
    #[must_use]
    pub fn eval_poly_rounded(&self, p: &IntPoly, bits: u32) -> Self {
        self.horner(p, Some(bits))
    }

    fn horner(&self, p: &IntPoly, bits: Option<u32>) -> Self {
        let mut acc = Self::real_point(Rational::zero());
        for c in p.coeffs().iter().rev() {
            let coeff = Self::real_point(Rational::from_integer(c.0.clone()));
            acc = acc.mul(self).add(&coeff);
            if let Some(bits) = bits {
                acc = acc.round(bits);
            }
        }
        acc
    }

    /// Approximate center as floats.
    #[must_use]
    pub fn center_f64(&self) -> (f64, f64) {
        self.center.to_f64()
    }
}

impl fmt::Debug for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D({:?}, {:?})", self.center, self.radius)
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = self.center.to_f64();
        write!(f, "D({re} + {im}i, {:e})", self.radius.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    fn disc(re: i64, im: i64, r: Rational) -> Disc {
        Disc::new(ComplexQ::new(Rational::from(re), Rational::from(im)), r)
    }

    #[test]
    fn test_containment() {
        let big = disc(0, 0, q(2, 1));
        let small = disc(1, 0, q(1, 2));
        assert!(big.contains_disc(&small));
        assert!(!small.contains_disc(&big));
        assert!(big.intersects(&small));
        assert!(!disc(5, 0, q(1, 1)).intersects(&small));
        assert!(small.is_within_doubled(&disc(1, 0, q(1, 4))));
        assert!(big.contains_zero());
        assert!(!small.contains_zero());
    }

    #[test]
    fn test_mul_encloses_products() {
        let a = disc(1, 1, q(1, 10));
        let b = disc(2, -1, q(1, 10));
        let product = a.mul(&b);
        // Corners of the operands land inside the product.
        for da in [q(1, 10), q(-1, 10)] {
            for db in [q(1, 10), q(-1, 10)] {
                let x = ComplexQ::new(Rational::from(1) + da.clone(), Rational::from(1));
                let y = ComplexQ::new(Rational::from(2), Rational::from(-1) + db.clone());
                assert!(product.contains_point(&(&x * &y)));
            }
        }
    }

    #[test]
    fn test_inv() {
        let a = disc(2, 0, q(1, 2));
        let inv = a.inv().unwrap();
        assert!(inv.contains_point(&ComplexQ::from_real(q(2, 5))));
        assert!(inv.contains_point(&ComplexQ::from_real(q(2, 3))));
        assert!(disc(1, 0, q(1, 1)).inv().is_none());
    }

    #[test]
    fn test_round_keeps_enclosure() {
        let a = Disc::new(ComplexQ::new(q(1, 3), q(2, 7)), q(1, 1000));
        let r = a.round(12);
        assert!(r.contains_disc(&a));
        assert_eq!(r.center().re.denominator(), qbar_integers::Integer::new(4096));
    }

    #[test]
    fn test_eval_poly() {
        // x^2 + 1 at i is 0
        let p = IntPoly::from_i64s(&[1, 0, 1]);
        let at_i = Disc::point(ComplexQ::i()).eval_poly(&p);
        assert!(at_i.is_point());
        assert!(at_i.contains_zero());

        let near = disc(0, 1, q(1, 100)).eval_poly_rounded(&p, 40);
        assert!(near.contains_zero());
        assert!(!disc(0, 2, q(1, 100)).eval_poly(&p).contains_zero());
    }

    #[test]
    fn test_projections() {
        let a = disc(3, -4, q(1, 2));
        assert_eq!(a.real_part(), Interval::new(q(5, 2), q(7, 2)));
        assert_eq!(a.imag_part().sign(), Some(Ordering::Less));
        let abs = a.abs_interval();
        assert!(abs.contains(&Rational::from(5)));
    }

    #[test]
    fn test_projections_near_the_real_axis() {
        // A disc centered on the axis straddles it.
        let on_axis = disc(2, 0, q(1, 8));
        assert!(on_axis.has_real_center());
        assert_eq!(on_axis.imag_part().sign(), None);
        assert_eq!(on_axis.real_part().sign(), Some(Ordering::Greater));

        // A real point has an imaginary part of exactly zero.
        let point = Disc::real_point(q(3, 2));
        assert_eq!(point.imag_part().sign(), Some(Ordering::Equal));

        // Touching the axis from above is not strictly above it.
        let touching = disc(0, 1, q(1, 1));
        assert_eq!(touching.imag_part().sign(), None);
        assert_eq!(disc(0, 1, q(1, 2)).imag_part().sign(), Some(Ordering::Greater));
    }
}
