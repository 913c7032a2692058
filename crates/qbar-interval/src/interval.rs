//! Closed real intervals with rational endpoints.

use std::cmp::Ordering;
use std::fmt;

use num_traits::Zero;
use qbar_integers::Rational;

/// The closed interval `[lo, hi]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    lo: Rational,
    hi: Rational,
}

impl Interval {
    /// Creates `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    #[must_use]
    pub fn new(lo: Rational, hi: Rational) -> Self {
        assert!(lo <= hi, "empty interval");
        Self { lo, hi }
    }

    /// The degenerate interval `[x, x]`.
    #[must_use]
    pub fn point(x: Rational) -> Self {
        Self {
            lo: x.clone(),
            hi: x,
        }
    }

    /// `[center - radius, center + radius]`.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is negative.
    #[must_use]
    pub fn ball(center: &Rational, radius: &Rational) -> Self {
        assert!(!radius.is_negative(), "negative radius");
        Self {
            lo: center - radius,
            hi: center + radius,
        }
    }

    /// Lower endpoint.
    #[must_use]
    pub fn lo(&self) -> &Rational {
        &self.lo
    }

    /// Upper endpoint.
    #[must_use]
    pub fn hi(&self) -> &Rational {
        &self.hi
    }

    /// `(lo + hi) / 2`.
    #[must_use]
    pub fn midpoint(&self) -> Rational {
        (&self.lo + &self.hi) * Rational::from_i64(1, 2)
    }

    /// `(hi - lo) / 2`.
    #[must_use]
    pub fn radius(&self) -> Rational {
        (&self.hi - &self.lo) * Rational::from_i64(1, 2)
    }

    /// `hi - lo`.
    #[must_use]
    pub fn width(&self) -> Rational {
        &self.hi - &self.lo
    }

    /// Returns true if the interval is a single point.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Returns true if `x` lies in the interval.
    #[must_use]
    pub fn contains(&self, x: &Rational) -> bool {
        &self.lo <= x && x <= &self.hi
    }

    /// Returns true if zero lies in the interval.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.contains(&Rational::zero())
    }

    /// Returns true if the intervals share a point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Sign of every point of the interval, if they all agree.
    ///
    /// A point interval at zero has sign `Equal`.
    #[must_use]
    pub fn sign(&self) -> Option<Ordering> {
        if self.lo.is_positive() {
            Some(Ordering::Greater)
        } else if self.hi.is_negative() {
            Some(Ordering::Less)
        } else if self.lo.is_zero() && self.hi.is_zero() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    /// Certain comparison of every point of `self` with every point of
    /// `other`. Returns `None` when the intervals overlap (unless both are
    /// the same point).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if self.hi < other.lo {
            Some(Ordering::Less)
        } else if self.lo > other.hi {
            Some(Ordering::Greater)
        } else if self.is_point() && other.is_point() && self.lo == other.lo {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    /// Interval sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            lo: &self.lo + &other.lo,
            hi: &self.hi + &other.hi,
        }
    }

    /// Interval difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            lo: &self.lo - &other.hi,
            hi: &self.hi - &other.lo,
        }
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            lo: -&self.hi,
            hi: -&self.lo,
        }
    }

    /// Interval product.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let products = [
            &self.lo * &other.lo,
            &self.lo * &other.hi,
            &self.hi * &other.lo,
            &self.hi * &other.hi,
        ];
        let mut lo = products[0].clone();
        let mut hi = products[0].clone();
        for p in &products[1..] {
            if *p < lo {
                lo = p.clone();
            }
            if *p > hi {
                hi = p.clone();
            }
        }
        Self { lo, hi }
    }

    /// Multiplies by a rational.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        self.mul(&Self::point(c.clone()))
    }

    /// `{|x| : x in self}`.
    #[must_use]
    pub fn abs(&self) -> Self {
        if !self.lo.is_negative() {
            self.clone()
        } else if !self.hi.is_positive() {
            self.neg()
        } else {
            Self {
                lo: Rational::zero(),
                hi: self.hi.clone().max(-&self.lo),
            }
        }
    }

}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.lo, self.hi)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo.to_f64(), self.hi.to_f64())
    }
}
