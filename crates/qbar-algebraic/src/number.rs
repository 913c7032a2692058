//! The canonical algebraic number.
//!
//! An algebraic number is stored as its minimal polynomial over Z together
//! with an isolating disc `D(c, r)`: the disc contains the number and the
//! doubled disc `D(c, 2r)` contains no other root of the polynomial.
//! Refinement only ever replaces the disc with a narrower one, so every
//! handle observes a monotonically improving enclosure.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use num_complex::Complex64;
use num_traits::{One, Zero};
use tracing::trace;

use qbar_integers::{Integer, Rational};
use qbar_interval::{ComplexQ, Disc, Interval};
use qbar_poly::int_poly::{height, height_bits, normalize};
use qbar_poly::IntPoly;
use qbar_rings::Z;

use crate::config::AlgebraicConfig;
use crate::error::{AlgebraicError, Result};
use crate::isolate::{certify_roots, refine};

/// An exact algebraic number.
///
/// Cloning is cheap: the minimal polynomial is shared. Equality is exact
/// (see [`AlgebraicNumber::try_eq`]); hashing uses only the minimal
/// polynomial, which is consistent with it.
pub struct AlgebraicNumber {
    poly: Arc<IntPoly>,
    enclosure: RwLock<Disc>,
    real: bool,
    config: AlgebraicConfig,
}

impl AlgebraicNumber {
    /// Assembles a number from a normalized irreducible polynomial and an
    /// isolating disc of one of its roots.
    ///
    /// Degree-one polynomials are turned into exact point enclosures.
    pub(crate) fn from_certified(poly: IntPoly, disc: Disc, config: AlgebraicConfig) -> Self {
        if poly.degree() == 1 {
            let root = Rational::new(-poly.coeff(0).0, poly.coeff(1).0);
            return Self::from_rational(root).with_config(config);
        }
        Self::from_shared(Arc::new(poly), disc, config)
    }

    pub(crate) fn from_shared(poly: Arc<IntPoly>, disc: Disc, config: AlgebraicConfig) -> Self {
        let real = disc.has_real_center();
        Self {
            poly,
            enclosure: RwLock::new(disc),
            real,
            config,
        }
    }

    /// The number `n`.
    #[must_use]
    pub fn from_integer(n: impl Into<Integer>) -> Self {
        Self::from_rational(Rational::from_integer(n.into()))
    }

    /// The number `r`, with minimal polynomial `den·x - num`.
    #[must_use]
    pub fn from_rational(r: Rational) -> Self {
        let poly = IntPoly::new(vec![Z(-r.numerator()), Z(r.denominator())]);
        Self {
            poly: Arc::new(poly),
            enclosure: RwLock::new(Disc::real_point(r)),
            real: true,
            config: AlgebraicConfig::default(),
        }
    }

    /// The Gaussian rational `z = a + bi`, exactly.
    ///
    /// Its minimal polynomial is `x² - 2a·x + (a² + b²)` with denominators
    /// cleared, or linear when `b = 0`.
    #[must_use]
    pub fn from_gaussian(z: ComplexQ) -> Self {
        if z.is_real() {
            return Self::from_rational(z.re);
        }
        let two_a = &z.re * &Rational::from(2);
        let norm = z.norm_sq();
        let common = two_a.denominator().lcm(&norm.denominator());
        let scale = Rational::from_integer(common.clone());
        let poly = normalize(&IntPoly::new(vec![
            Z((&norm * &scale).numerator()),
            Z(-(&two_a * &scale).numerator()),
            Z(common),
        ]));
        Self::from_shared(Arc::new(poly), Disc::point(z), AlgebraicConfig::default())
    }

    /// Replaces the configuration carried by this number.
    #[must_use]
    pub fn with_config(mut self, config: AlgebraicConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration this number was created with.
    #[must_use]
    pub fn config(&self) -> AlgebraicConfig {
        self.config
    }

    /// The minimal polynomial: irreducible, primitive, positive leading
    /// coefficient.
    #[must_use]
    pub fn minimal_polynomial(&self) -> &IntPoly {
        &self.poly
    }

    pub(crate) fn shared_polynomial(&self) -> &Arc<IntPoly> {
        &self.poly
    }

    /// Degree of the minimal polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.poly.degree()
    }

    /// Returns true if the number is real.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.real
    }

    /// Returns true if the number is rational.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.degree() == 1
    }

    /// The value as a rational, if it is one.
    #[must_use]
    pub fn to_rational(&self) -> Option<Rational> {
        self.is_rational()
            .then(|| Rational::new(-self.poly.coeff(0).0, self.poly.coeff(1).0))
    }

    /// Numerator of a rational number.
    #[must_use]
    pub fn numerator(&self) -> Option<Integer> {
        self.to_rational().map(|r| r.numerator())
    }

    /// Denominator of a rational number.
    #[must_use]
    pub fn denominator(&self) -> Option<Integer> {
        self.to_rational().map(|r| r.denominator())
    }

    /// Returns true if the number is a rational integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_rational() && self.poly.coeff(1).0.is_one()
    }

    /// Returns true if the number is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_rational() && self.poly.coeff(0).0.is_zero()
    }

    /// Returns true if the number is one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.is_integer() && self.poly.coeff(0).0 == Integer::new(-1)
    }

    /// Returns true if the minimal polynomial is monic.
    #[must_use]
    pub fn is_algebraic_integer(&self) -> bool {
        self.poly.leading_coeff().0.is_one()
    }

    /// Largest absolute coefficient of the minimal polynomial.
    #[must_use]
    pub fn height(&self) -> Integer {
        height(&self.poly)
    }

    /// Bit length of [`height`](Self::height).
    #[must_use]
    pub fn height_bits(&self) -> usize {
        height_bits(&self.poly)
    }

    /// The value as an exact Gaussian rational, when the enclosure has
    /// collapsed to a point.
    pub(crate) fn exact_value(&self) -> Option<ComplexQ> {
        let disc = self.current_enclosure();
        disc.is_point().then(|| disc.center().clone())
    }

    /// A snapshot of the current isolating disc.
    #[must_use]
    pub fn current_enclosure(&self) -> Disc {
        self.enclosure
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, disc: &Disc) {
        let mut guard = self
            .enclosure
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if disc.radius() < guard.radius() {
            *guard = disc.clone();
        }
    }

    /// Refines the isolating disc until its radius is at most `target`.
    pub(crate) fn refine_radius(&self, target: &Rational) -> Result<Disc> {
        let current = self.current_enclosure();
        if current.radius() <= target {
            return Ok(current);
        }
        let refined = refine(&self.poly, &current, target, &self.config)?;
        trace!(degree = self.degree(), radius = %refined.radius().to_f64(), "refined enclosure");
        self.store(&refined);
        Ok(refined)
    }

    /// Refines the enclosure in place until its radius is at most
    /// `2^-bits`.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistency` if the isolating disc cannot be
    /// narrowed.
    pub fn refine(&self, bits: u32) -> Result<()> {
        self.enclosure(bits).map(|_| ())
    }

    /// An isolating disc of radius at most `2^-bits`.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistency` if the isolating disc cannot be
    /// narrowed.
    pub fn enclosure(&self, bits: u32) -> Result<Disc> {
        self.refine_radius(&Rational::pow2(-i64::from(bits)))
    }

    /// An interval of width at most `2^(1-bits)` containing a real number.
    ///
    /// # Errors
    ///
    /// Returns `NonrealComparison` for a nonreal number.
    pub fn real_interval(&self, bits: u32) -> Result<Interval> {
        if !self.real {
            return Err(AlgebraicError::NonrealComparison);
        }
        Ok(self.enclosure(bits)?.real_part())
    }

    fn approximate_center(&self) -> (f64, f64) {
        self.enclosure(60)
            .unwrap_or_else(|_| self.current_enclosure())
            .center_f64()
    }

    /// An approximation of the real part, for display.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.approximate_center().0
    }

    /// An approximation of the value, for display.
    #[must_use]
    pub fn to_complex_f64(&self) -> Complex64 {
        let (re, im) = self.approximate_center();
        Complex64::new(re, im)
    }

    /// All roots of the minimal polynomial in root order. `self` appears
    /// exactly once.
    ///
    /// # Errors
    ///
    /// Propagates certification failures.
    pub fn conjugates(&self) -> Result<Vec<Self>> {
        if self.is_rational() {
            return Ok(vec![self.clone()]);
        }
        let mut all: Vec<Self> = certify_roots(&self.poly, &self.config)?
            .into_iter()
            .map(|disc| Self::from_shared(Arc::clone(&self.poly), disc, self.config))
            .collect();
        crate::compare::sort_root_order(&mut all)?;
        Ok(all)
    }
}

impl Clone for AlgebraicNumber {
    fn clone(&self) -> Self {
        Self {
            poly: Arc::clone(&self.poly),
            enclosure: RwLock::new(self.current_enclosure()),
            real: self.real,
            config: self.config,
        }
    }
}

impl PartialEq for AlgebraicNumber {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

impl Eq for AlgebraicNumber {}

impl Hash for AlgebraicNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.poly.hash(state);
    }
}

impl fmt::Debug for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgebraicNumber")
            .field("poly", &format_args!("{}", self.poly))
            .field("enclosure", &self.current_enclosure())
            .finish()
    }
}

impl fmt::Display for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(r) = self.to_rational() {
            return write!(f, "{r}");
        }
        let z = self.to_complex_f64();
        if self.real {
            write!(f, "root of {} near {}", self.poly, z.re)
        } else {
            write!(f, "root of {} near {}", self.poly, z)
        }
    }
}

impl From<Rational> for AlgebraicNumber {
    fn from(r: Rational) -> Self {
        Self::from_rational(r)
    }
}

impl From<Integer> for AlgebraicNumber {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for AlgebraicNumber {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for AlgebraicNumber {
    fn from(n: i32) -> Self {
        Self::from_integer(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_queries() {
        let x = AlgebraicNumber::from_rational(Rational::from_i64(-6, 4));
        assert_eq!(x.minimal_polynomial(), &IntPoly::from_i64s(&[3, 2]));
        assert!(x.is_rational() && x.is_real());
        assert!(!x.is_integer() && !x.is_algebraic_integer());
        assert_eq!(x.numerator(), Some(Integer::new(-3)));
        assert_eq!(x.denominator(), Some(Integer::new(2)));
        assert_eq!(x.height(), Integer::new(3));

        assert!(AlgebraicNumber::from(0).is_zero());
        assert!(AlgebraicNumber::from(1).is_one());
        assert!(AlgebraicNumber::from(7).is_integer());
    }

    #[test]
    fn test_gaussian() {
        let z = AlgebraicNumber::from_gaussian(ComplexQ::new(Rational::from(3), Rational::from(4)));
        assert_eq!(z.minimal_polynomial(), &IntPoly::from_i64s(&[25, -6, 1]));
        assert!(!z.is_real());
        assert!(z.is_algebraic_integer());

        let w = AlgebraicNumber::from_gaussian(ComplexQ::new(Rational::from_i64(1, 2), Rational::from_i64(1, 3)));
        // 36x² - 36x + 13
        assert_eq!(w.minimal_polynomial(), &IntPoly::from_i64s(&[13, -36, 36]));
        let c = w.to_complex_f64();
        assert!((c.re - 0.5).abs() < 1e-12 && (c.im - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_enclosure_narrows_and_is_shared_by_clones() {
        let poly = IntPoly::from_i64s(&[-2, 0, 1]);
        let disc = certify_roots(&poly, &AlgebraicConfig::default())
            .unwrap()
            .into_iter()
            .find(|d| d.center().re.is_positive())
            .unwrap();
        let sqrt2 = AlgebraicNumber::from_certified(poly.clone(), disc, AlgebraicConfig::default());
        assert!(sqrt2.is_real());

        let fine = sqrt2.enclosure(200).unwrap();
        assert!(fine.radius() <= &Rational::pow2(-200));
        assert!(fine.eval_poly(&poly).contains_zero());
        // The stored enclosure never widens.
        assert!(sqrt2.enclosure(10).unwrap().radius() <= &Rational::pow2(-200));

        let copy = sqrt2.clone();
        assert_eq!(copy.current_enclosure(), fine);
        assert!((copy.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn test_real_interval_of_nonreal() {
        let z = AlgebraicNumber::from_gaussian(ComplexQ::i());
        assert_eq!(z.real_interval(64), Err(AlgebraicError::NonrealComparison));
    }

    #[test]
    fn test_conjugates_contain_self_once() {
        let poly = IntPoly::from_i64s(&[-2, 0, 0, 0, 0, 1]);
        let discs = certify_roots(&poly, &AlgebraicConfig::default()).unwrap();
        let x = AlgebraicNumber::from_certified(poly, discs[2].clone(), AlgebraicConfig::default());
        let conjugates = x.conjugates().unwrap();
        assert_eq!(conjugates.len(), 5);
        assert_eq!(conjugates.iter().filter(|c| **c == x).count(), 1);
        assert!(conjugates[0].is_real());
    }

    #[test]
    fn test_display() {
        assert_eq!(AlgebraicNumber::from_rational(Rational::from_i64(1, 3)).to_string(), "1/3");
        let i = AlgebraicNumber::from_gaussian(ComplexQ::i());
        assert!(i.to_string().starts_with("root of"));
    }
}
