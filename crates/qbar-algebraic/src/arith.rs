//! Field arithmetic, powers and roots.
//!
//! A binary operation on `α` and `β` builds an annihilating polynomial of
//! the result by a parametric resultant, then locates the result among its
//! roots by disc arithmetic on the operand enclosures. Operations with a
//! rational operand, or on exact Gaussian rationals, skip the resultant:
//! shifting, scaling, negating and reversing a minimal polynomial keep it
//! irreducible and map the isolating disc exactly.

use std::cmp::Ordering;
use std::ops::Neg;
use std::sync::Arc;

use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::debug;

use qbar_integers::{Integer, Rational};
use qbar_interval::{ComplexQ, Disc};
use qbar_poly::algorithms::resultant::parametric_resultant;
use qbar_poly::int_poly::{normalize, scale_roots, shift_roots};
use qbar_poly::IntPoly;
use qbar_rings::Z;

use crate::compare::Projection;
use crate::config::AlgebraicConfig;
use crate::error::{AlgebraicError, Result};
use crate::isolate::{candidate_factors, certify_roots, select_root, Selection};
use crate::number::AlgebraicNumber;

/// Extra bits kept when rounding an approximate result location.
const LOCATION_GUARD_BITS: u32 = 8;

#[derive(Clone, Copy, Debug)]
enum BinaryOp {
    Add,
    Mul,
}

/// Locates the root of one of `factors` matching the approximations
/// `approx(bits)` over the precision ladder.
///
/// `approx` may return `None` when the location is not yet usable at a
/// given precision (a divisor disc still containing zero, say).
pub(crate) fn resolve<F>(factors: &[IntPoly], config: AlgebraicConfig, approx: F) -> Result<AlgebraicNumber>
where
    F: Fn(u32) -> Result<Option<Disc>>,
{
    let mut last = config.working_precision;
    for bits in config.precisions() {
        last = bits;
        let Some(location) = approx(bits)? else {
            debug!(bits, "approximate location unusable, raising precision");
            continue;
        };
        let location = if location.is_point() {
            location
        } else {
            location.round(bits + LOCATION_GUARD_BITS)
        };
        match select_root(factors, &location, &config)? {
            Selection::Unique { poly, disc } => {
                return Ok(AlgebraicNumber::from_certified(poly, disc, config));
            }
            Selection::Ambiguous => debug!(bits, "result root ambiguous, raising precision"),
            Selection::Missing => {
                return Err(AlgebraicError::InternalConsistency(
                    "no root of the annihilating polynomial lies in the result enclosure".into(),
                ));
            }
        }
    }
    Err(AlgebraicError::AmbiguousRoot { precision: last })
}

fn annihilator(a: &IntPoly, b: &IntPoly, op: BinaryOp) -> IntPoly {
    let bound = a.degree() * b.degree();
    match op {
        // Res_x(a(x), b(t - x))
        BinaryOp::Add => parametric_resultant(a, bound, |t| {
            b.compose(&IntPoly::new(vec![Z(t.clone()), Z::new(-1)]))
        }),
        // Res_x(a(x), x^m b(t/x))
        BinaryOp::Mul => parametric_resultant(a, bound, |t| {
            let m = b.degree();
            let mut coeffs = vec![Z::new(0); m + 1];
            let mut t_power = Integer::new(1);
            for k in 0..=m {
                coeffs[m - k] = Z(&b.coeff(k).0 * &t_power);
                t_power = &t_power * t;
            }
            IntPoly::new(coeffs)
        }),
    }
}

impl AlgebraicNumber {
    fn combine(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        let poly = annihilator(self.minimal_polynomial(), other.minimal_polynomial(), op);
        let factors = candidate_factors(&poly)?;
        debug!(?op, degree = poly.degree(), factors = factors.len(), "built annihilating polynomial");
        resolve(&factors, self.config(), |bits| {
            let a = self.enclosure(bits)?;
            let b = other.enclosure(bits)?;
            Ok(Some(match op {
                BinaryOp::Add => a.add(&b),
                BinaryOp::Mul => a.mul(&b),
            }))
        })
    }

    fn from_exact(&self, z: ComplexQ) -> Self {
        Self::from_gaussian(z).with_config(self.config())
    }

    /// `self + r` for a rational `r`, by a Taylor shift.
    #[must_use]
    pub fn add_rational(&self, r: &Rational) -> Self {
        if r.signum() == 0 {
            return self.clone();
        }
        if let Some(x) = self.to_rational() {
            return Self::from_rational(x + r).with_config(self.config());
        }
        let poly = shift_roots(self.minimal_polynomial(), r);
        let disc = self.current_enclosure().add(&Disc::real_point(r.clone()));
        Self::from_shared(Arc::new(poly), disc, self.config())
    }

    /// `self · r` for a rational `r`, by scaling the roots.
    #[must_use]
    pub fn mul_rational(&self, r: &Rational) -> Self {
        if r.signum() == 0 {
            return Self::from_integer(0).with_config(self.config());
        }
        if let Some(x) = self.to_rational() {
            return Self::from_rational(x * r).with_config(self.config());
        }
        let poly = scale_roots(self.minimal_polynomial(), r);
        let disc = self.current_enclosure().scale(r);
        Self::from_shared(Arc::new(poly), disc, self.config())
    }

    /// `self + other`.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistency` if the result cannot be isolated.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if let Some(r) = other.to_rational() {
            return Ok(self.add_rational(&r));
        }
        if let Some(r) = self.to_rational() {
            return Ok(other.add_rational(&r).with_config(self.config()));
        }
        if let (Some(x), Some(y)) = (self.exact_value(), other.exact_value()) {
            return Ok(self.from_exact(&x + &y));
        }
        self.combine(other, BinaryOp::Add)
    }

    /// `self - other`.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistency` if the result cannot be isolated.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }

    /// `self · other`.
    ///
    /// # Errors
    ///
    /// Returns `InternalConsistency` if the result cannot be isolated.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        if let Some(r) = other.to_rational() {
            return Ok(self.mul_rational(&r));
        }
        if let Some(r) = self.to_rational() {
            return Ok(other.mul_rational(&r).with_config(self.config()));
        }
        if let (Some(x), Some(y)) = (self.exact_value(), other.exact_value()) {
            return Ok(self.from_exact(&x * &y));
        }
        self.combine(other, BinaryOp::Mul)
    }

    /// `self / other`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.mul(&other.inv()?)
    }

    /// `-self`.
    #[must_use]
    pub fn neg(&self) -> Self {
        if let Some(x) = self.to_rational() {
            return Self::from_rational(-x).with_config(self.config());
        }
        let poly = normalize(&self.minimal_polynomial().negate_variable());
        Self::from_shared(Arc::new(poly), self.current_enclosure().neg(), self.config())
    }

    /// `1 / self`.
    ///
    /// The minimal polynomial of the inverse is the reversed polynomial.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `self` is zero.
    pub fn inv(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(AlgebraicError::DivisionByZero);
        }
        if let Some(x) = self.to_rational() {
            return Ok(Self::from_rational(x.recip()).with_config(self.config()));
        }
        if let Some(z) = self.exact_value() {
            if let Some(w) = z.inv() {
                return Ok(self.from_exact(w));
            }
        }
        let reversed = normalize(&self.minimal_polynomial().reverse());
        resolve(&[reversed], self.config(), |bits| Ok(self.enclosure(bits)?.inv()))
    }

    /// `self^k` for an integer `k`. `0^0 = 1`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` for zero raised to a negative power, and
    /// `InvalidArgument` when `|k|` does not fit in 32 bits.
    pub fn pow(&self, k: i64) -> Result<Self> {
        if k == 0 {
            return Ok(Self::from_integer(1).with_config(self.config()));
        }
        if self.is_zero() {
            return if k < 0 {
                Err(AlgebraicError::DivisionByZero)
            } else {
                Ok(self.clone())
            };
        }
        let exp = u32::try_from(k.unsigned_abs())
            .map_err(|_| AlgebraicError::InvalidArgument(format!("exponent {k} is too large")))?;
        if k < 0 {
            return self.pow(i64::from(exp))?.inv();
        }
        if exp == 1 {
            return Ok(self.clone());
        }
        if let Some(x) = self.to_rational() {
            return Ok(Self::from_rational(x.pow(exp)).with_config(self.config()));
        }
        if let Some(z) = self.exact_value() {
            return Ok(self.from_exact(z.pow(exp)));
        }

        // Res_x(a(x), t - x^k)
        let a = self.minimal_polynomial();
        let poly = parametric_resultant(a, a.degree(), |t| {
            let mut coeffs = vec![Z::new(0); exp as usize + 1];
            coeffs[0] = Z(t.clone());
            coeffs[exp as usize] = Z::new(-1);
            IntPoly::new(coeffs)
        });
        let factors = candidate_factors(&poly)?;
        resolve(&factors, self.config(), |bits| Ok(Some(self.enclosure(bits)?.pow(exp))))
    }

    /// The principal `q`-th root.
    ///
    /// For real `self` and odd `q` this is the real root. Otherwise it is
    /// the root of largest real part, ties going to the one with positive
    /// imaginary part, i.e. the root with argument in `(-π/q, π/q]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for `q = 0`.
    pub fn nth_root(&self, q: u32) -> Result<Self> {
        match q {
            0 => {
                return Err(AlgebraicError::InvalidArgument(
                    "the 0-th root is undefined".into(),
                ))
            }
            1 => return Ok(self.clone()),
            _ => {}
        }
        if self.is_zero() {
            return Ok(self.clone());
        }

        let lifted = self.minimal_polynomial().substitute_power(q as usize);
        let factors = candidate_factors(&lifted)?;
        let config = self.config();
        let mut candidates: Vec<Self> = factors
            .par_iter()
            .map(|f| -> Result<Vec<Self>> {
                let poly = Arc::new(f.clone());
                Ok(certify_roots(f, &config)?
                    .into_iter()
                    .map(|disc| {
                        if poly.degree() == 1 {
                            Self::from_certified(f.clone(), disc, config)
                        } else {
                            Self::from_shared(Arc::clone(&poly), disc, config)
                        }
                    })
                    .collect())
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        // Every candidate raised to the q-th power is a conjugate of self;
        // discard those landing on the other conjugates.
        let wanted = q as usize;
        let mut last = config.working_precision;
        for bits in config.precisions() {
            last = bits;
            if candidates.len() <= wanted {
                break;
            }
            let target = self.enclosure(bits)?;
            let mut kept = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                if candidate.enclosure(bits)?.pow(q).intersects(&target) {
                    kept.push(candidate);
                }
            }
            candidates = kept;
        }
        match candidates.len().cmp(&wanted) {
            Ordering::Less => {
                return Err(AlgebraicError::InternalConsistency(format!(
                    "found {} of the {wanted} roots of order {q}",
                    candidates.len()
                )))
            }
            Ordering::Greater => return Err(AlgebraicError::AmbiguousRoot { precision: last }),
            Ordering::Equal => {}
        }

        principal_root(candidates, self.is_real() && q % 2 == 1)
    }

    /// The principal square root.
    ///
    /// # Errors
    ///
    /// Propagates root selection failures.
    pub fn sqrt(&self) -> Result<Self> {
        self.nth_root(2)
    }

    /// `self^(p/q) = (self^(1/q))^p`, with the principal root.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` for zero raised to a negative power and
    /// `InvalidArgument` when `q` or `p` do not fit the supported range.
    pub fn pow_rational(&self, r: &Rational) -> Result<Self> {
        let q = r
            .denominator()
            .to_i64()
            .and_then(|q| u32::try_from(q).ok())
            .ok_or_else(|| AlgebraicError::InvalidArgument(format!("root order of {r} is too large")))?;
        let p = r
            .numerator()
            .to_i64()
            .ok_or_else(|| AlgebraicError::InvalidArgument(format!("exponent {r} is too large")))?;
        if self.is_zero() && p < 0 {
            return Err(AlgebraicError::DivisionByZero);
        }
        self.nth_root(q)?.pow(p)
    }

    /// Complex conjugate. Shares the minimal polynomial.
    #[must_use]
    pub fn conj(&self) -> Self {
        if self.is_real() {
            return self.clone();
        }
        Self::from_shared(
            Arc::clone(self.shared_polynomial()),
            self.current_enclosure().conj(),
            self.config(),
        )
    }

    /// Real part, `(z + z̄) / 2`.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic failures.
    pub fn re(&self) -> Result<Self> {
        if self.is_real() {
            return Ok(self.clone());
        }
        Ok(self.add(&self.conj())?.mul_rational(&Rational::from_i64(1, 2)))
    }

    /// Imaginary part, `(z - z̄)·(-i/2)`.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic failures.
    pub fn im(&self) -> Result<Self> {
        if self.is_real() {
            return Ok(Self::from_integer(0).with_config(self.config()));
        }
        let twice_imaginary = self.sub(&self.conj())?;
        let i = Self::from_gaussian(ComplexQ::i()).with_config(self.config());
        Ok(twice_imaginary.mul(&i)?.mul_rational(&Rational::from_i64(-1, 2)))
    }

    /// Absolute value, `sqrt(z·z̄)`.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic failures.
    pub fn abs(&self) -> Result<Self> {
        if self.is_real() {
            return Ok(if self.signum_real()? == Ordering::Less {
                self.neg()
            } else {
                self.clone()
            });
        }
        self.mul(&self.conj())?.sqrt()
    }
}

/// Picks the principal root among all `q`-th roots of a number.
fn principal_root(mut roots: Vec<AlgebraicNumber>, prefer_real: bool) -> Result<AlgebraicNumber> {
    if prefer_real {
        if let Some(position) = roots.iter().position(AlgebraicNumber::is_real) {
            return Ok(roots.swap_remove(position));
        }
    }
    let mut rest: SmallVec<[AlgebraicNumber; 8]> = roots.into_iter().collect();
    let mut best = rest.pop().ok_or_else(|| {
        AlgebraicError::InternalConsistency("no root candidates".into())
    })?;
    for candidate in rest {
        if prefers(&candidate, &best)? {
            best = candidate;
        }
    }
    Ok(best)
}

/// Returns true if `a` has a larger real part than `b`, or the same real
/// part and positive imaginary part.
fn prefers(a: &AlgebraicNumber, b: &AlgebraicNumber) -> Result<bool> {
    // Roots of equal modulus with equal real parts are conjugates.
    if a.conj().try_eq(b)? {
        return Ok(a.is_upper_half());
    }
    Ok(a.compare_projection(b, Projection::Real)? == Ordering::Greater)
}

impl Neg for AlgebraicNumber {
    type Output = AlgebraicNumber;

    fn neg(self) -> AlgebraicNumber {
        AlgebraicNumber::neg(&self)
    }
}

impl Neg for &AlgebraicNumber {
    type Output = AlgebraicNumber;

    fn neg(self) -> AlgebraicNumber {
        AlgebraicNumber::neg(self)
    }
}
