//! Roots of unity and trigonometric values at rational multiples of π.
//!
//! Minimal polynomials come from closed forms (cyclotomic, Chebyshev and
//! tangent polynomials); the wanted root is picked out by a rigorous
//! enclosure of the transcendental value.

use num_traits::{One, Zero};

use qbar_integers::{Integer, Rational};
use qbar_interval::{exp_i_pi, ComplexQ, Disc};
use qbar_poly::special::{chebyshev_t, cyclotomic, euler_phi, tangent_polynomial};
use qbar_poly::IntPoly;
use qbar_rings::Z;

use crate::arith::resolve;
use crate::config::AlgebraicConfig;
use crate::error::{AlgebraicError, Result};
use crate::isolate::candidate_factors;
use crate::number::AlgebraicNumber;

/// How `cos(πr)` is computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AngleClass {
    /// The cosine is rational: the reduced denominator is 1, 2 or 3.
    RationalCosine(Rational),
    /// `cos(πp/q)` is a root of `T_q(x) - (-1)^p`.
    Chebyshev {
        /// Numerator of the angle reduced to `[0, 2)`.
        p: u64,
        /// Denominator of the angle.
        q: u64,
    },
}

impl AngleClass {
    /// Classifies `cos(πr)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the reduced angle does not fit in
    /// machine integers.
    pub fn classify(r: &Rational) -> Result<Self> {
        let reduced = reduce_mod(r, 2);
        let p = to_u64(&reduced.numerator())?;
        let q = to_u64(&reduced.denominator())?;
        let cosine = match (p, q) {
            (0, 1) => Some(Rational::one()),
            (1, 1) => Some(-Rational::one()),
            (_, 2) => Some(Rational::zero()),
            (1 | 5, 3) => Some(Rational::from_i64(1, 2)),
            (2 | 4, 3) => Some(Rational::from_i64(-1, 2)),
            _ => None,
        };
        Ok(cosine.map_or(Self::Chebyshev { p, q }, Self::RationalCosine))
    }
}

/// `r` reduced into `[0, m)`.
fn reduce_mod(r: &Rational, m: i64) -> Rational {
    let m = Rational::from(m);
    r - &(Rational::from_integer((r / &m).floor()) * &m)
}

fn to_u64(n: &Integer) -> Result<u64> {
    n.to_i64()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| AlgebraicError::InvalidArgument(format!("{n} is too large")))
}

fn to_usize(n: u64) -> Result<usize> {
    usize::try_from(n).map_err(|_| AlgebraicError::InvalidArgument(format!("{n} is too large")))
}

/// The imaginary unit `i`.
#[must_use]
pub fn i() -> AlgebraicNumber {
    AlgebraicNumber::from_gaussian(ComplexQ::i())
}

/// `e^{2πik/n}`, built from the cyclotomic polynomial `Φ_{n/gcd(k,n)}`.
///
/// # Errors
///
/// Returns `InvalidArgument` for `n = 0`.
pub fn root_of_unity(n: u64, k: i64) -> Result<AlgebraicNumber> {
    root_of_unity_with_config(n, k, AlgebraicConfig::default())
}

/// [`root_of_unity`] carrying `config`.
///
/// # Errors
///
/// As for [`root_of_unity`].
pub fn root_of_unity_with_config(n: u64, k: i64, config: AlgebraicConfig) -> Result<AlgebraicNumber> {
    if n == 0 {
        return Err(AlgebraicError::InvalidArgument(
            "roots of unity need a positive order".into(),
        ));
    }
    let modulus = i128::from(n);
    let k = u64::try_from(i128::from(k).rem_euclid(modulus)).unwrap_or(0);
    let g = gcd(k, n);
    let (order, index) = (n / g, k / g);

    let turn = Rational::new(Integer::from(2 * index), Integer::from(order));
    resolve(&[cyclotomic(order)], config, |bits| Ok(Some(exp_i_pi(&turn, bits))))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `cos(πr)`.
///
/// # Errors
///
/// Returns `InvalidArgument` when the angle's denominator does not fit in
/// machine integers.
pub fn cos_pi(r: &Rational) -> Result<AlgebraicNumber> {
    cos_pi_with_config(r, AlgebraicConfig::default())
}

/// [`cos_pi`] carrying `config`.
///
/// # Errors
///
/// As for [`cos_pi`].
pub fn cos_pi_with_config(r: &Rational, config: AlgebraicConfig) -> Result<AlgebraicNumber> {
    match AngleClass::classify(r)? {
        AngleClass::RationalCosine(c) => Ok(AlgebraicNumber::from_rational(c).with_config(config)),
        AngleClass::Chebyshev { p, q } => {
            let sign = if p % 2 == 0 { 1 } else { -1 };
            let poly = chebyshev_t(to_usize(q)?).sub(&IntPoly::constant(Z::new(sign)));
            let factors = candidate_factors(&poly)?;
            resolve(&factors, config, |bits| {
                Ok(Some(Disc::from_interval(&exp_i_pi(r, bits).real_part())))
            })
        }
    }
}

/// `sin(πr) = cos(π(1/2 - r))`.
///
/// # Errors
///
/// As for [`cos_pi`].
pub fn sin_pi(r: &Rational) -> Result<AlgebraicNumber> {
    sin_pi_with_config(r, AlgebraicConfig::default())
}

/// [`sin_pi`] carrying `config`.
///
/// # Errors
///
/// As for [`cos_pi`].
pub fn sin_pi_with_config(r: &Rational, config: AlgebraicConfig) -> Result<AlgebraicNumber> {
    cos_pi_with_config(&(Rational::from_i64(1, 2) - r), config)
}

/// `tan(πr)`.
///
/// # Errors
///
/// Returns `DivisionByZero` at odd multiples of `1/2`.
pub fn tan_pi(r: &Rational) -> Result<AlgebraicNumber> {
    tan_pi_with_config(r, AlgebraicConfig::default())
}

/// [`tan_pi`] carrying `config`.
///
/// # Errors
///
/// As for [`tan_pi`].
pub fn tan_pi_with_config(r: &Rational, config: AlgebraicConfig) -> Result<AlgebraicNumber> {
    let reduced = reduce_mod(r, 1);
    if reduced == Rational::from_i64(1, 2) {
        return Err(AlgebraicError::DivisionByZero);
    }
    if reduced.is_zero() {
        return Ok(AlgebraicNumber::from_integer(0).with_config(config));
    }
    let q = to_usize(to_u64(&reduced.denominator())?)?;
    let factors = candidate_factors(&tangent_polynomial(q))?;
    resolve(&factors, config, |bits| {
        let z = exp_i_pi(&reduced, bits);
        let cosine = Disc::from_interval(&z.real_part());
        let sine = Disc::from_interval(&z.imag_part());
        Ok(sine.div(&cosine))
    })
}

/// The Niven values: the rational cosines of rational multiples of π.
fn rational_acos(c: &Rational) -> Option<Rational> {
    let table = [
        (Rational::one(), Rational::zero()),
        (Rational::from_i64(1, 2), Rational::from_i64(1, 3)),
        (Rational::zero(), Rational::from_i64(1, 2)),
        (Rational::from_i64(-1, 2), Rational::from_i64(2, 3)),
        (-Rational::one(), Rational::one()),
    ];
    table
        .into_iter()
        .find_map(|(cosine, angle)| (&cosine == c).then_some(angle))
}

impl AlgebraicNumber {
    /// The imaginary unit `i`.
    #[must_use]
    pub fn i() -> Self {
        i()
    }

    /// Returns true if the minimal polynomial is cyclotomic.
    #[must_use]
    pub fn is_root_of_unity(&self) -> bool {
        self.cyclotomic_order().is_some()
    }

    /// The order `n` with `Φ_n` equal to the minimal polynomial.
    fn cyclotomic_order(&self) -> Option<u64> {
        let d = u64::try_from(self.degree()).ok()?;
        if !self.is_algebraic_integer() || !self.minimal_polynomial().coeff(0).0.abs().is_one() {
            return None;
        }
        // φ(n) >= sqrt(n/2), so φ(n) = d forces n <= 2d².
        let bound = (2 * d * d).max(6);
        (1..=bound)
            .filter(|&n| euler_phi(n) == d)
            .find(|&n| &cyclotomic(n) == self.minimal_polynomial())
    }

    /// Recovers `(n, k)` with `self = e^{2πik/n}`, `gcd(k, n) = 1` and
    /// `0 <= k < n`, if `self` is a root of unity.
    ///
    /// # Errors
    ///
    /// Propagates comparison failures.
    pub fn root_of_unity_as_args(&self) -> Result<Option<(u64, u64)>> {
        let Some(n) = self.cyclotomic_order() else {
            return Ok(None);
        };
        if n == 1 {
            return Ok(Some((1, 0)));
        }
        let z = self.to_complex_f64();
        let turns = z.im.atan2(z.re) / std::f64::consts::TAU;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let estimate = (turns * n as f64).round() as i64;
        for offset in [0, 1, -1] {
            let k = u64::try_from((estimate + offset).rem_euclid(i64::try_from(n).unwrap_or(i64::MAX)))
                .unwrap_or(0);
            if gcd(k, n) != 1 {
                continue;
            }
            if root_of_unity(n, i64::try_from(k).unwrap_or(0))?.try_eq(self)? {
                return Ok(Some((n, k)));
            }
        }
        Err(AlgebraicError::InternalConsistency(
            "cyclotomic root did not match any argument".into(),
        ))
    }

    /// `r` in `[0, 1]` with `cos(πr) = self`, if `r` is rational.
    ///
    /// # Errors
    ///
    /// Propagates comparison failures.
    pub fn acos_pi(&self) -> Result<Option<Rational>> {
        if !self.is_real() {
            return Ok(None);
        }
        if let Some(c) = self.to_rational() {
            return Ok(rational_acos(&c));
        }
        let one = Self::from_integer(1);
        if self.is_greater_real(&one)? || self.is_less_real(&one.neg())? {
            return Ok(None);
        }

        // cos(2πk/n) with gcd(k, n) = 1 has degree φ(n)/2 for n >= 3.
        let d = u64::try_from(self.degree()).unwrap_or(u64::MAX);
        let bound = 8 * d * d + 8;
        let half_turns = self.to_f64().clamp(-1.0, 1.0).acos() / std::f64::consts::PI;
        for n in (3..=bound).filter(|&n| euler_phi(n) == 2 * d) {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let estimate = (half_turns * n as f64 / 2.0).round() as i64;
            for k in [estimate, estimate + 1, estimate - 1] {
                let Ok(k) = u64::try_from(k) else { continue };
                if 2 * k > n || gcd(k, n) != 1 {
                    continue;
                }
                let r = Rational::new(Integer::from(2 * k), Integer::from(n));
                let candidate = cos_pi(&r)?;
                if candidate.minimal_polynomial() == self.minimal_polynomial() && candidate.try_eq(self)? {
                    return Ok(Some(r));
                }
            }
        }
        Ok(None)
    }

    /// `r` in `[-1/2, 1/2]` with `sin(πr) = self`, if `r` is rational.
    ///
    /// # Errors
    ///
    /// Propagates comparison failures.
    pub fn asin_pi(&self) -> Result<Option<Rational>> {
        Ok(self.acos_pi()?.map(|r| Rational::from_i64(1, 2) - r))
    }

    /// `r` in `(-1/2, 1/2)` with `tan(πr) = self`, if `r` is rational.
    ///
    /// Uses `e^{2πir} = (1 + i·self) / (1 - i·self)`.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic failures.
    pub fn atan_pi(&self) -> Result<Option<Rational>> {
        if !self.is_real() {
            return Ok(None);
        }
        if let Some(t) = self.to_rational() {
            let angle = if t.is_zero() {
                Some(Rational::zero())
            } else if t == Rational::one() {
                Some(Rational::from_i64(1, 4))
            } else if t == -Rational::one() {
                Some(Rational::from_i64(-1, 4))
            } else {
                None
            };
            return Ok(angle);
        }

        let it = self.mul(&i())?;
        let z = it.add_rational(&Rational::one()).div(&it.neg().add_rational(&Rational::one()))?;
        let Some((n, k)) = z.root_of_unity_as_args()? else {
            return Ok(None);
        };
        let mut r = Rational::new(Integer::from(k), Integer::from(n));
        if r > Rational::from_i64(1, 2) {
            r = r - Rational::one();
        }
        Ok(Some(r))
    }
}
