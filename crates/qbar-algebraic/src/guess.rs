//! Recovering exact algebraic numbers from numeric enclosures.
//!
//! Degree 1 is the simplest rational in the real part of the enclosure.
//! Higher degrees look for a short integer relation among `1, c, …, c^d`
//! with LLL, where `c` is the center of the enclosure; every candidate is
//! accepted only once one of its roots is certified inside the enclosure.

use num_traits::Zero;
use tracing::{debug, trace};

use qbar_factor::lll_reduce;
use qbar_integers::{Integer, Rational};
use qbar_interval::{ComplexQ, Disc, Interval};
use qbar_linalg::DenseMatrix;
use qbar_poly::int_poly::{height_bits, normalize};
use qbar_poly::IntPoly;
use qbar_rings::{Q, Z};

use crate::config::{AlgebraicConfig, GuessOptions};
use crate::error::{AlgebraicError, Result};
use crate::isolate::{candidate_factors, refine, select_root, Selection};
use crate::number::AlgebraicNumber;

/// Bits subtracted from the radius precision when scaling the lattice.
const LATTICE_SLACK_BITS: i64 = 4;

/// Returns the lowest-degree algebraic number with a root in `enclosure`
/// whose minimal polynomial has degree at most `options.max_degree` and
/// coefficients of at most `max_bits` bits.
///
/// Without an explicit bit budget, a point enclosure allows the bit size of
/// the point itself and a disc the precision implied by its radius.
///
/// # Errors
///
/// Returns `NoCandidateFound` when nothing within the budgets fits.
pub fn guess(enclosure: &Disc, options: &GuessOptions) -> Result<AlgebraicNumber> {
    let max_bits = options.max_bits.unwrap_or_else(|| default_bits(enclosure));
    let config = options.config;

    for degree in 1..=options.max_degree {
        let found = if degree == 1 {
            guess_rational(enclosure, max_bits).map(|n| n.with_config(config))
        } else {
            guess_degree(enclosure, degree, max_bits, &config)?
        };
        if let Some(number) = found {
            debug!(degree, "guessed minimal polynomial");
            return Ok(number);
        }
        trace!(degree, max_bits, "no candidate at this degree");
    }

    Err(AlgebraicError::NoCandidateFound {
        max_degree: options.max_degree,
        max_bits,
    })
}

/// [`guess`] over the real disc `D(center, radius)`.
///
/// # Errors
///
/// Returns `InvalidArgument` for a negative radius, otherwise as
/// [`guess`].
pub fn guess_real(center: &Rational, radius: &Rational, options: &GuessOptions) -> Result<AlgebraicNumber> {
    if radius.is_negative() {
        return Err(AlgebraicError::InvalidArgument("negative radius".into()));
    }
    guess(&Disc::new(ComplexQ::from_real(center.clone()), radius.clone()), options)
}

/// [`guess_real`] with the exact binary values of two floats.
///
/// The radius is the caller's error bound; a zero radius guesses the float
/// itself.
///
/// # Errors
///
/// Returns `InvalidArgument` for non-finite input, otherwise as
/// [`guess_real`].
pub fn guess_f64(value: f64, radius: f64, options: &GuessOptions) -> Result<AlgebraicNumber> {
    let finite = |x: f64| {
        Rational::from_f64(x).ok_or_else(|| AlgebraicError::InvalidArgument(format!("{x} is not finite")))
    };
    guess_real(&finite(value)?, &finite(radius)?, options)
}

fn default_bits(enclosure: &Disc) -> u32 {
    let bits = if enclosure.is_point() {
        let c = enclosure.center();
        [c.re.numerator(), c.re.denominator(), c.im.numerator(), c.im.denominator()]
            .iter()
            .map(Integer::bit_len)
            .max()
            .unwrap_or(1)
    } else {
        usize::try_from(-enclosure.radius().log2_estimate()).unwrap_or(0)
    };
    u32::try_from(bits.max(1)).unwrap_or(u32::MAX)
}

/// The part of the enclosure on the real axis, shrunk to rational
/// endpoints.
fn real_slice(enclosure: &Disc) -> Option<Interval> {
    let c = enclosure.center();
    let r = enclosure.radius();
    if c.im.is_zero() {
        return Some(Interval::ball(&c.re, r));
    }
    let slack = r * r - &c.im * &c.im;
    if slack.is_negative() {
        return None;
    }
    Some(Interval::ball(&c.re, &slack.sqrt_lower(64)))
}

fn guess_rational(enclosure: &Disc, max_bits: u32) -> Option<AlgebraicNumber> {
    let slice = real_slice(enclosure)?;
    let r = simplest_between(slice.lo(), slice.hi());
    let fits = r.numerator().bit_len().max(r.denominator().bit_len()) <= max_bits as usize;
    fits.then(|| AlgebraicNumber::from_rational(r))
}

/// The rational of smallest denominator in `[lo, hi]`, smallest in
/// absolute value among those.
pub(crate) fn simplest_between(lo: &Rational, hi: &Rational) -> Rational {
    if lo.signum() <= 0 && hi.signum() >= 0 {
        return Rational::from(0);
    }
    if hi.is_negative() {
        return -simplest_between(&-hi, &-lo);
    }

    // Continued fraction terms shared by the endpoints.
    let mut terms = Vec::new();
    let (mut lo, mut hi) = (lo.clone(), hi.clone());
    loop {
        let a = lo.floor();
        let a_q = Rational::from_integer(a.clone());
        if a_q == lo {
            terms.push(a_q);
            break;
        }
        let next = &a_q + &Rational::from(1);
        if next <= hi {
            terms.push(next);
            break;
        }
        (lo, hi) = ((&hi - &a_q).recip(), (&lo - &a_q).recip());
        terms.push(a_q);
    }

    let mut value = terms.pop().unwrap_or_else(|| Rational::from(0));
    while let Some(term) = terms.pop() {
        value = term + value.recip();
    }
    value
}

fn guess_degree(
    enclosure: &Disc,
    degree: usize,
    max_bits: u32,
    config: &AlgebraicConfig,
) -> Result<Option<AlgebraicNumber>> {
    let c = enclosure.center();
    let scale = lattice_scale(enclosure, degree, max_bits);
    let imaginary = !c.is_real();
    let width = degree + 1 + if imaginary { 2 } else { 1 };

    let mut rows = Vec::with_capacity(degree + 1);
    let mut power = ComplexQ::one();
    for i in 0..=degree {
        let mut row = vec![Q::from_integer(0); width];
        row[i] = Q::from_integer(1);
        row[degree + 1] = Q::from_big((&power.re * &scale).round());
        if imaginary {
            row[degree + 2] = Q::from_big((&power.im * &scale).round());
        }
        rows.push(row);
        power = &power * c;
    }
    let Some(basis) = DenseMatrix::from_rows(rows) else {
        return Ok(None);
    };
    let reduced = lll_reduce(&basis, &Q::new(3, 4)).basis;

    for i in 0..reduced.num_rows() {
        let coeffs: Option<Vec<Z>> = reduced.row(i)[..=degree]
            .iter()
            .map(|x| x.as_inner().to_integer().map(Z))
            .collect();
        let Some(coeffs) = coeffs else { continue };
        let poly = normalize(&IntPoly::new(coeffs));
        if poly.degree() == 0 || height_bits(&poly) > max_bits as usize {
            continue;
        }
        if let Some(number) = verify(&poly, enclosure, config)? {
            return Ok(Some(number));
        }
    }
    Ok(None)
}

/// `2^k` with `k` large enough to expose relations of `max_bits`-bit
/// coefficients, but no finer than the enclosure supports.
fn lattice_scale(enclosure: &Disc, degree: usize, max_bits: u32) -> Rational {
    let degree = i64::try_from(degree).unwrap_or(i64::MAX);
    let wanted = (degree + 1) * i64::from(max_bits) + 16;
    let bits = if enclosure.is_point() {
        wanted
    } else {
        let size = enclosure.center().abs_upper().max(Rational::from(1)).log2_estimate() + 1;
        let supported = -enclosure.radius().log2_estimate() - degree * size - LATTICE_SLACK_BITS;
        supported.min(wanted).max(1)
    };
    Rational::pow2(bits)
}

/// Accepts `poly` if exactly one of its roots meets the enclosure and that
/// root's isolating disc fits inside it.
fn verify(poly: &IntPoly, enclosure: &Disc, config: &AlgebraicConfig) -> Result<Option<AlgebraicNumber>> {
    if enclosure.is_point() {
        let factors = candidate_factors(poly)?;
        return Ok(match select_root(&factors, enclosure, config)? {
            Selection::Unique { poly, disc } => Some(AlgebraicNumber::from_certified(poly, disc, *config)),
            _ => None,
        });
    }
    let factors = candidate_factors(poly)?;
    let Selection::Unique { poly, disc } = select_root(&factors, enclosure, config)? else {
        return Ok(None);
    };
    let target = enclosure.radius() * &Rational::pow2(-64);
    let disc = refine(&poly, &disc, &target, config)?;
    Ok(enclosure
        .contains_disc(&disc)
        .then(|| AlgebraicNumber::from_certified(poly, disc, *config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn test_simplest_between() {
        assert_eq!(simplest_between(&q(1, 3), &q(1, 2)), q(1, 2));
        assert_eq!(simplest_between(&q(3, 10), &q(7, 20)), q(1, 3));
        assert_eq!(simplest_between(&q(-7, 20), &q(-3, 10)), q(-1, 3));
        assert_eq!(simplest_between(&q(-1, 2), &q(1, 2)), q(0, 1));
        assert_eq!(simplest_between(&q(5, 2), &q(5, 2)), q(5, 2));
        assert_eq!(simplest_between(&q(21, 10), &q(31, 10)), q(3, 1));
    }

    #[test]
    fn test_guess_binary_value_of_float() {
        let x = guess_f64(0.1, 0.0, &GuessOptions::default()).unwrap();
        assert_eq!(
            x.to_rational(),
            Some(Rational::new(
                Integer::new(3_602_879_701_896_397),
                Integer::new(36_028_797_018_963_968)
            ))
        );
    }

    #[test]
    fn test_guess_with_error_bound() {
        let x = guess_f64(0.1, 1e-10, &GuessOptions::default()).unwrap();
        assert_eq!(x.to_rational(), Some(q(1, 10)));
    }

    #[test]
    fn test_guess_quadratic() {
        // The derived budget admits a nearby rational first.
        let loose = guess_f64(std::f64::consts::SQRT_2, 1e-14, &GuessOptions::default()).unwrap();
        assert!(loose.is_rational());

        let options = GuessOptions::default().max_bits(8);
        let x = guess_f64(std::f64::consts::SQRT_2, 1e-14, &options).unwrap();
        assert_eq!(x.minimal_polynomial(), &IntPoly::from_i64s(&[-2, 0, 1]));
        assert!(x.to_f64() > 0.0);
    }

    #[test]
    fn test_guess_complex() {
        // (1 + i√3)/2 is a root of x² - x + 1.
        let center = ComplexQ::new(q(1, 2), Rational::from_f64(0.75f64.sqrt()).unwrap());
        let x = guess(&Disc::new(center, Rational::pow2(-40)), &GuessOptions::default()).unwrap();
        assert_eq!(x.minimal_polynomial(), &IntPoly::from_i64s(&[1, -1, 1]));
        assert!(x.is_upper_half());
    }

    #[test]
    fn test_no_candidate() {
        let options = GuessOptions::with_max_degree(2).max_bits(4);
        let err = guess_f64(std::f64::consts::PI, 1e-15, &options).unwrap_err();
        assert_eq!(err, AlgebraicError::NoCandidateFound { max_degree: 2, max_bits: 4 });
    }

    #[test]
    fn test_guess_carries_config() {
        let config = AlgebraicConfig::default().with_working_precision(256);
        let options = GuessOptions::default().max_bits(8).config(config);

        let root = guess_f64(std::f64::consts::SQRT_2, 1e-14, &options).unwrap();
        assert_eq!(root.degree(), 2);
        assert_eq!(root.config(), config);

        let half = guess_f64(0.5, 0.0, &options).unwrap();
        assert_eq!(half.to_rational(), Some(q(1, 2)));
        assert_eq!(half.config(), config);
    }
}
