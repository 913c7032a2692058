//! Root certification, selection and refinement.
//!
//! Roots of a squarefree integer polynomial are approximated with the
//! Aberth-Ehrlich iteration, first in `f64` and then in rounded Gaussian
//! rationals, and certified with Smith's inclusion theorem: for distinct
//! approximations `z_i` every root lies in some disc `D(z_i, r_i)` with
//!
//! ```text
//! r_i = n·|p(z_i)| / |lc·∏_{j≠i}(z_i - z_j)|
//! ```
//!
//! and a disc disjoint from the others holds exactly one root. Sturm's
//! real root count decides which approximations are snapped to the real
//! axis, so real roots always get real centers.

use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;
use tracing::{debug, trace};

use qbar_factor::irreducible_factors;
use qbar_integers::Rational;
use qbar_interval::{ComplexQ, Disc};
use qbar_poly::algorithms::sturm::count_real_roots;
use qbar_poly::int_poly::squarefree_part;
use qbar_poly::IntPoly;

use crate::config::AlgebraicConfig;
use crate::error::{AlgebraicError, Result};

/// Significant bits kept in certified radii.
const RADIUS_BITS: u32 = 32;

/// Iteration cap of the floating-point Aberth pass.
const F64_ABERTH_STEPS: usize = 500;

/// Iteration cap of one rational Aberth pass.
const RATIONAL_ABERTH_STEPS: usize = 200;

/// Newton steps allowed per refinement before giving up.
const MAX_REFINE_STEPS: usize = 256;

/// Outcome of matching an approximate location against candidate roots.
#[derive(Clone, Debug)]
pub(crate) enum Selection {
    /// Exactly one root matches; its irreducible factor and an isolating disc.
    Unique {
        /// Irreducible factor, normalized.
        poly: IntPoly,
        /// Isolating disc.
        disc: Disc,
    },
    /// More than one root matches at this precision.
    Ambiguous,
    /// No root matches.
    Missing,
}

/// Splits a polynomial into its distinct irreducible factors.
pub(crate) fn candidate_factors(p: &IntPoly) -> Result<Vec<IntPoly>> {
    if p.is_zero() {
        return Err(AlgebraicError::InvalidArgument(
            "the zero polynomial has no isolated roots".into(),
        ));
    }
    if p.degree() == 0 {
        return Ok(Vec::new());
    }
    irreducible_factors(&squarefree_part(p)).map_err(AlgebraicError::from)
}

/// Evaluates an integer polynomial exactly at a Gaussian rational.
pub(crate) fn horner(p: &IntPoly, z: &ComplexQ) -> ComplexQ {
    p.coeffs().iter().rev().fold(ComplexQ::zero(), |acc, c| {
        &(&acc * z) + &ComplexQ::from_real(Rational::from_integer(c.0.clone()))
    })
}

fn degree_q(p: &IntPoly) -> Rational {
    Rational::from(i64::try_from(p.degree()).unwrap_or(i64::MAX))
}

/// Certified isolating discs for all roots of a squarefree polynomial.
///
/// Precision doubles from the working precision until the certificate
/// holds.
///
/// # Errors
///
/// Returns `InternalConsistency` if the roots cannot be separated at the
/// precision ceiling, which means the polynomial was not squarefree.
pub(crate) fn certify_roots(p: &IntPoly, config: &AlgebraicConfig) -> Result<Vec<Disc>> {
    certify_roots_from(p, config.working_precision, config)
}

fn certify_roots_from(p: &IntPoly, start: u32, config: &AlgebraicConfig) -> Result<Vec<Disc>> {
    match p.degree() {
        0 => return Ok(Vec::new()),
        1 => {
            let root = Rational::new(-p.coeff(0).0, p.coeff(1).0);
            return Ok(vec![Disc::real_point(root)]);
        }
        _ => {}
    }

    let dp = p.derivative();
    let real_count = count_real_roots(p);
    let mut approximations = f64_aberth(p);
    let mut last = start;

    for precision in config.precisions_from(start) {
        last = precision;
        rational_aberth(p, &dp, &mut approximations, precision);
        let mut snapped = approximations.clone();
        snap_real(&mut snapped, real_count);
        if let Some(discs) = smith_discs(p, &snapped) {
            trace!(degree = p.degree(), precision, "certified roots");
            return Ok(discs);
        }
        debug!(degree = p.degree(), precision, "root certification failed, raising precision");
    }

    Err(AlgebraicError::InternalConsistency(format!(
        "roots of a degree {} polynomial not separated at {last} bits",
        p.degree()
    )))
}

/// Aberth-Ehrlich in double precision, for starting points.
fn f64_aberth(p: &IntPoly) -> Vec<ComplexQ> {
    let n = p.degree();
    let coeffs: Vec<f64> = p.coeffs().iter().map(|c| c.0.to_f64()).collect();
    let usable = coeffs.iter().all(|c| c.is_finite()) && coeffs[n] != 0.0;

    // Fujiwara's bound on the root moduli.
    let bound = if usable {
        (0..n)
            .map(|i| {
                let ratio = (coeffs[i] / coeffs[n]).abs();
                let exponent = 1.0 / (n - i) as f64;
                let scale = if i == 0 { 0.5 } else { 1.0 };
                (ratio * scale).powf(exponent)
            })
            .fold(0.0, f64::max)
            * 2.0
    } else {
        1.0
    };
    let radius = if bound.is_finite() && bound > 0.0 { bound } else { 1.0 };

    let mut z: Vec<Complex64> = (0..n)
        .map(|k| {
            let angle = std::f64::consts::TAU * k as f64 / n as f64 + 0.4;
            Complex64::from_polar(radius, angle)
        })
        .collect();

    if usable {
        let eval = |x: Complex64| -> (Complex64, Complex64) {
            let mut value = Complex64::new(0.0, 0.0);
            let mut slope = Complex64::new(0.0, 0.0);
            for &c in coeffs.iter().rev() {
                slope = slope * x + value;
                value = value * x + c;
            }
            (value, slope)
        };

        for _ in 0..F64_ABERTH_STEPS {
            let mut converged = true;
            for i in 0..n {
                let (value, slope) = eval(z[i]);
                if value.norm() == 0.0 || slope.norm() == 0.0 {
                    continue;
                }
                let ratio = value / slope;
                let sum: Complex64 = (0..n)
                    .filter(|&j| j != i)
                    .map(|j| z[i] - z[j])
                    .filter(|d| d.norm() > 0.0)
                    .map(|d| d.inv())
                    .sum();
                let w = ratio / (Complex64::new(1.0, 0.0) - ratio * sum);
                if !w.re.is_finite() || !w.im.is_finite() {
                    continue;
                }
                z[i] -= w;
                if w.norm() > 1e-15 * z[i].norm().max(1e-300) {
                    converged = false;
                }
            }
            if converged {
                break;
            }
        }
    }

    z.iter()
        .enumerate()
        .map(|(k, w)| match (Rational::from_f64(w.re), Rational::from_f64(w.im)) {
            (Some(re), Some(im)) => ComplexQ::new(re, im),
            // Distinct fallback points.
            _ => ComplexQ::new(
                Rational::from_i64(1, 1 + i64::try_from(k).unwrap_or(0)),
                Rational::from_i64(1, 3),
            ),
        })
        .collect()
}

/// Aberth-Ehrlich in Gaussian rationals rounded to `precision` bits.
fn rational_aberth(p: &IntPoly, dp: &IntPoly, z: &mut [ComplexQ], precision: u32) {
    let n = z.len();
    let guard = precision + 16;
    let tolerance = Rational::pow2(-2 * i64::from(precision));
    let nudge = ComplexQ::new(
        Rational::pow2(-i64::from(precision / 2)),
        Rational::pow2(-i64::from(precision / 2 + 1)),
    );

    for i in 0..n {
        z[i] = z[i].round_to_bits(precision);
    }

    for _ in 0..RATIONAL_ABERTH_STEPS {
        let mut converged = true;
        for i in 0..n {
            let value = horner(p, &z[i]);
            if value.is_zero() {
                continue;
            }
            let Some(ratio) = value.div(&horner(dp, &z[i])) else {
                z[i] = &z[i] + &nudge;
                converged = false;
                continue;
            };
            let ratio = ratio.round_to_bits(guard);

            let mut sum = ComplexQ::zero();
            for j in (0..n).filter(|&j| j != i) {
                if let Some(inv) = (&z[i] - &z[j]).inv() {
                    sum = &sum + &inv.round_to_bits(guard);
                }
            }
            let denom = &ComplexQ::one() - &(&ratio * &sum);
            let w = ratio.div(&denom).map_or(ratio, |w| w.round_to_bits(guard));

            let scale = z[i].norm_sq().max(Rational::from(1));
            if w.norm_sq() > &tolerance * &scale {
                converged = false;
            }
            z[i] = (&z[i] - &w).round_to_bits(precision);
        }
        if converged {
            break;
        }
    }
}

/// Puts the `real_count` approximations closest to the real axis on it.
fn snap_real(z: &mut [ComplexQ], real_count: usize) {
    let mut order: Vec<usize> = (0..z.len()).collect();
    order.sort_by(|&a, &b| z[a].im.abs().cmp(&z[b].im.abs()));
    for &i in order.iter().take(real_count) {
        z[i].im = Rational::zero();
    }
}

/// Smith's inclusion discs, if their doubles are pairwise disjoint.
fn smith_discs(p: &IntPoly, z: &[ComplexQ]) -> Option<Vec<Disc>> {
    let n = z.len();
    let lc = Rational::from_integer(p.leading_coeff().0.abs());
    let degree = degree_q(p);

    let radii: Vec<Rational> = (0..n)
        .into_par_iter()
        .map(|i| {
            let value = horner(p, &z[i]);
            if value.is_zero() {
                return Some(Rational::zero());
            }
            let mut denom = lc.clone();
            for j in (0..n).filter(|&j| j != i) {
                let gap = (&z[i] - &z[j]).abs_lower();
                if gap.is_zero() {
                    return None;
                }
                denom = denom * gap;
            }
            Some((&degree * &value.abs_upper() / denom).round_up_relative(RADIUS_BITS))
        })
        .collect::<Option<Vec<_>>>()?;

    // |z_i - z_j| > 2 r_i + 2 r_j keeps every other root out of D(z_i, 2 r_i).
    for i in 0..n {
        for j in i + 1..n {
            let reach = (&radii[i] + &radii[j]) * Rational::from(2);
            if (&z[i] - &z[j]).norm_sq() <= &reach * &reach {
                return None;
            }
        }
    }

    Some(
        z.iter()
            .zip(radii)
            .map(|(c, r)| Disc::new(c.clone(), r))
            .collect(),
    )
}

/// Matches `approx` against the roots of `factors`.
///
/// Factors whose disc evaluation over `approx` excludes zero are skipped;
/// the certified roots of the others that meet `approx` are refined to a
/// quarter of its radius and kept if they still meet it.
///
/// # Errors
///
/// Propagates certification failures.
pub(crate) fn select_root(
    factors: &[IntPoly],
    approx: &Disc,
    config: &AlgebraicConfig,
) -> Result<Selection> {
    if approx.is_point() {
        return Ok(select_exact(factors, approx.center()));
    }

    let bits = evaluation_bits(approx, config);
    let hits: Vec<(IntPoly, Disc)> = factors
        .par_iter()
        .filter(|f| approx.eval_poly_rounded(f, bits).contains_zero())
        .map(|f| -> Result<Vec<(IntPoly, Disc)>> {
            let discs = certify_roots(f, config)?;
            Ok(discs
                .into_iter()
                .filter(|d| d.intersects(approx))
                .map(|d| (f.clone(), d))
                .collect())
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    let target = approx.radius() * &Rational::from_i64(1, 4);
    let mut survivors = Vec::new();
    for (f, d) in hits {
        let d = refine(&f, &d, &target, config)?;
        if d.intersects(approx) {
            survivors.push((f, d));
        }
    }

    Ok(match survivors.len() {
        0 => Selection::Missing,
        1 => {
            let (poly, disc) = survivors.swap_remove(0);
            Selection::Unique { poly, disc }
        }
        _ => Selection::Ambiguous,
    })
}

/// A point location matches only an exact root.
fn select_exact(factors: &[IntPoly], z: &ComplexQ) -> Selection {
    factors
        .iter()
        .find(|f| horner(f, z).is_zero())
        .map_or(Selection::Missing, |f| Selection::Unique {
            poly: f.clone(),
            disc: Disc::point(z.clone()),
        })
}

fn evaluation_bits(approx: &Disc, config: &AlgebraicConfig) -> u32 {
    let wanted = 16 - approx.radius().log2_estimate();
    u32::try_from(wanted.max(i64::from(config.working_precision))).unwrap_or(u32::MAX)
}

/// Shrinks an isolating disc of a root of the squarefree `p` until its
/// radius is at most `target`, keeping isolation.
///
/// Each Newton step from the center `z` proposes `D(z', n·|p(z')/p'(z')|)`
/// and is accepted only when its double lies in the current double. When
/// a step is rejected the roots are recertified at higher precision and
/// the unique certified disc meeting the current one is taken.
///
/// # Errors
///
/// Returns `InvalidArgument` for a zero target on a non-point disc, and
/// `InternalConsistency` if no progress can be made.
pub(crate) fn refine(
    p: &IntPoly,
    disc: &Disc,
    target: &Rational,
    config: &AlgebraicConfig,
) -> Result<Disc> {
    if disc.radius() <= target {
        return Ok(disc.clone());
    }
    if target.is_zero() || target.is_negative() {
        return Err(AlgebraicError::InvalidArgument(
            "refinement target must be positive".into(),
        ));
    }

    let dp = p.derivative();
    let mut current = disc.clone();
    let mut fallback_precision = config.working_precision;

    for _ in 0..MAX_REFINE_STEPS {
        if current.radius() <= target {
            return Ok(current);
        }
        let bits = newton_bits(&current, target, config);
        let accepted = newton_step(p, &dp, &current, bits).filter(|next| {
            next.radius() < current.radius() && current.doubled().contains_disc(&next.doubled())
        });

        match accepted {
            Some(next) => {
                trace!(bits, radius = %next.radius().to_f64(), "newton step accepted");
                current = next;
            }
            None => {
                fallback_precision = fallback_precision.max(bits);
                debug!(precision = fallback_precision, "newton step rejected, recertifying");
                current = recertify(p, &current, fallback_precision, config)?;
                fallback_precision = fallback_precision.saturating_mul(2);
            }
        }
    }

    if current.radius() <= target {
        Ok(current)
    } else {
        Err(AlgebraicError::InternalConsistency(
            "root refinement did not converge".into(),
        ))
    }
}

fn newton_bits(disc: &Disc, target: &Rational, config: &AlgebraicConfig) -> u32 {
    let have = -disc.radius().log2_estimate();
    let want = -target.log2_estimate();
    let bits = (2 * have + 16)
        .min(want + 32)
        .max(i64::from(config.working_precision));
    u32::try_from(bits).unwrap_or(u32::MAX)
}

fn newton_step(p: &IntPoly, dp: &IntPoly, disc: &Disc, bits: u32) -> Option<Disc> {
    let z = disc.center();
    let value = horner(p, z);
    if value.is_zero() {
        return Some(Disc::point(z.clone()));
    }
    let step = value.div(&horner(dp, z))?;
    let next = (z - &step).round_to_bits(bits);

    let value = horner(p, &next);
    if value.is_zero() {
        return Some(Disc::point(next));
    }
    let slope = horner(dp, &next).abs_lower();
    if slope.is_zero() {
        return None;
    }
    let radius = (degree_q(p) * value.abs_upper() / slope).round_up_relative(RADIUS_BITS);
    Some(Disc::new(next, radius))
}

/// Recertifies all roots and keeps the one meeting `current`.
fn recertify(p: &IntPoly, current: &Disc, start: u32, config: &AlgebraicConfig) -> Result<Disc> {
    let mut last = start;
    for precision in config.precisions_from(start) {
        last = precision;
        let discs = certify_roots_from(p, precision, config)?;
        let mut meeting = discs.into_iter().filter(|d| d.intersects(current));
        if let (Some(d), None) = (meeting.next(), meeting.next()) {
            if d.radius() < current.radius() {
                return Ok(d);
            }
        }
    }
    Err(AlgebraicError::InternalConsistency(format!(
        "root could not be separated at {last} bits"
    )))
}
