//! Rigorous enclosures of π and of `e^{iθ}`.
//!
//! Everything is computed in fixed point, as integers scaled by `2^w`,
//! with a running bound on the truncation error.

use num_traits::{One, Zero};
use qbar_integers::{Integer, Rational};

use crate::complex::ComplexQ;
use crate::disc::Disc;
use crate::interval::Interval;

/// Extra bits carried internally beyond the requested precision.
const GUARD_BITS: u32 = 16;

/// An interval of width at most `2^-bits` (roughly) containing π.
///
/// Uses Machin's formula `π = 16·atan(1/5) - 4·atan(1/239)`.
#[must_use]
pub fn pi(bits: u32) -> Interval {
    let work = bits + GUARD_BITS;
    let scale = Integer::pow2(work);
    let (a5, e5) = arctan_recip(5, &scale);
    let (a239, e239) = arctan_recip(239, &scale);

    let approx = Integer::new(16) * a5 - Integer::new(4) * a239;
    let err = Integer::from(16 * e5 + 4 * e239);
    let denom = Rational::from_integer(scale);
    Interval::new(
        Rational::from_integer(&approx - &err) / &denom,
        Rational::from_integer(&approx + &err) / &denom,
    )
}

/// `scale·atan(1/k)` truncated, with a bound on the absolute error in
/// units of `1/scale`.
fn arctan_recip(k: u64, scale: &Integer) -> (Integer, u64) {
    let k = Integer::from(k);
    let k2 = &k * &k;
    // power_j = floor(scale / k^(2j+1)); each term is an exact floor.
    let mut power = scale / &k;
    let mut sum = power.clone();
    let mut j = 1u64;
    loop {
        power = &power / &k2;
        if power.is_zero() {
            break;
        }
        let term = &power / &Integer::from(2 * j + 1);
        sum = if j % 2 == 1 { sum - term } else { sum + term };
        j += 1;
    }
    // One unit per truncated term plus the alternating tail.
    (sum, j + 1)
}

/// A disc of radius about `2^-bits` containing `e^{iθ} = cos θ + i sin θ`.
///
/// Large arguments are halved until `|θ| <= 1` and the result squared back.
#[must_use]
pub fn exp_i(theta: &Rational, bits: u32) -> Disc {
    let half = Rational::from_i64(1, 2);
    let mut x = theta.clone();
    let mut halvings = 0u32;
    while x.abs() > Rational::one() {
        x = x * &half;
        halvings += 1;
    }

    let work = bits + 2 * halvings + GUARD_BITS;
    let mut z = exp_i_small(&x, work);
    for _ in 0..halvings {
        z = z.mul(&z).round(work);
    }
    z.round(bits + 2)
}

/// Taylor series of `e^{ix}` for `|x| <= 1` in `work`-bit fixed point.
fn exp_i_small(x: &Rational, work: u32) -> Disc {
    let scale = Integer::pow2(work);
    let scale_q = Rational::from_integer(scale.clone());
    let fixed = (x * &scale_q).round();
    let negative = fixed.is_negative();
    let magnitude = fixed.abs();

    // e^{ix'} for x' = fixed / scale; |x - x'| <= 2^-(work+1).
    let mut re = Integer::zero();
    let mut im = Integer::zero();
    let mut term = scale.clone();
    let mut k = 0u64;
    while !term.is_zero() {
        // (i x')^k = i^k sign^k |x'|^k
        let flip = negative && k % 2 == 1;
        let signed = if flip { -term.clone() } else { term.clone() };
        match k % 4 {
            0 => re = re + signed,
            1 => im = im + signed,
            2 => re = re - signed,
            _ => im = im - signed,
        }
        k += 1;
        term = (&term * &magnitude) / (&scale * &Integer::from(k));
    }

    // Each term is off by at most 2 units, the tail after the first
    // vanishing term is at most 6 units. The factor 2 covers √2.
    let units = Integer::from(2 * (2 * k + 6));
    let radius = Rational::from_integer(units) / &scale_q + Rational::pow2(-i64::from(work) - 1);
    Disc::new(
        ComplexQ::new(
            Rational::from_integer(re) / &scale_q,
            Rational::from_integer(im) / &scale_q,
        ),
        radius,
    )
}

/// Intervals containing `cos θ` and `sin θ`.
#[must_use]
pub fn cos_sin(theta: &Rational, bits: u32) -> (Interval, Interval) {
    let z = exp_i(theta, bits);
    (z.real_part(), z.imag_part())
}

/// A disc of radius about `2^-bits` containing `e^{iπr}`.
///
/// Multiples of `1/2` give exact point discs.
#[must_use]
pub fn exp_i_pi(r: &Rational, bits: u32) -> Disc {
    let two = Rational::from(2);
    let reduced = r - &(Rational::from_integer((r / &two).round()) * &two);

    if (&reduced * &two).is_integer() {
        let quarter = (&reduced * &two).to_integer().and_then(|n| n.to_i64()).unwrap_or(0);
        let z = match quarter.rem_euclid(4) {
            0 => ComplexQ::one(),
            1 => ComplexQ::i(),
            2 => -ComplexQ::one(),
            _ => -ComplexQ::i(),
        };
        return Disc::point(z);
    }

    let work = bits + GUARD_BITS;
    let theta = pi(work).scale(&reduced);
    let mid = theta.midpoint().round_to_bits(work);
    let spread = (theta.lo() - &mid).abs().max((theta.hi() - &mid).abs());

    let z = exp_i(&mid, work);
    // |e^{iθ} - e^{i·mid}| <= |θ - mid|
    z.with_radius(z.radius() + &spread).round(bits + 2)
}
