//! Factorization over Z by the Berlekamp-Zassenhaus method.
//!
//! A squarefree primitive polynomial is factored modulo a suitable prime
//! with Cantor-Zassenhaus, the factors are Hensel lifted past the Mignotte
//! bound, and true factors are recovered by trying products of subsets of
//! the lifted factors.

use rayon::prelude::*;
use smallvec::SmallVec;

use qbar_integers::{odd_primes_below, Integer, PrimeField};
use qbar_poly::algorithms::gcd::primitive_part;
use qbar_poly::int_poly::{exact_quotient, norm2_squared, normalize};
use qbar_poly::IntPoly;
use qbar_rings::Z;

use crate::cantor_zassenhaus::cantor_zassenhaus_factor;
use crate::error::{FactorError, Result};
use crate::hensel::{hensel_lift, mod_floor, HenselLiftResult};
use crate::modp::{self, ModPoly};
use crate::squarefree::squarefree_factorization;

/// Primes below this bound are tried for the modular image.
const PRIME_LIMIT: usize = 1 << 16;

/// Number of admissible primes to compare before choosing one.
const PRIME_CANDIDATES: usize = 6;

/// Complete factorization over Z.
#[derive(Clone, Debug)]
pub struct Factorization {
    /// Signed content.
    pub content: Z,
    /// Irreducible primitive factors with positive leading coefficient, and
    /// their multiplicities.
    pub factors: Vec<(IntPoly, u32)>,
}

/// Factors a nonzero integer polynomial into irreducibles.
///
/// # Errors
///
/// Propagates [`factor_squarefree`] failures.
pub fn factor(f: &IntPoly) -> Result<Factorization> {
    let sf = squarefree_factorization(f);
    let parts = sf
        .factors
        .par_iter()
        .map(|part| {
            let factors = factor_squarefree(&part.factor)?;
            Ok(factors.into_iter().map(|g| (g, part.multiplicity)).collect::<Vec<_>>())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Factorization {
        content: sf.content,
        factors: parts.into_iter().flatten().collect(),
    })
}

/// Returns the distinct irreducible factors of `f` of positive degree.
///
/// # Errors
///
/// Propagates [`factor_squarefree`] failures.
pub fn irreducible_factors(f: &IntPoly) -> Result<Vec<IntPoly>> {
    Ok(factor(f)?.factors.into_iter().map(|(g, _)| g).collect())
}

/// Factors a squarefree polynomial of positive degree.
///
/// The factors are primitive with positive leading coefficient.
///
/// # Errors
///
/// Returns `NoAdmissiblePrime` if every prime below the search limit
/// divides the leading coefficient or the discriminant.
pub fn factor_squarefree(f: &IntPoly) -> Result<Vec<IntPoly>> {
    let mut f = normalize(f);
    let mut factors = Vec::new();

    if f.degree() == 0 {
        return Ok(factors);
    }
    if f.coeff(0).0.signum() == 0 {
        factors.push(IntPoly::x());
        f = normalize(&IntPoly::new(f.coeffs()[1..].to_vec()));
    }

    match f.degree() {
        0 => return Ok(factors),
        1 => {
            factors.push(f);
            return Ok(factors);
        }
        _ => {}
    }

    let (field, modular) = choose_prime(&f)?;
    if modular.len() <= 1 {
        factors.push(f);
        return Ok(factors);
    }

    let k = lifting_exponent(&f, field.modulus());
    let lifted = hensel_lift(&f, &modular, field, k)?;
    factors.extend(recombine(&f, &lifted));
    Ok(factors)
}

/// Picks the admissible prime (not dividing the leading coefficient, image
/// squarefree) with the fewest modular factors among the first few.
fn choose_prime(f: &IntPoly) -> Result<(PrimeField, Vec<ModPoly>)> {
    let mut best: Option<(PrimeField, Vec<ModPoly>)> = None;
    let mut tried = 0;

    for p in odd_primes_below(PRIME_LIMIT) {
        let field = PrimeField::new(p);
        if f.leading_coeff().0.rem_u64(p) == 0 {
            continue;
        }
        let image = modp::reduce(f, field);
        if !modp::is_squarefree(&image, field) {
            continue;
        }

        let modular = cantor_zassenhaus_factor(&image, field);
        if modular.len() == 1 {
            return Ok((field, modular));
        }
        if best.as_ref().map_or(true, |(_, b)| modular.len() < b.len()) {
            best = Some((field, modular));
        }

        tried += 1;
        if tried == PRIME_CANDIDATES {
            break;
        }
    }

    best.ok_or(FactorError::NoAdmissiblePrime { limit: PRIME_LIMIT })
}

/// Smallest `k` with `p^k > 2 |lc| 2^n ‖f‖₂`.
fn lifting_exponent(f: &IntPoly, p: u64) -> u32 {
    let norm = norm2_squared(f).isqrt() + Integer::new(1);
    let n = u32::try_from(f.degree()).unwrap_or(u32::MAX);
    let bound = Integer::new(2) * f.leading_coeff().0.abs() * Integer::pow2(n) * norm;

    let p = Integer::from(p);
    let mut power = p.clone();
    let mut k = 1;
    while power <= bound {
        power = &power * &p;
        k += 1;
    }
    k
}

/// Symmetric residue of `a` modulo `m`.
fn symmetric(a: &Integer, m: &Integer) -> Integer {
    let r = mod_floor(a, m);
    if &r + &r > *m {
        r - m.clone()
    } else {
        r
    }
}

/// Lifted subset product, scaled by `lc`, in symmetric representation.
fn candidate_from(subset: &[usize], lifted: &HenselLiftResult, lc: &Z) -> IntPoly {
    let m = &lifted.modulus;
    let product = subset.iter().fold(IntPoly::constant(lc.clone()), |acc, &i| {
        let prod = acc.mul(&lifted.factors[i]);
        prod.map_coeffs(|c| Z(mod_floor(&c.0, m)))
    });
    product.map_coeffs(|c| Z(symmetric(&c.0, m)))
}

/// Recovers the true factors from the lifted modular factors.
fn recombine(f: &IntPoly, lifted: &HenselLiftResult) -> Vec<IntPoly> {
    let mut remaining: Vec<usize> = (0..lifted.factors.len()).collect();
    let mut g = f.clone();
    let mut found = Vec::new();
    let mut size = 1;

    while 2 * size <= remaining.len() {
        let lc = g.leading_coeff().clone();
        let target_const = &lc.0 * &g.coeff(0).0;
        let mut hit = None;

        for positions in Combinations::new(remaining.len(), size) {
            let subset: SmallVec<[usize; 8]> = positions.iter().map(|&j| remaining[j]).collect();
            let candidate = candidate_from(&subset, lifted, &lc);

            // The constant term of a true factor divides lc · g(0).
            let c0 = candidate.coeff(0).0;
            if c0.signum() == 0 || mod_floor(&target_const, &c0.abs()).signum() != 0 {
                continue;
            }

            let candidate = primitive_part(&candidate);
            if let Some(quotient) = exact_quotient(&g, &candidate) {
                hit = Some((positions, candidate, quotient));
                break;
            }
        }

        match hit {
            Some((positions, candidate, quotient)) => {
                found.push(normalize(&candidate));
                g = quotient;
                for &j in positions.iter().rev() {
                    remaining.remove(j);
                }
            }
            None => size += 1,
        }
    }

    if g.degree() > 0 {
        found.push(normalize(&g));
    }
    found
}

/// Lexicographic `k`-subsets of `0..n`.
struct Combinations {
    n: usize,
    current: SmallVec<[usize; 8]>,
    started: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (0..k).collect(),
            started: false,
        }
    }
}

impl Iterator for Combinations {
    type Item = SmallVec<[usize; 8]>;

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.current.len();
        if k > self.n {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current.clone());
        }

        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.current[i] < self.n - k + i {
                self.current[i] += 1;
                for j in i + 1..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
                return Some(self.current.clone());
            }
        }
        None
    }
}

/// Multiplies a factorization back out.
#[cfg(test)]
pub(crate) fn expand(factorization: &Factorization) -> IntPoly {
    factorization
        .factors
        .iter()
        .fold(IntPoly::constant(factorization.content.clone()), |acc, (f, m)| {
            acc.mul(&f.pow(*m))
        })
}
