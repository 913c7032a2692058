//! Cantor-Zassenhaus factorization over `Z/pZ` for odd primes.
//!
//! Distinct-degree factorization splits a squarefree polynomial by the
//! degrees of its irreducible factors; the equal-degree step then splits
//! each part with random elements `a^((p^d - 1)/2) - 1`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use qbar_integers::PrimeField;

use crate::modp::{self, ModPoly};

/// Factors a squarefree polynomial modulo an odd prime into monic
/// irreducible factors.
///
/// # Panics
///
/// Panics if the modulus is 2.
#[must_use]
pub fn cantor_zassenhaus_factor(f: &[u64], field: PrimeField) -> Vec<ModPoly> {
    assert!(field.modulus() > 2, "equal-degree splitting needs an odd prime");
    let f = modp::make_monic(f, field);
    match modp::degree(&f) {
        None | Some(0) => return Vec::new(),
        Some(1) => return vec![f],
        _ => {}
    }

    let mut rng = ChaCha8Rng::seed_from_u64(field.modulus());
    let mut factors = Vec::new();
    for (d, part) in distinct_degree_factorization(&f, field) {
        if part.len() - 1 == d {
            factors.push(part);
        } else {
            factors.extend(equal_degree_factorization(&part, d, field, &mut rng));
        }
    }
    factors
}

/// Computes `x^(p^k) mod f` from `x^(p^(k-1)) mod f`.
fn frobenius(g: &[u64], f: &[u64], field: PrimeField) -> ModPoly {
    modp::pow_mod(g, field.modulus(), f, field)
}

/// Splits a monic squarefree `f` into products of irreducible factors of
/// equal degree, returned as `(degree, product)` pairs.
fn distinct_degree_factorization(f: &[u64], field: PrimeField) -> Vec<(usize, ModPoly)> {
    let x = vec![0u64, 1];
    let mut result = Vec::new();
    let mut h = f.to_vec();
    let mut x_pow = x.clone();
    let mut d = 0;

    while h.len() - 1 >= 2 * (d + 1) {
        d += 1;
        x_pow = frobenius(&x_pow, &h, field);
        let g = modp::gcd(&h, &modp::sub(&x_pow, &x, field), field);
        if g.len() > 1 {
            h = modp::div_rem(&h, &g, field).0;
            x_pow = modp::rem(&x_pow, &h, field);
            result.push((d, g));
        }
    }

    if h.len() > 1 {
        result.push((h.len() - 1, h));
    }
    result
}

/// Splits a monic product of irreducibles of degree `d`.
fn equal_degree_factorization(
    f: &[u64],
    d: usize,
    field: PrimeField,
    rng: &mut ChaCha8Rng,
) -> Vec<ModPoly> {
    let mut pending = vec![f.to_vec()];
    let mut done = Vec::new();

    while let Some(g) = pending.pop() {
        if g.len() - 1 == d {
            done.push(g);
            continue;
        }
        let (a, b) = split(&g, d, field, rng);
        pending.push(a);
        pending.push(b);
    }
    done
}

/// Finds a nontrivial monic splitting `g = a · b`.
fn split(g: &[u64], d: usize, field: PrimeField, rng: &mut ChaCha8Rng) -> (ModPoly, ModPoly) {
    let n = g.len() - 1;
    let p = field.modulus();
    loop {
        let a = modp::trim((0..n).map(|_| rng.gen_range(0..p)).collect());
        if a.len() < 2 {
            continue;
        }

        let direct = modp::gcd(&a, g, field);
        if direct.len() > 1 && direct.len() < g.len() {
            let other = modp::div_rem(g, &direct, field).0;
            return (direct, other);
        }

        // a^((p^d - 1)/2) = (a · a^p · ... · a^(p^(d-1)))^((p - 1)/2)
        let mut norm = a.clone();
        let mut conj = a.clone();
        for _ in 1..d {
            conj = frobenius(&conj, g, field);
            norm = modp::rem(&modp::mul(&norm, &conj, field), g, field);
        }
        let power = modp::pow_mod(&norm, (p - 1) / 2, g, field);
        let candidate = modp::gcd(g, &modp::sub(&power, &[1], field), field);
        if candidate.len() > 1 && candidate.len() < g.len() {
            let other = modp::div_rem(g, &candidate, field).0;
            return (candidate, other);
        }
    }
}
