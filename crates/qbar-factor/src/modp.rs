//! Dense polynomials over a word-sized prime field.
//!
//! A polynomial is a `Vec<u64>` of residues in ascending degree order with
//! no trailing zeros; the zero polynomial is the empty vector. The field is
//! passed explicitly because the prime is chosen at runtime.

use qbar_integers::PrimeField;
use qbar_poly::IntPoly;
use qbar_rings::Z;

/// A polynomial over `Z/pZ`.
pub type ModPoly = Vec<u64>;

/// Removes trailing zeros.
#[must_use]
pub fn trim(mut a: ModPoly) -> ModPoly {
    while a.last() == Some(&0) {
        a.pop();
    }
    a
}

/// Degree of a nonzero polynomial; `None` for zero.
#[must_use]
pub fn degree(a: &[u64]) -> Option<usize> {
    a.len().checked_sub(1)
}

/// Reduces an integer polynomial modulo `p`.
#[must_use]
pub fn reduce(f: &IntPoly, field: PrimeField) -> ModPoly {
    trim(f.coeffs().iter().map(|c| field.reduce_integer(&c.0)).collect())
}

/// Lifts residues to an integer polynomial with coefficients in `(-p/2, p/2]`.
#[must_use]
pub fn lift_symmetric(a: &[u64], field: PrimeField) -> IntPoly {
    IntPoly::new(a.iter().map(|&c| Z(field.lift_symmetric(c))).collect())
}

/// `a + b`.
#[must_use]
pub fn add(a: &[u64], b: &[u64], field: PrimeField) -> ModPoly {
    let len = a.len().max(b.len());
    trim(
        (0..len)
            .map(|i| field.add(a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0)))
            .collect(),
    )
}

/// `a - b`.
#[must_use]
pub fn sub(a: &[u64], b: &[u64], field: PrimeField) -> ModPoly {
    let len = a.len().max(b.len());
    trim(
        (0..len)
            .map(|i| field.sub(a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0)))
            .collect(),
    )
}

/// `a * b` (schoolbook).
#[must_use]
pub fn mul(a: &[u64], b: &[u64], field: PrimeField) -> ModPoly {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0u64; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            result[i + j] = field.add(result[i + j], field.mul(x, y));
        }
    }
    trim(result)
}

/// Multiplies by a scalar.
#[must_use]
pub fn scale(a: &[u64], c: u64, field: PrimeField) -> ModPoly {
    trim(a.iter().map(|&x| field.mul(x, c)).collect())
}

/// Divides `a` by `b`, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is zero.
#[must_use]
pub fn div_rem(a: &[u64], b: &[u64], field: PrimeField) -> (ModPoly, ModPoly) {
    let Some(&lead) = b.last() else {
        panic!("division by zero polynomial");
    };
    if a.len() < b.len() {
        return (Vec::new(), a.to_vec());
    }
    let Some(lead_inv) = field.inv(lead) else {
        panic!("leading coefficient must be a unit");
    };

    let mut rem = a.to_vec();
    let mut quot = vec![0u64; a.len() - b.len() + 1];
    for shift in (0..quot.len()).rev() {
        let top = rem[shift + b.len() - 1];
        if top == 0 {
            continue;
        }
        let c = field.mul(top, lead_inv);
        quot[shift] = c;
        for (j, &y) in b.iter().enumerate() {
            rem[shift + j] = field.sub(rem[shift + j], field.mul(c, y));
        }
    }
    rem.truncate(b.len() - 1);
    (trim(quot), trim(rem))
}

/// `a mod b`.
#[must_use]
pub fn rem(a: &[u64], b: &[u64], field: PrimeField) -> ModPoly {
    div_rem(a, b, field).1
}

/// Scales to a monic polynomial (zero stays zero).
#[must_use]
pub fn make_monic(a: &[u64], field: PrimeField) -> ModPoly {
    match a.last().and_then(|&lead| field.inv(lead)) {
        Some(inv) => scale(a, inv, field),
        None => a.to_vec(),
    }
}

/// Monic greatest common divisor.
#[must_use]
pub fn gcd(a: &[u64], b: &[u64], field: PrimeField) -> ModPoly {
    let mut x = a.to_vec();
    let mut y = b.to_vec();
    while !y.is_empty() {
        let r = rem(&x, &y, field);
        x = y;
        y = r;
    }
    make_monic(&x, field)
}

/// Extended GCD: returns `(g, s, t)` with `g = s a + t b` monic.
#[must_use]
pub fn extended_gcd(a: &[u64], b: &[u64], field: PrimeField) -> (ModPoly, ModPoly, ModPoly) {
    let mut old_r = a.to_vec();
    let mut r = b.to_vec();
    let mut old_s = vec![1u64];
    let mut s = Vec::new();
    let mut old_t = Vec::new();
    let mut t = vec![1u64];

    while !r.is_empty() {
        let (q, next_r) = div_rem(&old_r, &r, field);
        let next_s = sub(&old_s, &mul(&q, &s, field), field);
        let next_t = sub(&old_t, &mul(&q, &t, field), field);
        old_r = std::mem::replace(&mut r, next_r);
        old_s = std::mem::replace(&mut s, next_s);
        old_t = std::mem::replace(&mut t, next_t);
    }

    match old_r.last().and_then(|&lead| field.inv(lead)) {
        Some(inv) => (
            scale(&old_r, inv, field),
            scale(&old_s, inv, field),
            scale(&old_t, inv, field),
        ),
        None => (Vec::new(), vec![1u64], Vec::new()),
    }
}

/// Formal derivative.
#[must_use]
pub fn derivative(a: &[u64], field: PrimeField) -> ModPoly {
    trim(
        a.iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| field.mul(c, field.reduce(i as u64)))
            .collect(),
    )
}

/// `base^exp mod modulus`.
#[must_use]
pub fn pow_mod(base: &[u64], mut exp: u64, modulus: &[u64], field: PrimeField) -> ModPoly {
    let mut result = rem(&[1u64], modulus, field);
    let mut b = rem(base, modulus, field);
    while exp > 0 {
        if exp & 1 == 1 {
            result = rem(&mul(&result, &b, field), modulus, field);
        }
        exp >>= 1;
        if exp > 0 {
            b = rem(&mul(&b, &b, field), modulus, field);
        }
    }
    result
}

/// Returns true if `a` has no repeated factor modulo `p`.
#[must_use]
pub fn is_squarefree(a: &[u64], field: PrimeField) -> bool {
    let d = derivative(a, field);
    !d.is_empty() && gcd(a, &d, field).len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f7() -> PrimeField {
        PrimeField::new(7)
    }

    #[test]
    fn test_div_rem() {
        // (x^2 + 3x + 2) / (x + 1) = x + 2
        let (q, r) = div_rem(&[2, 3, 1], &[1, 1], f7());
        assert_eq!(q, vec![2, 1]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_gcd_and_extended() {
        // (x+1)(x+2) and (x+1)(x+3)
        let a = mul(&[1, 1], &[2, 1], f7());
        let b = mul(&[1, 1], &[3, 1], f7());
        assert_eq!(gcd(&a, &b, f7()), vec![1, 1]);

        let (g, s, t) = extended_gcd(&[2, 1], &[3, 1], f7());
        assert_eq!(g, vec![1]);
        let combo = add(&mul(&s, &[2, 1], f7()), &mul(&t, &[3, 1], f7()), f7());
        assert_eq!(combo, vec![1]);
    }

    #[test]
    fn test_pow_mod_frobenius() {
        // x^7 = x mod (x^2 - x) since both roots 0 and 1 lie in F_7
        let m = vec![0, 6, 1];
        assert_eq!(pow_mod(&[0, 1], 7, &m, f7()), vec![0, 1]);
    }

    #[test]
    fn test_squarefree_mod_p() {
        assert!(is_squarefree(&[2, 3, 1], f7()));
        assert!(!is_squarefree(&mul(&[1, 1], &[1, 1], f7()), f7()));
    }

    #[test]
    fn test_reduce_and_lift() {
        let f = IntPoly::from_i64s(&[-2, 0, 9]);
        assert_eq!(reduce(&f, f7()), vec![5, 0, 2]);
        assert_eq!(lift_symmetric(&[5, 0, 2], f7()), IntPoly::from_i64s(&[-2, 0, 2]));
    }
}
