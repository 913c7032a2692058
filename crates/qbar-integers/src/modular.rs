//! Word-sized prime field arithmetic.
//!
//! Modular images of integer polynomials are the workhorse of the
//! factorization layer. The prime is chosen at runtime (it must avoid the
//! leading coefficient and keep the image squarefree), so the modulus is a
//! value rather than a const parameter.

use crate::Integer;

/// The field `Z/pZ` for a prime `p < 2^32`.
///
/// Elements are plain `u64` residues in `[0, p)`; products go through `u128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimeField {
    p: u64,
}

impl PrimeField {
    /// Creates the field of residues modulo `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p < 2` or `p >= 2^32`.
    #[must_use]
    pub fn new(p: u64) -> Self {
        assert!((2..1 << 32).contains(&p), "modulus must be a word-sized prime");
        Self { p }
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus(self) -> u64 {
        self.p
    }

    /// Reduces a nonnegative machine integer.
    #[must_use]
    pub const fn reduce(self, value: u64) -> u64 {
        value % self.p
    }

    /// Reduces an arbitrary integer to its nonnegative residue.
    #[must_use]
    pub fn reduce_integer(self, value: &Integer) -> u64 {
        value.rem_u64(self.p)
    }

    /// `a + b mod p`.
    #[must_use]
    pub const fn add(self, a: u64, b: u64) -> u64 {
        let s = a + b;
        if s >= self.p {
            s - self.p
        } else {
            s
        }
    }

    /// `a - b mod p`.
    #[must_use]
    pub const fn sub(self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.p - b
        }
    }

    /// `-a mod p`.
    #[must_use]
    pub const fn neg(self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.p - a
        }
    }

    /// `a * b mod p`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn mul(self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.p as u128) as u64
    }

    /// `a^exp mod p` by binary exponentiation.
    #[must_use]
    pub fn pow(self, a: u64, mut exp: u64) -> u64 {
        let mut base = a % self.p;
        let mut result = 1 % self.p;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }
        result
    }

    /// Multiplicative inverse via Fermat; `None` for zero.
    #[must_use]
    pub fn inv(self, a: u64) -> Option<u64> {
        if a % self.p == 0 {
            None
        } else {
            Some(self.pow(a, self.p - 2))
        }
    }

    /// Symmetric lift of a residue into `(-p/2, p/2]`.
    #[must_use]
    pub fn lift_symmetric(self, a: u64) -> Integer {
        if a > self.p / 2 {
            Integer::from(a) - Integer::from(self.p)
        } else {
            Integer::from(a)
        }
    }
}

/// Odd primes below `limit`, by the sieve of Eratosthenes.
#[must_use]
pub fn odd_primes_below(limit: usize) -> Vec<u64> {
    if limit < 4 {
        return Vec::new();
    }
    let mut composite = vec![false; limit];
    let mut primes = Vec::new();
    for n in 2..limit {
        if composite[n] {
            continue;
        }
        if n > 2 {
            primes.push(n as u64);
        }
        let mut multiple = n * n;
        while multiple < limit {
            composite[multiple] = true;
            multiple += n;
        }
    }
    primes
}
