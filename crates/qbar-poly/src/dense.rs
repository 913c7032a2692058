//! Dense univariate polynomials.
//!
//! Coefficients are stored in ascending degree order and kept normalized
//! (no trailing zeros, the zero polynomial is the single coefficient `0`).

use qbar_rings::traits::Ring;

/// A dense univariate polynomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order.
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates a polynomial from machine-integer coefficients, lowest first.
    #[must_use]
    pub fn from_i64s(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| R::from_i64(c)).collect())
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree of the polynomial (0 for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) + other.coeff(i)).collect())
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) - other.coeff(i)).collect())
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![R::zero(); n + m - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }

        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c.mul_by_scalar(i64::try_from(i).unwrap_or(i64::MAX)))
                .collect(),
        )
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }

        result
    }

    /// Computes `self(inner(x))` by Horner's scheme over polynomials.
    #[must_use]
    pub fn compose(&self, inner: &Self) -> Self {
        let mut result = Self::zero();
        for c in self.coeffs.iter().rev() {
            result = result.mul(inner).add(&Self::constant(c.clone()));
        }
        result
    }

    /// Computes `self(x^q)`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn substitute_power(&self, q: usize) -> Self {
        assert!(q > 0, "exponent must be positive");
        let mut coeffs = vec![R::zero(); self.degree() * q + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i * q] = c.clone();
        }
        Self::new(coeffs)
    }

    /// Computes `self(-x)`.
    #[must_use]
    pub fn negate_variable(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
                .collect(),
        )
    }

    /// Computes `x^deg · self(1/x)` with `deg = self.degree()`.
    ///
    /// Trailing zero roots of `self` lower the degree of the result.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new(self.coeffs.iter().rev().cloned().collect())
    }

    /// Applies a coefficient map, possibly into another ring.
    #[must_use]
    pub fn map_coeffs<S: Ring>(&self, f: impl FnMut(&R) -> S) -> DensePoly<S> {
        DensePoly::new(self.coeffs.iter().map(f).collect())
    }
}

impl<R: Ring + std::fmt::Display> std::fmt::Display for DensePoly<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let text = c.to_string();
            let (negative, magnitude) = match text.strip_prefix('-') {
                Some(rest) => (true, rest.to_string()),
                None => (false, text),
            };
            if first {
                if negative {
                    write!(f, "-")?;
                }
            } else {
                write!(f, "{}", if negative { " - " } else { " + " })?;
            }
            first = false;

            let unit = magnitude == "1";
            match (i, unit) {
                (0, _) => write!(f, "{magnitude}")?,
                (1, true) => write!(f, "x")?,
                (1, false) => write!(f, "{magnitude}*x")?,
                (_, true) => write!(f, "x^{i}")?,
                (_, false) => write!(f, "{magnitude}*x^{i}")?,
            }
        }
        Ok(())
    }
}
