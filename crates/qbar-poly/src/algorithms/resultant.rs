//! Resultants via the Sylvester matrix.
//!
//! `resultant` works over any Euclidean domain with exact division (Bareiss
//! elimination). `parametric_resultant` eliminates `x` from `f(x)` and a
//! family `g_t(x)` whose coefficients depend polynomially on an integer
//! parameter `t`, returning the resultant as a polynomial in `t`. This is
//! how annihilating polynomials of sums, products and powers of algebraic
//! numbers are built.

use rayon::prelude::*;

use qbar_integers::Integer;
use qbar_rings::traits::EuclideanDomain;
use qbar_rings::{Q, Z};

use crate::algorithms::interpolate::newton_interpolate;
use crate::dense::DensePoly;
use crate::int_poly::{from_rational_poly, IntPoly};

/// Computes the resultant of two univariate polynomials given as
/// coefficient slices `[c_0, c_1, ..., c_n]` (the last entry is taken as the
/// leading coefficient even if it is zero).
///
/// The resultant vanishes iff `f` and `g` share a root (or both leading
/// coefficients vanish).
#[must_use]
pub fn resultant<R: EuclideanDomain>(f: &[R], g: &[R]) -> R {
    if f.is_empty() || g.is_empty() {
        return R::zero();
    }

    let deg_f = f.len() - 1;
    let deg_g = g.len() - 1;

    if deg_f == 0 {
        return f[0].pow(u32::try_from(deg_g).unwrap_or(u32::MAX));
    }
    if deg_g == 0 {
        return g[0].pow(u32::try_from(deg_f).unwrap_or(u32::MAX));
    }

    determinant(build_sylvester_matrix(f, g))
}

/// Builds the Sylvester matrix: `deg g` shifted rows of `f` followed by
/// `deg f` shifted rows of `g`, coefficients in descending order.
fn build_sylvester_matrix<R: EuclideanDomain>(f: &[R], g: &[R]) -> Vec<Vec<R>> {
    let deg_f = f.len() - 1;
    let deg_g = g.len() - 1;
    let size = deg_f + deg_g;

    let mut matrix = vec![vec![R::zero(); size]; size];
    for i in 0..deg_g {
        for (j, coeff) in f.iter().rev().enumerate() {
            matrix[i][i + j] = coeff.clone();
        }
    }
    for i in 0..deg_f {
        for (j, coeff) in g.iter().rev().enumerate() {
            matrix[deg_g + i][i + j] = coeff.clone();
        }
    }
    matrix
}

/// Determinant by Bareiss fraction-free elimination.
fn determinant<R: EuclideanDomain>(mut m: Vec<Vec<R>>) -> R {
    let n = m.len();
    if n == 0 {
        return R::one();
    }

    let mut negate = false;
    let mut prev_pivot = R::one();

    for k in 0..n - 1 {
        let Some(pivot_row) = (k..n).find(|&i| !m[i][k].is_zero()) else {
            return R::zero();
        };
        if pivot_row != k {
            m.swap(k, pivot_row);
            negate = !negate;
        }

        let pivot = m[k][k].clone();
        for i in k + 1..n {
            for j in k + 1..n {
                let numerator = m[i][j].clone() * pivot.clone() - m[i][k].clone() * m[k][j].clone();
                m[i][j] = if prev_pivot.is_one() {
                    numerator
                } else {
                    numerator.div(&prev_pivot)
                };
            }
            m[i][k] = R::zero();
        }
        prev_pivot = pivot;
    }

    let det = m[n - 1][n - 1].clone();
    if negate {
        -det
    } else {
        det
    }
}

/// Computes `R(t) = Res_x(f(x), g_t(x))` as a polynomial in `t`.
///
/// `g_at(t)` must return `g_t` for every integer `t` with the same degree
/// in `x`, and `degree_bound` must bound `deg_t R`. The resultant is
/// evaluated at `degree_bound + 1` consecutive integers in parallel and
/// recovered by interpolation.
#[must_use]
pub fn parametric_resultant<G>(f: &IntPoly, degree_bound: usize, g_at: G) -> IntPoly
where
    G: Fn(&Integer) -> IntPoly + Sync,
{
    let points: Vec<(Q, Q)> = (0..=degree_bound)
        .into_par_iter()
        .map(|t| {
            let t = Integer::from(t as u64);
            let g = g_at(&t);
            let value = resultant::<Z>(f.coeffs(), g.coeffs());
            (Q::from_big(t), Q::from_big(value.0))
        })
        .collect();

    let interpolated: DensePoly<Q> = newton_interpolate(&points);
    from_rational_poly(&interpolated)
}
