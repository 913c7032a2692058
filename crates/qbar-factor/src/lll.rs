//! LLL (Lenstra-Lenstra-Lovász) lattice reduction.
//!
//! The reduced basis satisfies
//! - size reduction: |μ_ij| ≤ 1/2 for j < i
//! - the Lovász condition: ‖b*_k‖² ≥ (δ - μ²_{k,k-1}) ‖b*_{k-1}‖²
//!
//! so the first vector is within a factor `2^((n-1)/2)` of the shortest
//! lattice vector. Arithmetic is exact over Q; the Gram-Schmidt data is
//! updated in place on size reduction and recomputed after a swap.

use qbar_linalg::DenseMatrix;
use qbar_rings::traits::{Field, Ring};
use qbar_rings::Q;

/// Result of LLL reduction.
#[derive(Clone, Debug)]
pub struct LllResult {
    /// The reduced basis as a matrix (rows are basis vectors).
    pub basis: DenseMatrix<Q>,
    /// Number of LLL iterations performed.
    pub iterations: usize,
}

/// Gram-Schmidt data of the current basis.
struct GramSchmidt {
    /// μ[i][j] = <b_i, b*_j> / ‖b*_j‖² for j < i.
    mu: Vec<Vec<Q>>,
    /// ‖b*_i‖².
    norms: Vec<Q>,
}

/// Performs LLL reduction on a lattice basis.
///
/// `basis` holds one basis vector per row; `delta` is the Lovász
/// parameter, in `(1/4, 1]` (3/4 is the classic choice).
#[must_use]
pub fn lll_reduce(basis: &DenseMatrix<Q>, delta: &Q) -> LllResult {
    let n = basis.num_rows();
    let mut b: Vec<Vec<Q>> = (0..n).map(|i| basis.row(i).to_vec()).collect();
    let mut iterations = 0;

    if n > 1 {
        let mut gs = gram_schmidt(&b);
        let mut k = 1;
        while k < n {
            iterations += 1;
            for j in (0..k).rev() {
                size_reduce(&mut b, &mut gs, k, j);
            }

            if satisfies_lovasz(&gs, k, delta) {
                k += 1;
            } else {
                b.swap(k - 1, k);
                gs = gram_schmidt(&b);
                k = (k - 1).max(1);
            }
        }
    }

    let basis = match DenseMatrix::from_rows(b) {
        Some(m) => m,
        None => unreachable!("rows keep their length"),
    };
    LllResult { basis, iterations }
}

fn dot(a: &[Q], b: &[Q]) -> Q {
    a.iter()
        .zip(b)
        .fold(Q::zero(), |acc, (x, y)| acc + x.clone() * y.clone())
}

fn gram_schmidt(b: &[Vec<Q>]) -> GramSchmidt {
    let n = b.len();
    let mut star: Vec<Vec<Q>> = Vec::with_capacity(n);
    let mut mu = vec![vec![Q::zero(); n]; n];
    let mut norms = Vec::with_capacity(n);

    for i in 0..n {
        let mut v = b[i].clone();
        for j in 0..i {
            if norms[j] == Q::zero() {
                continue;
            }
            let coeff = dot(&b[i], &star[j]).field_div(&norms[j]);
            for (vc, sc) in v.iter_mut().zip(&star[j]) {
                *vc = vc.clone() - coeff.clone() * sc.clone();
            }
            mu[i][j] = coeff;
        }
        norms.push(dot(&v, &v));
        star.push(v);
    }

    GramSchmidt { mu, norms }
}

/// Rounds a rational to the nearest integer, ties toward +∞.
fn nearest_integer(q: &Q) -> Q {
    Q::from_big(q.as_inner().round())
}

/// Makes |μ_kj| ≤ 1/2 by subtracting a multiple of b_j from b_k.
fn size_reduce(b: &mut [Vec<Q>], gs: &mut GramSchmidt, k: usize, j: usize) {
    let r = nearest_integer(&gs.mu[k][j]);
    if r.is_zero() {
        return;
    }

    let (head, tail) = b.split_at_mut(k);
    for (x, y) in tail[0].iter_mut().zip(&head[j]) {
        *x = x.clone() - r.clone() * y.clone();
    }

    for l in 0..j {
        gs.mu[k][l] = gs.mu[k][l].clone() - r.clone() * gs.mu[j][l].clone();
    }
    gs.mu[k][j] = gs.mu[k][j].clone() - r;
}

fn satisfies_lovasz(gs: &GramSchmidt, k: usize, delta: &Q) -> bool {
    let mu = gs.mu[k][k - 1].clone();
    let threshold = (delta.clone() - mu.clone() * mu) * gs.norms[k - 1].clone();
    gs.norms[k] >= threshold
}

#[cfg(test)]
pub(crate) fn vector_norm_squared(v: &[Q]) -> Q {
    dot(v, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basis(rows: &[&[i64]]) -> DenseMatrix<Q> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Q::from_integer(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_lll_identity() {
        let b = basis(&[&[1, 0], &[0, 1]]);
        let result = lll_reduce(&b, &Q::new(3, 4));
        assert_eq!(result.basis, b);
    }

    #[test]
    fn test_lll_reduces_skewed_basis() {
        // Same lattice as Z^2
        let b = basis(&[&[1, 1], &[0, 1]]);
        let result = lll_reduce(&b, &Q::new(3, 4));
        for i in 0..2 {
            assert_eq!(vector_norm_squared(result.basis.row(i)), Q::from_integer(1));
        }
    }

    #[test]
    fn test_lll_classic_example() {
        let b = basis(&[&[1, 1, 1], &[-1, 0, 2], &[3, 5, 6]]);
        let result = lll_reduce(&b, &Q::new(3, 4));
        // The lattice contains (0, 1, 0), and the volume |det| = 3 is kept.
        assert_eq!(vector_norm_squared(result.basis.row(0)), Q::from_integer(1));
        assert_eq!(result.basis.det().as_inner().abs(), qbar_integers::Rational::from(3i64));
    }

    #[test]
    fn test_lll_finds_integer_relation() {
        // Rows [e_i, N·x^i] for x = 3/2 and N = 1000 contain the relation
        // 2x - 3 = 0, i.e. (-3, 2, 0).
        let b = basis(&[&[1, 0, 1000], &[0, 1, 1500]]);
        let result = lll_reduce(&b, &Q::new(3, 4));
        let first = result.basis.row(0);
        assert_eq!(first[2], Q::from_integer(0));
        assert_eq!(first[0].clone() * Q::from_integer(2), -(first[1].clone() * Q::from_integer(3)));
    }

    #[test]
    fn test_nearest_integer() {
        assert_eq!(nearest_integer(&Q::new(3, 2)), Q::from_integer(2));
        assert_eq!(nearest_integer(&Q::new(7, 4)), Q::from_integer(2));
        assert_eq!(nearest_integer(&Q::new(-7, 4)), Q::from_integer(-2));
        assert_eq!(nearest_integer(&Q::from_integer(3)), Q::from_integer(3));
    }
}
