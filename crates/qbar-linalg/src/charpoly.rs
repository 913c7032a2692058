//! Characteristic polynomials.
//!
//! Uses the Faddeev-LeVerrier recurrence
//!
//! ```text
//! M₀ = 0,  c_n = 1
//! M_k = A·M_{k-1} + c_{n-k+1}·I
//! c_{n-k} = -tr(A·M_k) / k
//! ```
//!
//! which needs only matrix products and divisions by small integers, so it
//! works over any field of characteristic 0.

use qbar_poly::DensePoly;
use qbar_rings::traits::Field;

use crate::dense_matrix::DenseMatrix;

/// Returns `det(x·I - A)` as a monic polynomial.
///
/// # Panics
///
/// Panics if the matrix is not square.
#[must_use]
pub fn charpoly<F: Field + Send + Sync>(a: &DenseMatrix<F>) -> DensePoly<F> {
    assert!(a.is_square(), "characteristic polynomial of a non-square matrix");
    let n = a.num_rows();

    let mut coeffs = vec![F::zero(); n + 1];
    coeffs[n] = F::one();

    let mut m = DenseMatrix::zeros(n, n);
    for k in 1..=n {
        m = a.mm(&m).add_diagonal(&coeffs[n - k + 1]);
        let trace = a.mm(&m).trace();
        let k_field = F::from_i64(i64::try_from(k).unwrap_or(i64::MAX));
        coeffs[n - k] = -trace.field_div(&k_field);
    }

    DensePoly::new(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_rings::Q;

    fn q_matrix(rows: &[&[i64]]) -> DenseMatrix<Q> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Q::from_integer(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_charpoly_2x2() {
        // x^2 - 5x - 2
        let a = q_matrix(&[&[1, 2], &[3, 4]]);
        assert_eq!(charpoly(&a), DensePoly::from_i64s(&[-2, -5, 1]));
    }

    #[test]
    fn test_charpoly_circulant() {
        // [[1,1,0],[0,1,1],[1,0,1]] has eigenvalues 2 and (1 ± i√3)/2
        let a = q_matrix(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]]);
        // (x - 2)(x^2 - x + 1) = x^3 - 3x^2 + 3x - 2
        assert_eq!(charpoly(&a), DensePoly::from_i64s(&[-2, 3, -3, 1]));
    }

    #[test]
    fn test_charpoly_empty_and_scalar() {
        let empty = q_matrix(&[]);
        assert_eq!(charpoly(&empty), DensePoly::one());
        let scalar = q_matrix(&[&[7]]);
        assert_eq!(charpoly(&scalar), DensePoly::from_i64s(&[-7, 1]));
    }

    #[test]
    fn test_constant_term_is_signed_determinant() {
        let a = q_matrix(&[&[2, -1, 0], &[1, 3, 4], &[0, 5, -2]]);
        let p = charpoly(&a);
        // c_0 = (-1)^n det(A)
        assert_eq!(p.coeff(0), -a.det());
    }
}
