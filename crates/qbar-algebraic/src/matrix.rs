//! Eigenvalues of rational matrices.

use qbar_linalg::{charpoly, DenseMatrix};
use qbar_rings::Q;

use crate::error::{AlgebraicError, Result};
use crate::number::AlgebraicNumber;
use crate::roots::rational_poly_roots;

/// The distinct eigenvalues of a square rational matrix, in root order.
///
/// # Errors
///
/// Returns `InvalidArgument` for a non-square matrix.
pub fn eigenvalues(matrix: &DenseMatrix<Q>) -> Result<Vec<AlgebraicNumber>> {
    if !matrix.is_square() {
        return Err(AlgebraicError::InvalidArgument(format!(
            "eigenvalues of a {}x{} matrix",
            matrix.num_rows(),
            matrix.num_cols()
        )));
    }
    rational_poly_roots(&charpoly(matrix))
}

/// [`eigenvalues`] of an integer matrix given by rows.
///
/// # Errors
///
/// Returns `InvalidArgument` for ragged or non-square input.
pub fn eigenvalues_from_rows(rows: &[Vec<i64>]) -> Result<Vec<AlgebraicNumber>> {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|&x| Q::from_integer(x)).collect())
        .collect();
    let matrix = DenseMatrix::from_rows(rows)
        .ok_or_else(|| AlgebraicError::InvalidArgument("rows of unequal length".into()))?;
    eigenvalues(&matrix)
}
