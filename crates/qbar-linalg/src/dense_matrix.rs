//! Dense matrices for small sizes.

use std::ops::{Add, Index, IndexMut};

use rayon::prelude::*;

use qbar_rings::traits::{Field, Ring};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Ring> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// Returns `None` if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Option<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != num_cols) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Applies a function to every entry.
    #[must_use]
    pub fn map<S: Ring>(&self, f: impl FnMut(&R) -> S) -> DenseMatrix<S> {
        DenseMatrix {
            data: self.data.iter().map(f).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Sum of the diagonal entries.
    #[must_use]
    pub fn trace(&self) -> R {
        (0..self.num_rows.min(self.num_cols)).fold(R::zero(), |acc, i| acc + self[(i, i)].clone())
    }

    /// Returns `self + c·I`.
    #[must_use]
    pub fn add_diagonal(&self, c: &R) -> Self {
        let mut m = self.clone();
        for i in 0..self.num_rows.min(self.num_cols) {
            m[(i, i)] = m[(i, i)].clone() + c.clone();
        }
        m
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: &R) -> Self {
        self.map(|v| v.clone() * scalar.clone())
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }
}

impl<R: Ring + Send + Sync> DenseMatrix<R> {
    /// Matrix-matrix multiply, one output row per task: C = A * B.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows, "dimension mismatch");

        let data: Vec<R> = (0..self.num_rows)
            .into_par_iter()
            .flat_map_iter(|i| {
                (0..other.num_cols).map(move |j| {
                    (0..self.num_cols).fold(R::zero(), |sum, k| {
                        sum + self[(i, k)].clone() * other[(k, j)].clone()
                    })
                })
            })
            .collect();

        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }
}

impl<R: Field> DenseMatrix<R> {
    /// Computes the determinant by Gaussian elimination.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn det(&self) -> R {
        assert!(self.is_square(), "determinant of a non-square matrix");
        let n = self.num_rows;
        let mut m = self.clone();
        let mut det = R::one();

        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| !m[(r, col)].is_zero()) else {
                return R::zero();
            };
            if pivot_row != col {
                m.swap_rows(col, pivot_row);
                det = -det;
            }

            let pivot = m[(col, col)].clone();
            det = det * pivot.clone();
            let Some(inv) = pivot.inv() else {
                return R::zero();
            };
            for row in col + 1..n {
                if m[(row, col)].is_zero() {
                    continue;
                }
                let factor = m[(row, col)].clone() * inv.clone();
                for k in col..n {
                    let val = m[(col, k)].clone() * factor.clone();
                    m[(row, k)] = m[(row, k)].clone() - val;
                }
            }
        }

        det
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<R: Ring> Add for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    fn add(self, other: Self) -> DenseMatrix<R> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_rings::{Q, Z};

    fn z_matrix(rows: &[&[i64]]) -> DenseMatrix<Z> {
        DenseMatrix::from_rows(rows.iter().map(|r| r.iter().map(|&v| Z::new(v)).collect()).collect())
            .unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let ragged = vec![vec![Z::new(1), Z::new(2)], vec![Z::new(3)]];
        assert!(DenseMatrix::from_rows(ragged).is_none());
        let empty: DenseMatrix<Z> = DenseMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(empty.num_rows(), 0);
        assert!(empty.is_square());
    }

    #[test]
    fn test_identity_and_trace() {
        let id: DenseMatrix<Z> = DenseMatrix::identity(3);
        assert_eq!(id.trace(), Z::new(3));
        assert_eq!(id[(0, 1)], Z::new(0));
        assert_eq!(z_matrix(&[&[1, 2], &[3, 4]]).add_diagonal(&Z::new(-1)), z_matrix(&[&[0, 2], &[3, 3]]));
    }

    #[test]
    fn test_mm() {
        let a = z_matrix(&[&[1, 2], &[3, 4]]);
        let b = z_matrix(&[&[5, 6], &[7, 8]]);
        assert_eq!(a.mm(&b), z_matrix(&[&[19, 22], &[43, 50]]));
        assert_eq!(&a + &b, z_matrix(&[&[6, 8], &[10, 12]]));
    }

    #[test]
    fn test_det() {
        let m = z_matrix(&[&[3, 8], &[4, 6]]).map(|v| Q::from_big(v.0.clone()));
        assert_eq!(m.det(), Q::from_integer(-14));

        let singular = z_matrix(&[&[1, 2], &[2, 4]]).map(|v| Q::from_big(v.0.clone()));
        assert_eq!(singular.det(), Q::from_integer(0));

        let swap = z_matrix(&[&[0, 1, 0], &[1, 0, 0], &[0, 0, 2]]).map(|v| Q::from_big(v.0.clone()));
        assert_eq!(swap.det(), Q::from_integer(-2));
    }
}
