//! Newton interpolation over a field.

use qbar_rings::traits::Field;

use crate::dense::DensePoly;

/// Returns the unique polynomial of degree < `points.len()` through the
/// given `(x, y)` pairs.
///
/// # Panics
///
/// Panics if two abscissae coincide.
#[must_use]
pub fn newton_interpolate<F: Field>(points: &[(F, F)]) -> DensePoly<F> {
    let n = points.len();
    if n == 0 {
        return DensePoly::zero();
    }

    // Divided differences, in place.
    let mut coeffs: Vec<F> = points.iter().map(|(_, y)| y.clone()).collect();
    for level in 1..n {
        for i in (level..n).rev() {
            let dx = points[i].0.clone() - points[i - level].0.clone();
            coeffs[i] = (coeffs[i].clone() - coeffs[i - 1].clone()).field_div(&dx);
        }
    }

    // Horner over the Newton basis.
    let mut result = DensePoly::constant(coeffs[n - 1].clone());
    for i in (0..n - 1).rev() {
        let factor = DensePoly::new(vec![-points[i].0.clone(), F::one()]);
        result = result.mul(&factor).add(&DensePoly::constant(coeffs[i].clone()));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbar_rings::Q;

    #[test]
    fn test_recovers_polynomial() {
        let p = DensePoly::<Q>::from_i64s(&[1, 0, -10, 0, 1]);
        let points: Vec<(Q, Q)> = (0..5)
            .map(|t| {
                let x = Q::from_integer(t);
                let y = p.eval(&x);
                (x, y)
            })
            .collect();
        assert_eq!(newton_interpolate(&points), p);
    }

    #[test]
    fn test_extra_points_do_not_raise_degree() {
        let p = DensePoly::<Q>::from_i64s(&[3, -1]);
        let points: Vec<(Q, Q)> = (0..6)
            .map(|t| (Q::from_integer(t), p.eval(&Q::from_integer(t))))
            .collect();
        assert_eq!(newton_interpolate(&points), p);
    }
}
