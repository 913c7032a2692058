//! Property-based tests for factorization.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::lll::{lll_reduce, vector_norm_squared};
    use crate::modp;
    use crate::univariate::{expand, factor};
    use qbar_integers::PrimeField;
    use qbar_linalg::DenseMatrix;
    use qbar_poly::IntPoly;
    use qbar_rings::Q;

    fn linear_or_quadratic() -> impl Strategy<Value = IntPoly> {
        proptest::collection::vec(-6i64..6i64, 2..=3)
            .prop_map(|c| IntPoly::from_i64s(&c))
            .prop_filter("non-constant", |p| p.degree() > 0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn factorization_reconstructs(
            parts in proptest::collection::vec(linear_or_quadratic(), 1..=3)
        ) {
            let f = parts.iter().fold(IntPoly::one(), |acc, p| acc.mul(p));
            let result = factor(&f).unwrap();
            prop_assert_eq!(expand(&result), f);
            for (g, m) in &result.factors {
                prop_assert!(g.degree() > 0);
                prop_assert!(*m >= 1);
                prop_assert!(!g.leading_coeff().0.is_negative());
            }
        }

        #[test]
        fn factor_count_bounded_by_degree(
            parts in proptest::collection::vec(linear_or_quadratic(), 1..=3)
        ) {
            let f = parts.iter().fold(IntPoly::one(), |acc, p| acc.mul(p));
            let total: usize = factor(&f)
                .unwrap()
                .factors
                .iter()
                .map(|(g, m)| g.degree() * *m as usize)
                .sum();
            prop_assert_eq!(total, f.degree());
        }

        #[test]
        fn modp_div_rem_identity(
            a in proptest::collection::vec(0u64..13, 1..=6),
            b in proptest::collection::vec(0u64..13, 1..=4),
        ) {
            let field = PrimeField::new(13);
            let b = modp::trim(b);
            prop_assume!(!b.is_empty());
            let a = modp::trim(a);
            let (q, r) = modp::div_rem(&a, &b, field);
            let back = modp::add(&modp::mul(&q, &b, field), &r, field);
            prop_assert_eq!(back, a);
        }

        #[test]
        fn lll_first_vector_within_bound(
            rows in proptest::collection::vec(proptest::collection::vec(-9i64..9i64, 3), 3)
        ) {
            let m = DenseMatrix::from_rows(
                rows.iter().map(|r| r.iter().map(|&v| Q::from_integer(v)).collect()).collect(),
            ).unwrap();
            prop_assume!(m.det() != Q::from_integer(0));
            let reduced = lll_reduce(&m, &Q::new(3, 4)).basis;
            let shortest_input = (0..3).map(|i| vector_norm_squared(m.row(i))).min().unwrap();
            // ‖b₁‖² ≤ 2^(n-1) λ₁² ≤ 4 · (shortest input)²
            prop_assert!(vector_norm_squared(reduced.row(0)) <= shortest_input * Q::from_integer(4));
            prop_assert_eq!(reduced.det().as_inner().abs(), m.det().as_inner().abs());
        }
    }
}
