//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
    use crate::algorithms::interpolate::newton_interpolate;
    use crate::algorithms::resultant::resultant;
    use crate::algorithms::sturm::count_real_roots;
    use crate::dense::DensePoly;
    use crate::int_poly::{normalize, scale_roots, shift_roots, IntPoly};
    use qbar_integers::Rational;
    use qbar_rings::{Q, Z};

    // Strategy for generating small rational coefficients
    fn small_coeff() -> impl Strategy<Value = Q> {
        (-100i64..100i64).prop_map(Q::from_integer)
    }

    // Strategy for generating small polynomials (degree 0-4)
    fn small_poly() -> impl Strategy<Value = DensePoly<Q>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Q>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    fn nonconstant_int_poly() -> impl Strategy<Value = IntPoly> {
        proptest::collection::vec(-20i64..20i64, 2..=5)
            .prop_map(|c| IntPoly::from_i64s(&c))
            .prop_filter("polynomial must be non-constant", |p| p.degree() > 0)
    }

    fn small_rational() -> impl Strategy<Value = Rational> {
        (-30i64..30i64, 1i64..10i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_associative(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_mul_degree(a in nonzero_poly(), b in nonzero_poly()) {
            prop_assert_eq!(a.mul(&b).degree(), a.degree() + b.degree());
        }

        #[test]
        fn poly_eval_mul(a in small_poly(), b in small_poly(), x in small_coeff()) {
            prop_assert_eq!(a.mul(&b).eval(&x), a.eval(&x) * b.eval(&x));
        }

        #[test]
        fn compose_evaluates_inner_first(a in small_poly(), b in small_poly(), x in small_coeff()) {
            prop_assert_eq!(a.compose(&b).eval(&x), a.eval(&b.eval(&x)));
        }

        #[test]
        fn div_rem_reconstructs(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(), b in nonzero_poly(), c in nonzero_poly()) {
            let ac = a.mul(&c);
            let bc = b.mul(&c);
            let g = poly_gcd(&ac, &bc);
            prop_assert!(poly_div_rem(&ac, &g).1.is_zero());
            prop_assert!(poly_div_rem(&bc, &g).1.is_zero());
            prop_assert!(g.degree() >= c.degree());
        }

        #[test]
        fn resultant_vanishes_on_common_factor(f in nonconstant_int_poly(), g in nonconstant_int_poly(), h in nonconstant_int_poly()) {
            let fh = f.mul(&h);
            let gh = g.mul(&h);
            prop_assert_eq!(resultant::<Z>(fh.coeffs(), gh.coeffs()), Z::new(0));
        }

        #[test]
        fn interpolation_recovers(p in small_poly()) {
            let points: Vec<(Q, Q)> = (0..=i64::try_from(p.degree()).unwrap_or(0))
                .map(|t| (Q::from_integer(t), p.eval(&Q::from_integer(t))))
                .collect();
            prop_assert_eq!(newton_interpolate(&points), p);
        }

        #[test]
        fn shift_roots_inverts(p in nonconstant_int_poly(), r in small_rational()) {
            let back = shift_roots(&shift_roots(&p, &r), &-r);
            prop_assert_eq!(back, normalize(&p));
        }

        #[test]
        fn scale_roots_inverts(p in nonconstant_int_poly(), r in small_rational()) {
            prop_assume!(r.signum() != 0);
            let back = scale_roots(&scale_roots(&p, &r), &r.recip());
            prop_assert_eq!(back, normalize(&p));
        }

        #[test]
        fn real_root_count_bounded_by_degree(p in nonconstant_int_poly()) {
            prop_assert!(count_real_roots(&p) <= p.degree());
        }
    }
}
