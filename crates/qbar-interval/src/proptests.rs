//! Property-based tests for rigorous enclosures.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::complex::ComplexQ;
    use crate::disc::Disc;
    use crate::elementary::exp_i;
    use crate::interval::Interval;
    use qbar_integers::Rational;
    use qbar_poly::IntPoly;

    fn small_rational() -> impl Strategy<Value = Rational> {
        (-40i64..40i64, 1i64..12i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    fn small_complex() -> impl Strategy<Value = ComplexQ> {
        (small_rational(), small_rational()).prop_map(|(re, im)| ComplexQ::new(re, im))
    }

    fn small_disc() -> impl Strategy<Value = Disc> {
        (small_complex(), 0i64..10i64).prop_map(|(c, r)| Disc::new(c, Rational::from_i64(r, 100)))
    }

    /// Points of the disc on the axes through the center.
    fn sample_points(d: &Disc) -> Vec<ComplexQ> {
        let r = d.radius().clone();
        let c = d.center();
        vec![
            c.clone(),
            ComplexQ::new(&c.re + &r, c.im.clone()),
            ComplexQ::new(&c.re - &r, c.im.clone()),
            ComplexQ::new(c.re.clone(), &c.im + &r),
            ComplexQ::new(c.re.clone(), &c.im - &r),
        ]
    }

    proptest! {
        #[test]
        fn disc_ops_enclose_point_ops(a in small_disc(), b in small_disc()) {
            let sum = a.add(&b);
            let product = a.mul(&b);
            for x in sample_points(&a) {
                for y in sample_points(&b) {
                    prop_assert!(sum.contains_point(&(&x + &y)));
                    prop_assert!(product.contains_point(&(&x * &y)));
                }
            }
        }

        #[test]
        fn disc_inverse_encloses(a in small_disc()) {
            if let Some(inv) = a.inv() {
                for x in sample_points(&a) {
                    prop_assert!(inv.contains_point(&x.inv().unwrap()));
                }
            }
        }

        #[test]
        fn rounding_only_grows(a in small_disc(), bits in 1u32..40) {
            prop_assert!(a.round(bits).contains_disc(&a));
        }

        #[test]
        fn horner_encloses_values(a in small_disc(), coeffs in proptest::collection::vec(-9i64..9, 1..5)) {
            let p = IntPoly::from_i64s(&coeffs);
            let value = a.eval_poly_rounded(&p, 30);
            for x in sample_points(&a) {
                let exact = p.coeffs().iter().rev().fold(ComplexQ::zero(), |acc, c| {
                    &(&acc * &x) + &ComplexQ::from_real(Rational::from_integer(c.0.clone()))
                });
                prop_assert!(value.contains_point(&exact));
            }
        }

        #[test]
        fn interval_mul_encloses(a in small_rational(), b in small_rational(), c in small_rational()) {
            let x = Interval::new(a.clone().min(b.clone()), a.max(b));
            let y = Interval::point(c.clone());
            let p = x.mul(&y);
            prop_assert!(p.contains(&(x.lo() * &c)));
            prop_assert!(p.contains(&(x.hi() * &c)));
        }

        #[test]
        fn unit_circle(n in -50i64..50, d in 1i64..8) {
            let z = exp_i(&Rational::from_i64(n, d), 40);
            // |z|^2 = 1 must be consistent with the enclosure
            let lo = z.magnitude_lower();
            let hi = z.magnitude_upper();
            prop_assert!(&lo * &lo <= Rational::from(1));
            prop_assert!(&hi * &hi >= Rational::from(1));
        }
    }
}
