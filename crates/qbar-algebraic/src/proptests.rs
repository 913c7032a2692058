//! Property-based tests for algebraic numbers.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;

    use crate::number::AlgebraicNumber;
    use crate::roots::roots;
    use qbar_integers::Rational;
    use qbar_poly::IntPoly;

    fn rational() -> impl Strategy<Value = Rational> {
        (-20i64..20, 1i64..8).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    /// Square roots of small integers, real or imaginary, plus a rational
    /// shift.
    fn quadratic() -> impl Strategy<Value = AlgebraicNumber> {
        (prop_oneof![2i64..12, -12i64..-1], rational()).prop_map(|(n, shift)| {
            AlgebraicNumber::from_integer(n)
                .sqrt()
                .unwrap()
                .add_rational(&shift)
        })
    }

    fn cubic() -> impl Strategy<Value = IntPoly> {
        (-5i64..5, -5i64..5, -5i64..5).prop_map(|(a, b, c)| IntPoly::from_i64s(&[c, b, a, 1]))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn enclosure_contains_a_root(x in quadratic(), bits in 32u32..160) {
            let disc = x.enclosure(bits).unwrap();
            prop_assert!(disc.eval_poly(x.minimal_polynomial()).contains_zero());
            prop_assert!(disc.radius() <= &Rational::pow2(-i64::from(bits)));
        }

        #[test]
        fn add_then_sub_round_trips(a in quadratic(), b in quadratic()) {
            let sum = a.add(&b).unwrap();
            prop_assert!(sum.sub(&b).unwrap() == a);
        }

        #[test]
        fn mul_then_div_round_trips(a in quadratic(), b in quadratic()) {
            prop_assume!(!b.is_zero());
            let product = a.mul(&b).unwrap();
            prop_assert!(product.div(&b).unwrap() == a);
        }

        #[test]
        fn root_order_is_strict_and_total(p in cubic()) {
            let rs = roots(&p).unwrap();
            for (i, a) in rs.iter().enumerate() {
                for (j, b) in rs.iter().enumerate() {
                    let expected = i.cmp(&j);
                    prop_assert_eq!(a.cmp_root_order(b).unwrap(), expected);
                }
            }
        }

        #[test]
        fn conjugate_pairs_are_adjacent(p in cubic()) {
            let rs = roots(&p).unwrap();
            let mut k = 0;
            while k < rs.len() {
                if rs[k].is_real() {
                    k += 1;
                    continue;
                }
                prop_assert!(rs[k].is_upper_half());
                prop_assert!(rs[k + 1] == rs[k].conj());
                k += 2;
            }
        }

        #[test]
        fn conjugates_contain_self_once(x in quadratic()) {
            let conjugates = x.conjugates().unwrap();
            prop_assert_eq!(conjugates.len(), x.degree());
            prop_assert_eq!(conjugates.iter().filter(|c| **c == x).count(), 1);
            for pair in conjugates.windows(2) {
                prop_assert_eq!(pair[0].cmp_root_order(&pair[1]).unwrap(), Ordering::Less);
            }
        }

        #[test]
        fn rational_enclosures_guess_back(r in rational()) {
            let center = &r + &Rational::pow2(-50);
            let guessed = crate::guess::guess_real(&center, &Rational::pow2(-40), &crate::GuessOptions::default().max_bits(8)).unwrap();
            prop_assert_eq!(guessed.to_rational(), Some(r));
        }
    }
}
