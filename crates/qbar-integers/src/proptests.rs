//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{Integer, PrimeField, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_ring_laws(a in small_int(), b in small_int(), c in small_int()) {
            let (a, b, c) = (Integer::new(a), Integer::new(b), Integer::new(c));
            prop_assert_eq!(&a + &b, &b + &a);
            prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn floor_div_brackets_quotient(a in small_int(), b in non_zero_int()) {
            let (ai, bi) = (Integer::new(a), Integer::new(b));
            let q = ai.floor_div(&bi);
            prop_assert_eq!(q.to_i64(), Some(a.div_euclid(b) - i64::from(b < 0 && a.rem_euclid(b) != 0)));
            prop_assert_eq!(ai.ceil_div(&bi), -(-&ai).floor_div(&bi));
        }

        #[test]
        fn isqrt_is_floor_of_square_root(n in 0i64..1_000_000_000) {
            let s = Integer::new(n).isqrt();
            let next = &s + &Integer::new(1);
            prop_assert!(&s * &s <= Integer::new(n));
            prop_assert!(&next * &next > Integer::new(n));
        }

        #[test]
        fn rational_field_laws(a in small_int(), b in non_zero_int(), c in small_int(), d in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let y = Rational::from_i64(c, d);
            prop_assert_eq!(&x + &y, &y + &x);
            prop_assert_eq!(&(&x - &y) + &y, x.clone());
            if !y.is_zero() {
                prop_assert_eq!(&(&x / &y) * &y, x);
            }
        }

        #[test]
        fn floor_and_ceil_bracket(a in small_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let lo = Rational::from_integer(x.floor());
            let hi = Rational::from_integer(x.ceil());
            prop_assert!(lo <= x && x <= hi);
            prop_assert!(&hi - &lo <= Rational::from(1));
        }

        #[test]
        fn round_to_bits_error_is_half_ulp(a in small_int(), b in non_zero_int(), bits in 0u32..40) {
            let x = Rational::from_i64(a, b);
            let r = x.round_to_bits(bits);
            prop_assert!((&r - &x).abs() <= Rational::pow2(-i64::from(bits) - 1));
        }

        #[test]
        fn sqrt_bounds_enclose(a in 0i64..100_000, b in 1i64..1000, bits in 4u32..64) {
            let x = Rational::from_i64(a, b);
            let lo = x.sqrt_lower(bits);
            let hi = x.sqrt_upper(bits);
            prop_assert!(&lo * &lo <= x);
            prop_assert!(&hi * &hi >= x);
        }

        #[test]
        fn from_f64_round_trips(v in -1.0e12f64..1.0e12f64) {
            let r = Rational::from_f64(v).unwrap();
            prop_assert_eq!(r.to_f64(), v);
        }

        #[test]
        fn prime_field_inverse(a in 1u64..10_000) {
            let f = PrimeField::new(10_007);
            let inv = f.inv(a).unwrap();
            prop_assert_eq!(f.mul(a, inv), 1);
        }
    }
}
