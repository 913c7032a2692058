//! Plumbing shared by the `Z` and `Q` coefficient wrappers.
//!
//! Both are newtypes over an exact number from `qbar-integers`. The
//! operators consume their arguments, matching how `DensePoly` folds
//! coefficients.

macro_rules! coefficient_wrapper {
    ($name:ident, $inner:ty) => {
        impl $name {
            /// Unwraps the exact value.
            #[must_use]
            pub fn into_inner(self) -> $inner {
                self.0
            }

            /// Borrows the exact value.
            #[must_use]
            pub fn as_inner(&self) -> &$inner {
                &self.0
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl std::ops::Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                Self(self.0 * rhs.0)
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                <Self as $crate::traits::Ring>::from_i64(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use coefficient_wrapper;
