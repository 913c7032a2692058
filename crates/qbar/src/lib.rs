//! # qbar
//!
//! Exact arithmetic on the field of algebraic numbers.
//!
//! Every number is kept as its minimal polynomial over the integers
//! together with a disc isolating one of its roots. Arithmetic goes
//! through resultants, comparisons refine the discs only as far as needed,
//! and no floating point value is ever trusted for a decision.
//!
//! ## Features
//!
//! - **Canonical form**: minimal polynomial plus certified isolating disc
//! - **Field arithmetic**: sums, products, inverses and rational powers
//! - **Orders**: exact equality, projection orders and the root order
//! - **Special values**: roots of unity and trigonometric values at
//!   rational multiples of π
//! - **Guessing**: LLL recovery of minimal polynomials from enclosures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use qbar::prelude::*;
//!
//! let x = AlgebraicNumber::from_integer(2).nth_root(5)?;
//! assert_eq!(x.degree(), 5);
//! assert!(AlgebraicNumber::from_integer(-1).sqrt()? == root_of_unity(4, 1)?);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use qbar_algebraic as algebraic;
pub use qbar_factor as factor;
pub use qbar_integers as integers;
pub use qbar_interval as interval;
pub use qbar_linalg as linalg;
pub use qbar_poly as poly;
pub use qbar_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use qbar_algebraic::{
        eigenvalues, guess, guess_f64, root_of_unity, roots, AlgebraicConfig, AlgebraicError,
        AlgebraicNumber, GuessOptions, Projection,
    };
    pub use qbar_integers::{Integer, Rational};
    pub use qbar_interval::{ComplexQ, Disc, Interval};
    pub use qbar_linalg::DenseMatrix;
    pub use qbar_poly::{DensePoly, IntPoly};
    pub use qbar_rings::{Field, Ring, Q, Z};
}
