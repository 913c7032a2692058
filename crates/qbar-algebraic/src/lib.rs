//! # qbar-algebraic
//!
//! Exact algebraic numbers.
//!
//! An [`AlgebraicNumber`] is the pair (minimal polynomial over Z, isolating
//! disc). This crate provides:
//! - Root isolation and refinement with certified enclosures
//! - Field arithmetic, integer and rational powers, roots, and the real
//!   and imaginary parts and modulus, via resultants
//! - Exact equality, projection orders and the canonical root order
//! - Roots of unity, `cos`/`sin`/`tan` at rational multiples of π and their
//!   inverses
//! - Recovery of algebraic numbers from numeric enclosures (LLL)
//! - Eigenvalues of rational matrices
//!
//! ## Example
//!
//! ```rust,ignore
//! use qbar_algebraic::{root_of_unity, AlgebraicNumber};
//!
//! let i = AlgebraicNumber::from_integer(-1).sqrt()?;
//! assert!(i == root_of_unity(4, 1)?);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::should_implement_trait)]

pub mod arith;
pub mod compare;
pub mod config;
pub mod error;
pub mod guess;
mod isolate;
pub mod matrix;
pub mod number;
pub mod roots;
pub mod special;

#[cfg(test)]
mod proptests;

pub use compare::{sort_root_order, Projection};
pub use config::{AlgebraicConfig, GuessOptions};
pub use error::{AlgebraicError, Result};
pub use guess::{guess, guess_f64, guess_real};
pub use matrix::{eigenvalues, eigenvalues_from_rows};
pub use number::AlgebraicNumber;
pub use roots::{
    rational_poly_roots, real_roots, root_by_index, root_near, root_near_with_config, roots,
    roots_with_config,
};
pub use special::{
    cos_pi, cos_pi_with_config, i, root_of_unity, root_of_unity_with_config, sin_pi, sin_pi_with_config, tan_pi,
    tan_pi_with_config, AngleClass,
};
