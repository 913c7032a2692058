//! # qbar-rings
//!
//! Coefficient rings for qbar polynomials.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `EuclideanDomain`, `Field`
//! - Concrete implementations: `Z` and `Q`
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── EuclideanDomain
//!       └── Field
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod wrapper;

pub mod integers;
pub mod rationals;
pub mod traits;

pub use integers::Z;
pub use rationals::Q;
pub use traits::{EuclideanDomain, Field, Ring};
