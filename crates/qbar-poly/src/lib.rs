//! # qbar-poly
//!
//! Dense univariate polynomial arithmetic for qbar.
//!
//! This crate provides:
//! - Dense polynomials over any coefficient ring (`DensePoly`)
//! - Integer polynomial helpers for minimal polynomials (`IntPoly`)
//! - GCD, squarefree decomposition and Newton interpolation
//! - Sylvester resultants, including the parametric form used to build
//!   annihilating polynomials of sums and products
//! - Sturm sequences for counting real roots
//! - Cyclotomic, Chebyshev and tangent polynomials

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod dense;
pub mod int_poly;
pub mod special;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
pub use int_poly::IntPoly;
