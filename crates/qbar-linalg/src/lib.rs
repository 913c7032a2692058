//! # qbar-linalg
//!
//! Exact dense linear algebra for qbar.
//!
//! This crate provides:
//! - Dense row-major matrices over any coefficient ring, with parallel
//!   matrix products via rayon
//! - Determinants over fields
//! - Characteristic polynomials (Faddeev-LeVerrier)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod charpoly;
pub mod dense_matrix;

pub use charpoly::charpoly;
pub use dense_matrix::DenseMatrix;
