//! # qbar-factor
//!
//! Factorization of univariate integer polynomials for qbar.
//!
//! This crate provides:
//! - **Modular arithmetic**: dense polynomials over a runtime prime field
//! - **Cantor-Zassenhaus**: distinct- and equal-degree factorization mod p
//! - **Hensel lifting**: lifting factors from Z_p to Z_{p^k}
//! - **Berlekamp-Zassenhaus**: factorization over Z with subset recombination
//! - **LLL**: exact lattice reduction over Q, used for integer relation search
//!
//! # Parallelism
//!
//! Hensel lifting and the per-multiplicity factorization use rayon.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cantor_zassenhaus;
pub mod error;
pub mod hensel;
pub mod lll;
pub mod modp;
pub mod squarefree;
pub mod univariate;

#[cfg(test)]
mod proptests;

pub use cantor_zassenhaus::cantor_zassenhaus_factor;
pub use error::{FactorError, Result};
pub use hensel::{hensel_lift, HenselLiftResult};
pub use lll::{lll_reduce, LllResult};
pub use squarefree::squarefree_factorization;
pub use univariate::{factor, factor_squarefree, irreducible_factors, Factorization};
