//! # qbar-integers
//!
//! Arbitrary precision integer and rational arithmetic for qbar.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`) with dyadic rounding and
//!   rigorous square root bounds
//! - Word-sized prime fields (`PrimeField`) for modular factorization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod modular;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use modular::{odd_primes_below, PrimeField};
pub use rational::Rational;
