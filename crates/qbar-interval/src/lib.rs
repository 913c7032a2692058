//! # qbar-interval
//!
//! Rigorous enclosures with exact rational data for qbar.
//!
//! This crate provides:
//! - Gaussian rationals (`ComplexQ`)
//! - Closed real intervals (`Interval`) with certain comparisons
//! - Complex discs (`Disc`) with rigorous arithmetic, dyadic rounding and
//!   polynomial evaluation
//! - Enclosures of π and of `e^{iθ}`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::should_implement_trait)]

pub mod complex;
pub mod disc;
pub mod elementary;
pub mod interval;

#[cfg(test)]
mod proptests;

pub use complex::ComplexQ;
pub use disc::Disc;
pub use elementary::{cos_sin, exp_i, exp_i_pi, pi};
pub use interval::Interval;
