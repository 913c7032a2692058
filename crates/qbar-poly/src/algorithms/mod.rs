//! Polynomial algorithms.
//!
//! - Division, GCD, content and primitive part
//! - Yun's squarefree decomposition
//! - Newton interpolation
//! - Resultants (Bareiss on the Sylvester matrix, evaluation/interpolation
//!   for a parametric second argument)
//! - Sturm sequences

pub mod gcd;
pub mod interpolate;
pub mod resultant;
pub mod squarefree;
pub mod sturm;
