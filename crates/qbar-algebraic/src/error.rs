//! Error type for algebraic number operations.

use qbar_factor::FactorError;
use thiserror::Error;

/// Errors that can occur when constructing or operating on algebraic
/// numbers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgebraicError {
    /// A real ordering was applied to a nonreal operand.
    #[error("real ordering applied to a nonreal number")]
    NonrealComparison,

    /// Division by zero, or zero raised to a negative power.
    #[error("division by zero")]
    DivisionByZero,

    /// A root or conjugate index was out of range.
    #[error("root index {index} out of range for {count} roots")]
    InvalidRootIndex {
        /// The requested index.
        index: usize,
        /// The number of available roots.
        count: usize,
    },

    /// Two roots could not be told apart at the given precision.
    #[error("roots are not separated at {precision} bits of precision")]
    AmbiguousRoot {
        /// The highest precision tried, in bits.
        precision: u32,
    },

    /// The guesser exhausted its degree or bit budget.
    #[error("no algebraic number of degree at most {max_degree} with {max_bits}-bit coefficients fits the enclosure")]
    NoCandidateFound {
        /// Largest degree tried.
        max_degree: usize,
        /// Coefficient bit budget.
        max_bits: u32,
    },

    /// A squarefree-reduction or isolation invariant was violated.
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),

    /// An argument is outside the domain of the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for algebraic number operations.
pub type Result<T> = std::result::Result<T, AlgebraicError>;

impl From<FactorError> for AlgebraicError {
    /// Factoring a squarefree minimal polynomial candidate cannot fail for
    /// well-formed input, so any failure is an internal fault.
    fn from(err: FactorError) -> Self {
        Self::InternalConsistency(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_errors_are_internal() {
        let err = AlgebraicError::from(FactorError::NoAdmissiblePrime { limit: 65536 });
        assert_eq!(
            err,
            AlgebraicError::InternalConsistency("no admissible prime below 65536".into())
        );
    }
}
