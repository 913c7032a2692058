//! Error type for factorization over Z.

use thiserror::Error;

/// Failures of the modular factorization pipeline.
///
/// None of these is reachable for squarefree input whose coefficients fit
/// the prime search; they surface inputs outside that range instead of
/// aborting.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FactorError {
    /// Every prime below the search limit divides the leading coefficient
    /// or the discriminant.
    #[error("no admissible prime below {limit}")]
    NoAdmissiblePrime {
        /// The exclusive upper bound of the prime search.
        limit: usize,
    },

    /// The lifting prime divides the leading coefficient.
    #[error("prime {prime} divides the leading coefficient")]
    LeadingCoefficientVanishes {
        /// The prime.
        prime: u64,
    },

    /// Two modular factors share a common factor.
    #[error("modular factors are not coprime modulo {prime}")]
    FactorsNotCoprime {
        /// The prime.
        prime: u64,
    },
}

/// Result type for factorization.
pub type Result<T> = std::result::Result<T, FactorError>;
