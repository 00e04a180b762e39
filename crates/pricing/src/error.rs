//! Error types for price resolution.

use stake_yield_domain::DomainError;
use thiserror::Error;

/// Errors raised while quoting through pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The pair cannot provide the requested output.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// A token the pair or route does not contain.
    #[error("token {0} is not part of this pair")]
    UnknownToken(String),

    /// A pair built from one token twice.
    #[error("identical tokens {0}")]
    IdenticalTokens(String),

    /// A route whose pairs do not connect input to output.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;
