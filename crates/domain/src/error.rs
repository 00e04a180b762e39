//! Error types for the staking domain.

use thiserror::Error;

/// Errors raised by domain arithmetic and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A denominator or divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A reduced result does not fit in 256 bits.
    #[error("arithmetic overflow")]
    Overflow,

    /// Two amounts of different tokens were combined.
    #[error("token mismatch: expected {expected}, found {found}")]
    TokenMismatch {
        /// Token the operation expected.
        expected: String,
        /// Token that was supplied.
        found: String,
    },

    /// A price chain whose quote and base tokens do not line up.
    #[error("price chain mismatch: {quote} does not match {base}")]
    PriceChainMismatch {
        /// Quote token of the left price.
        quote: String,
        /// Base token of the right price.
        base: String,
    },

    /// Pool configuration that the calculator cannot accept.
    #[error("invalid pool configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
