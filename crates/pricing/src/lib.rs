//! USD pricing for staking pools.
//!
//! Quotes tokens and LP shares against a reference stablecoin by searching
//! exact-output trades through constant-product pairs, and values pools
//! (TVL and USD-adjusted APY) from those quotes.

/// Prelude module for convenient imports.
pub mod prelude;

/// Candidate pair enumeration.
pub mod bases;
/// Error types.
pub mod error;
/// Constant-product pairs.
pub mod pair;
/// USD price resolution.
pub mod resolver;
/// Routes through pairs.
pub mod route;
/// Exact-output trade search.
pub mod trade;
/// Pool TVL and USD-adjusted APY.
pub mod valuation;

pub use error::PricingError;

#[cfg(test)]
pub(crate) mod fixtures;
