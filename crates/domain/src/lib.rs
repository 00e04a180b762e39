//! Core staking domain: exact rational value objects, pool entities and the
//! yield/tax calculator.
//!
//! This crate provides:
//! - `Fraction`, `Percent`, `CurrencyAmount` and `Price` over big integers
//! - Pool configuration and live state as read from the staking contracts
//! - The dilution-aware APY, reward rate and tax derivation
//! - The mapper that assembles `StakingInfo` records for display
//! - Derivation of typed stake inputs and new pool drafts

/// Prelude module for convenient imports.
pub mod prelude;

/// Constants and calculator configuration.
pub mod config;
/// Pool draft derivation for the create-pool form.
pub mod draft;
/// Pool, token and staking info entities.
pub mod entities;
/// Error types.
pub mod error;
/// Configuration-to-DTO mapping.
pub mod mapper;
/// Integer helpers.
pub mod math;
/// Yield, reward rate and tax derivation.
pub mod metrics;
/// Typed stake input validation.
pub mod stake_input;
/// Serde helpers for big integers.
pub mod serde_u256;
/// Exact rational value objects.
pub mod value_objects;

pub use error::DomainError;

#[cfg(test)]
pub(crate) mod fixtures;
