//! Chain state access for the staking pools.
//!
//! Pool configuration, live state, token metadata and trading pairs reach
//! the calculator through the [`provider::StakingDataProvider`] trait. A
//! JSON snapshot implementation is provided for offline use and tests.

/// Prelude module for convenient imports.
pub mod prelude;

/// Pool overview assembly.
pub mod overview;
/// Data provider trait and the snapshot-backed implementation.
pub mod provider;
/// JSON chain snapshot format.
pub mod snapshot;

#[cfg(test)]
pub(crate) mod fixtures;
