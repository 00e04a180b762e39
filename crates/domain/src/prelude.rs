//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use stake_yield_domain::prelude::*;
//! ```

pub use crate::config::{
    BIPS_BASE, DilutionRounding, SECONDS_IN_DAY, SECONDS_IN_WEEK, SECONDS_PER_YEAR, YieldConstants,
};
pub use crate::draft::PoolDraft;
pub use crate::entities::{
    PairAddresses, PoolConfig, PoolLiveState, PoolRecord, PoolUid, PoolVersion, StakingInfo, Token,
};
pub use crate::error::{DomainError, DomainResult};
pub use crate::mapper::{MappedPools, StakingInfoMapper, TokenRegistry, total_unclaimed};
pub use crate::metrics::{PoolTaxes, YieldCalculator, YieldMetrics};
pub use crate::stake_input::{StakeInputError, derive_stake_input, max_amount_spend};
pub use crate::value_objects::{CurrencyAmount, Fraction, Percent, Price, parse_raw_units, parse_units};
