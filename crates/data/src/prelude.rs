//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use stake_yield_data::prelude::*;
//! ```

pub use crate::overview::{PoolOverview, StakingOverview, build_overview};
pub use crate::provider::{BlockRef, PairState, SnapshotProvider, StakingDataProvider};
pub use crate::snapshot::{ChainSnapshot, PairSnapshot, PoolSnapshot};
