//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use stake_yield_pricing::prelude::*;
//! ```

// Pairs and routes
pub use crate::bases::{candidate_pair_keys, routing_pairs};
pub use crate::pair::{DEFAULT_FEE_BPS, Pair};
pub use crate::route::Route;
pub use crate::trade::{Trade, TradeOptions, best_trade_exact_out, is_trade_better};

// Resolution
pub use crate::error::{PricingError, PricingResult};
pub use crate::resolver::{PricedAsset, ResolverConfig, UsdPriceResolver};
pub use crate::valuation::PoolValuation;
