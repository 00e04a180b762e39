//! Under-subscription penalty.
//!
//! A pool pays its full emission only once it has at least
//! `min_total_staked_for_full_reward` staked by at least
//! `min_stakers_for_full_reward` accounts. Below either threshold the
//! emission is divided by how far short the pool is.

use crate::config::DilutionRounding;
use crate::entities::pool::{PoolConfig, PoolLiveState};
use crate::error::DomainResult;
use crate::value_objects::fraction::Fraction;
use primitive_types::U256;

/// `max(1, required / actual)`, with `actual` of zero treated as 1.
pub fn min_ratio(required: U256, actual: U256, rounding: DilutionRounding) -> DomainResult<Fraction> {
    let actual = if actual.is_zero() { U256::one() } else { actual };
    let ratio = match rounding {
        DilutionRounding::Floor => Fraction::from_integer(required / actual),
        DilutionRounding::Exact => Fraction::new(required, actual)?,
    };
    Ok(ratio.max(Fraction::one()))
}

/// Combined penalty factor; 1 when the pool is fully subscribed.
pub fn reward_divider(
    config: &PoolConfig,
    live: &PoolLiveState,
    rounding: DilutionRounding,
) -> DomainResult<Fraction> {
    let staked_ratio = min_ratio(config.min_total_staked_for_full_reward, live.total_staked, rounding)?;
    let stakers_ratio = min_ratio(config.min_stakers_for_full_reward, live.count_stakers, rounding)?;
    staked_ratio.checked_mul(&stakers_ratio)
}
