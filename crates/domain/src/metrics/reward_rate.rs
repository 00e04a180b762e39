use crate::entities::pool::PoolConfig;
use crate::entities::token::Token;
use crate::error::DomainResult;
use crate::metrics::apy::emission_rate;
use crate::value_objects::amount::CurrencyAmount;
use crate::value_objects::fraction::Fraction;
use primitive_types::U256;

/// Reward emitted per second to all stakers, after the dilution penalty.
pub fn total_reward_rate(
    config: &PoolConfig,
    reward_divider: &Fraction,
    reward_token: &Token,
) -> DomainResult<CurrencyAmount> {
    Ok(CurrencyAmount {
        token: reward_token.clone(),
        raw: emission_rate(config)?.checked_div(reward_divider)?,
    })
}

/// Pro-rata share of `total_rate` for `staked` out of `total_staked`.
///
/// Zero when nothing is staked in the pool.
pub fn user_reward_rate(
    total_rate: &CurrencyAmount,
    staked: U256,
    total_staked: U256,
) -> DomainResult<CurrencyAmount> {
    if total_staked.is_zero() {
        return Ok(CurrencyAmount::zero(total_rate.token.clone()));
    }
    total_rate.multiply(&Fraction::new(staked, total_staked)?)
}
