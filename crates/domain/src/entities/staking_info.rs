use crate::config::SECONDS_IN_WEEK;
use crate::entities::pool::{PoolUid, PoolVersion};
use crate::entities::token::Token;
use crate::error::{DomainError, DomainResult};
use crate::metrics::reward_rate::user_reward_rate;
use crate::value_objects::{CurrencyAmount, Fraction, Percent};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Everything the UI shows about one staking pool.
///
/// Staked amounts are in `staked_token`, reward amounts and rates in
/// `reward_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInfo {
    pub pool_uid: PoolUid,
    pub pool_index: u64,
    pub version: PoolVersion,
    pub address: Option<String>,

    pub staked_token: Token,
    pub reward_token: Token,
    /// Underlying tokens when the staked asset is an LP share.
    pub staked_pair_tokens: Option<(Token, Token)>,

    pub staked_amount: CurrencyAmount,
    pub total_staked_amount: CurrencyAmount,
    pub unclaimed_amount: CurrencyAmount,
    pub claimed_amount: CurrencyAmount,
    pub minimum_to_stake: CurrencyAmount,
    pub count_stakers: U256,

    pub total_reward_rate: CurrencyAmount,
    pub user_reward_rate: CurrencyAmount,
    pub reward_divider: Fraction,
    pub apy: Fraction,

    pub staking_tax: Percent,
    pub unstaking_tax: Percent,
    pub retrieving_tax: Percent,

    /// Reward pool still holds rewards.
    pub open: bool,
}

impl StakingInfo {
    #[must_use]
    pub fn is_staking(&self) -> bool {
        !self.staked_amount.is_zero()
    }

    #[must_use]
    pub fn has_claimable(&self) -> bool {
        !self.unclaimed_amount.is_zero()
    }

    /// Reward the connected account earns over a week at the current rate.
    pub fn weekly_user_rewards(&self) -> DomainResult<CurrencyAmount> {
        self.user_reward_rate.multiply(&Fraction::from_integer(SECONDS_IN_WEEK))
    }

    /// Reward the whole pool emits over a week at the current rate.
    pub fn weekly_total_rewards(&self) -> DomainResult<CurrencyAmount> {
        self.total_reward_rate.multiply(&Fraction::from_integer(SECONDS_IN_WEEK))
    }

    /// Rate the account would earn after staking `deposit` more, at the
    /// current total rate.
    ///
    /// # Errors
    /// Returns `Overflow` if either stake would exceed 256 bits.
    pub fn hypothetical_reward_rate(&self, deposit: &CurrencyAmount) -> DomainResult<CurrencyAmount> {
        let deposit = deposit.quotient();
        let staked = self
            .staked_amount
            .quotient()
            .checked_add(deposit)
            .ok_or(DomainError::Overflow)?;
        let total = self
            .total_staked_amount
            .quotient()
            .checked_add(deposit)
            .ok_or(DomainError::Overflow)?;
        user_reward_rate(&self.total_reward_rate, staked, total)
    }
}
