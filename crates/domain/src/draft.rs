//! Pool draft for the create-pool form.
//!
//! A draft holds what the pool creator typed. It becomes a `PoolConfig`
//! with a one-day stake period, so the reward per period is the reward
//! budget spread over the pool lifespan.

use crate::config::SECONDS_IN_DAY;
use crate::entities::pool::{PoolConfig, PoolLiveState};
use crate::entities::token::Token;
use crate::error::{DomainError, DomainResult};
use crate::metrics::YieldCalculator;
use crate::value_objects::{CurrencyAmount, Fraction};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// A pool as typed into the create-pool form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDraft {
    pub staked_token: Token,
    pub reward_token: Token,
    /// Total reward budget over the lifespan.
    pub reward_amount: CurrencyAmount,
    pub lifespan_days: u64,
    pub min_user_stake: CurrencyAmount,
    pub min_total_stake: CurrencyAmount,
    pub min_stakers: u64,
    pub stake_tax_bps: u32,
    pub unstake_tax_bps: u32,
    pub unstake_reward_tax_bps: u32,
}

impl PoolDraft {
    /// Draft with zero minimums and no taxes.
    #[must_use]
    pub fn new(staked_token: Token, reward_token: Token, reward_amount: CurrencyAmount, lifespan_days: u64) -> Self {
        Self {
            min_user_stake: CurrencyAmount::zero(staked_token.clone()),
            min_total_stake: CurrencyAmount::zero(staked_token.clone()),
            staked_token,
            reward_token,
            reward_amount,
            lifespan_days,
            min_stakers: 0,
            stake_tax_bps: 0,
            unstake_tax_bps: 0,
            unstake_reward_tax_bps: 0,
        }
    }

    /// Reward emitted per day, `None` for a zero lifespan.
    #[must_use]
    pub fn tokens_per_day(&self) -> Option<CurrencyAmount> {
        if self.lifespan_days == 0 {
            return None;
        }
        self.reward_amount
            .divide(&Fraction::from_integer(self.lifespan_days))
            .ok()
    }

    /// Builds the configuration the pool factory would be called with.
    ///
    /// Daily rewards are rounded down to whole base units.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a zero lifespan, tokens that do
    /// not match the draft, or a config that fails validation.
    pub fn to_config(&self, calculator: &YieldCalculator) -> DomainResult<PoolConfig> {
        let per_day = self
            .tokens_per_day()
            .ok_or_else(|| DomainError::InvalidConfiguration("pool lifespan is zero days".into()))?;
        if self.reward_amount.token != self.reward_token {
            return Err(DomainError::InvalidConfiguration(
                "reward amount is not in the reward token".into(),
            ));
        }
        if self.min_user_stake.token != self.staked_token || self.min_total_stake.token != self.staked_token {
            return Err(DomainError::InvalidConfiguration(
                "stake minimums are not in the staked token".into(),
            ));
        }

        let config = PoolConfig {
            staked_token: self.staked_token.address.clone(),
            reward_token: self.reward_token.address.clone(),
            staked_pair: None,
            stake_period_seconds: U256::from(SECONDS_IN_DAY),
            reward_tokens_per_period: per_day.quotient(),
            min_stakers_for_full_reward: U256::from(self.min_stakers),
            min_total_staked_for_full_reward: self.min_total_stake.quotient(),
            min_user_stake_for_reward: self.min_user_stake.quotient(),
            stake_tax_bps: self.stake_tax_bps,
            unstake_tax_bps: self.unstake_tax_bps,
            unstake_reward_tax_bps: self.unstake_reward_tax_bps,
        };
        config.validate(calculator.constants())?;
        Ok(config)
    }

    /// APY the new pool would advertise before anyone stakes.
    ///
    /// # Errors
    /// Same as [`PoolDraft::to_config`].
    pub fn preview_apy(&self, calculator: &YieldCalculator) -> DomainResult<Fraction> {
        let config = self.to_config(calculator)?;
        let metrics = calculator.compute(&config, &PoolLiveState::default(), &self.reward_token)?;
        Ok(metrics.apy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{reward_token, staked_token};

    fn draft() -> PoolDraft {
        let mut draft = PoolDraft::new(
            staked_token(),
            reward_token(),
            CurrencyAmount::from_raw(reward_token(), 30_000u64),
            30,
        );
        draft.min_user_stake = CurrencyAmount::from_raw(staked_token(), 50u64);
        draft.min_total_stake = CurrencyAmount::from_raw(staked_token(), 100_000u64);
        draft.min_stakers = 10;
        draft.stake_tax_bps = 100;
        draft
    }

    #[test]
    fn test_tokens_per_day() {
        let per_day = draft().tokens_per_day().unwrap();
        assert_eq!(per_day.quotient(), U256::from(1_000u64));

        let mut zero = draft();
        zero.lifespan_days = 0;
        assert!(zero.tokens_per_day().is_none());
    }

    #[test]
    fn test_to_config_uses_daily_period() {
        let config = draft().to_config(&YieldCalculator::default()).unwrap();
        assert_eq!(config.stake_period_seconds, U256::from(86_400u64));
        assert_eq!(config.reward_tokens_per_period, U256::from(1_000u64));
        assert_eq!(config.min_stakers_for_full_reward, U256::from(10u64));
        assert_eq!(config.min_total_staked_for_full_reward, U256::from(100_000u64));
        assert_eq!(config.min_user_stake_for_reward, U256::from(50u64));
        assert_eq!(config.stake_tax_bps, 100);
    }

    #[test]
    fn test_preview_apy_matches_empty_pool_estimate() {
        // same numbers as an empty pool with the shared fixture config
        let apy = draft().preview_apy(&YieldCalculator::default()).unwrap();
        assert_eq!(apy, Fraction::new(73u64, 2u64).unwrap());
    }

    #[test]
    fn test_rejects_unusable_drafts() {
        let calc = YieldCalculator::default();

        let mut zero_life = draft();
        zero_life.lifespan_days = 0;
        assert!(matches!(zero_life.to_config(&calc), Err(DomainError::InvalidConfiguration(_))));

        let mut no_stakers = draft();
        no_stakers.min_stakers = 0;
        assert!(matches!(no_stakers.to_config(&calc), Err(DomainError::InvalidConfiguration(_))));

        let mut heavy_tax = draft();
        heavy_tax.unstake_tax_bps = 10_001;
        assert!(matches!(heavy_tax.preview_apy(&calc), Err(DomainError::InvalidConfiguration(_))));

        let mut wrong_token = draft();
        wrong_token.reward_amount = CurrencyAmount::from_raw(staked_token(), 1u64);
        assert!(wrong_token.to_config(&calc).is_err());
    }
}
