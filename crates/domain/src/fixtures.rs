//! Shared test fixtures.

use crate::entities::pool::{PoolConfig, PoolLiveState};
use crate::entities::token::Token;
use primitive_types::U256;

pub const STAKED: &str = "0x00000000000000000000000000000000000000aa";
pub const REWARD: &str = "0x00000000000000000000000000000000000000bb";

pub fn staked_token() -> Token {
    Token::new(56, STAKED, 18, "STK", "Staked Token")
}

pub fn reward_token() -> Token {
    Token::new(56, REWARD, 18, "RWD", "Reward Token")
}

/// One day period, 1000 raw reward units per period, minimums 10 stakers
/// and 100_000 raw units staked, 1% / 2% / 3% taxes.
pub fn sample_config() -> PoolConfig {
    PoolConfig {
        staked_token: STAKED.into(),
        reward_token: REWARD.into(),
        staked_pair: None,
        stake_period_seconds: U256::from(86_400u64),
        reward_tokens_per_period: U256::from(1000u64),
        min_stakers_for_full_reward: U256::from(10u64),
        min_total_staked_for_full_reward: U256::from(100_000u64),
        min_user_stake_for_reward: U256::from(50u64),
        stake_tax_bps: 100,
        unstake_tax_bps: 200,
        unstake_reward_tax_bps: 300,
    }
}

pub fn live_state(total_staked: u64, count_stakers: u64, user_staked: u64) -> PoolLiveState {
    PoolLiveState {
        total_staked: U256::from(total_staked),
        total_reward_pool: U256::from(1_000_000u64),
        count_stakers: U256::from(count_stakers),
        user_staked: U256::from(user_staked),
        user_unclaimed: U256::zero(),
        user_claimed: U256::zero(),
    }
}
