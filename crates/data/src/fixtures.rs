//! Shared test fixtures.

use crate::snapshot::{ChainSnapshot, PairSnapshot, PoolSnapshot};
use chrono::{TimeZone, Utc};
use primitive_types::U256;
use stake_yield_domain::prelude::{PoolConfig, PoolLiveState, Token};

pub const USDC: &str = "0x0000000000000000000000000000000000000010";
pub const STAKED: &str = "0x00000000000000000000000000000000000000aa";
pub const REWARD: &str = "0x00000000000000000000000000000000000000bb";

fn units(whole: u64, decimals: u8) -> U256 {
    U256::from(whole) * U256::exp10(usize::from(decimals))
}

fn live(total_staked: u64, count_stakers: u64, user_staked: u64) -> PoolLiveState {
    PoolLiveState {
        total_staked: U256::from(total_staked),
        total_reward_pool: U256::from(1_000_000u64),
        count_stakers: U256::from(count_stakers),
        user_staked: U256::from(user_staked),
        user_unclaimed: U256::from(42u64),
        user_claimed: U256::zero(),
    }
}

/// STK at 2 USD, RWD at 0.5 USD, one router pool and one factory pool.
pub fn snapshot() -> ChainSnapshot {
    ChainSnapshot {
        chain_id: 56,
        block_number: 12_345_678,
        block_timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        stablecoin: USDC.into(),
        routing_bases: Vec::new(),
        tokens: vec![
            Token::new(56, USDC, 6, "USDC", "USD Coin"),
            Token::new(56, STAKED, 18, "STK", "Staked Token"),
            Token::new(56, REWARD, 18, "RWD", "Reward Token"),
        ],
        pairs: vec![
            PairSnapshot {
                address: "0x00000000000000000000000000000000000000c1".into(),
                token0: USDC.into(),
                token1: STAKED.into(),
                reserve0: units(2_000_000, 6),
                reserve1: units(1_000_000, 18),
                total_supply: units(1_000, 18),
                fee_bps: 30,
            },
            PairSnapshot {
                address: "0x00000000000000000000000000000000000000c2".into(),
                token0: USDC.into(),
                token1: REWARD.into(),
                reserve0: units(500_000, 6),
                reserve1: units(1_000_000, 18),
                total_supply: units(1_000, 18),
                fee_bps: 30,
            },
        ],
        pools: vec![
            PoolSnapshot::V1 {
                index: 0,
                address: Some("0x00000000000000000000000000000000000000d1".into()),
                staked_token: STAKED.into(),
                reward_token: REWARD.into(),
                stake_period_seconds: U256::from(86_400u64),
                reward_tokens_per_period: U256::from(864u64),
                live: live(7, 1, 7),
            },
            PoolSnapshot::V2 {
                index: 0,
                address: Some("0x00000000000000000000000000000000000000d2".into()),
                config: PoolConfig {
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
                },
                live: live(100_000, 10, 50_000),
            },
        ],
    }
}
