//! Configuration-to-DTO mapping.
//!
//! Joins a `PoolRecord` with token metadata into a `StakingInfo`. All
//! numeric fields come from the `YieldCalculator`; this module only
//! assembles fields.

use crate::entities::pool::PoolRecord;
use crate::entities::staking_info::StakingInfo;
use crate::entities::token::Token;
use crate::error::{DomainError, DomainResult};
use crate::metrics::YieldCalculator;
use crate::value_objects::CurrencyAmount;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Token metadata keyed by lowercase address.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, Token>,
}

impl TokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a token.
    pub fn insert(&mut self, token: Token) {
        self.tokens.insert(token.key(), token);
    }

    /// Looks up a token by address, ignoring case.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<&Token> {
        self.tokens.get(&address.to_lowercase())
    }

    /// Looks up a token by symbol, ignoring case.
    #[must_use]
    pub fn find_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens.values().find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<Token> for TokenRegistry {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut registry = Self::new();
        for token in iter {
            registry.insert(token);
        }
        registry
    }
}

/// Result of mapping a batch of pools.
#[derive(Debug, Clone, Default)]
pub struct MappedPools {
    pub infos: Vec<StakingInfo>,
    /// Pools whose configuration was rejected, with the reason.
    pub rejected: Vec<(String, DomainError)>,
    /// Pools skipped because token metadata was not available yet.
    pub skipped: Vec<String>,
}

/// Builds `StakingInfo` records from pool records.
#[derive(Debug, Clone, Copy, Default)]
pub struct StakingInfoMapper {
    calculator: YieldCalculator,
}

impl StakingInfoMapper {
    #[must_use]
    pub fn new(calculator: YieldCalculator) -> Self {
        Self { calculator }
    }

    /// Maps one pool.
    ///
    /// Returns `Ok(None)` when the staked or reward token is not in the
    /// registry yet.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when the pool configuration is rejected.
    pub fn map(&self, record: &PoolRecord, registry: &TokenRegistry) -> DomainResult<Option<StakingInfo>> {
        let config = &record.config;
        let live = &record.live;

        let (Some(staked_token), Some(reward_token)) =
            (registry.get(&config.staked_token), registry.get(&config.reward_token))
        else {
            warn!(pool = %record.uid, "Failed to load staking token metadata");
            return Ok(None);
        };

        let metrics = self.calculator.compute(config, live, reward_token)?;

        let staked_pair_tokens = config.staked_pair.as_ref().and_then(|pair| {
            Some((registry.get(&pair.token0)?.clone(), registry.get(&pair.token1)?.clone()))
        });

        let (version, pool_index) = record
            .uid
            .parts()
            .ok_or_else(|| DomainError::InvalidConfiguration(format!("malformed pool uid `{}`", record.uid)))?;

        debug!(pool = %record.uid, apy = %metrics.apy, "Mapped staking pool");

        Ok(Some(StakingInfo {
            pool_uid: record.uid.clone(),
            pool_index,
            version,
            address: record.address.clone(),
            staked_token: staked_token.clone(),
            reward_token: reward_token.clone(),
            staked_pair_tokens,
            staked_amount: CurrencyAmount::from_raw(staked_token.clone(), live.user_staked),
            total_staked_amount: CurrencyAmount::from_raw(staked_token.clone(), live.total_staked),
            unclaimed_amount: CurrencyAmount::from_raw(reward_token.clone(), live.user_unclaimed),
            claimed_amount: CurrencyAmount::from_raw(reward_token.clone(), live.user_claimed),
            minimum_to_stake: CurrencyAmount::from_raw(staked_token.clone(), config.min_user_stake_for_reward),
            count_stakers: live.count_stakers,
            total_reward_rate: metrics.total_reward_rate,
            user_reward_rate: metrics.user_reward_rate,
            reward_divider: metrics.reward_divider,
            apy: metrics.apy,
            staking_tax: metrics.taxes.staking,
            unstaking_tax: metrics.taxes.unstaking,
            retrieving_tax: metrics.taxes.retrieving,
            open: live.is_open(),
        }))
    }

    /// Maps a batch, keeping going past pools that fail.
    pub fn map_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a PoolRecord>,
        registry: &TokenRegistry,
    ) -> MappedPools {
        let mut mapped = MappedPools::default();
        for record in records {
            match self.map(record, registry) {
                Ok(Some(info)) => mapped.infos.push(info),
                Ok(None) => mapped.skipped.push(record.uid.to_string()),
                Err(e) => {
                    warn!(pool = %record.uid, error = %e, "Rejected staking pool");
                    mapped.rejected.push((record.uid.to_string(), e));
                }
            }
        }
        mapped
    }
}

/// Sum of unclaimed rewards in `reward_token` across pools.
pub fn total_unclaimed(infos: &[StakingInfo], reward_token: &Token) -> DomainResult<CurrencyAmount> {
    infos
        .iter()
        .filter(|info| &info.reward_token == reward_token)
        .try_fold(CurrencyAmount::zero(reward_token.clone()), |acc, info| {
            acc.checked_add(&info.unclaimed_amount)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::pool::{PairAddresses, PoolConfig, PoolUid, PoolVersion};
    use crate::fixtures::{live_state, reward_token, sample_config, staked_token};
    use crate::value_objects::Fraction;
    use primitive_types::U256;

    fn registry() -> TokenRegistry {
        [staked_token(), reward_token()].into_iter().collect()
    }

    fn record(index: u64, config: PoolConfig) -> PoolRecord {
        let mut live = live_state(100_000, 10, 50_000);
        live.user_unclaimed = U256::from(42u64);
        PoolRecord {
            uid: PoolUid::new(PoolVersion::V2, index),
            address: Some(format!("0x{index:040x}")),
            config,
            live,
        }
    }

    #[test]
    fn test_registry_lookup_ignores_case() {
        let reg = registry();
        assert_eq!(reg.len(), 2);
        assert!(reg.get(&staked_token().address.to_uppercase().replace("0X", "0x")).is_some());
        assert_eq!(reg.find_symbol("rwd"), Some(&reward_token()));
    }

    #[test]
    fn test_map_fills_identity_and_metrics() {
        let mapper = StakingInfoMapper::default();
        let info = mapper.map(&record(3, sample_config()), &registry()).unwrap().unwrap();

        assert_eq!(info.pool_uid.as_str(), "v2-3");
        assert_eq!(info.pool_index, 3);
        assert_eq!(info.version, PoolVersion::V2);
        assert_eq!(info.staked_amount.token, staked_token());
        assert_eq!(info.unclaimed_amount.token, reward_token());
        assert_eq!(info.total_staked_amount.quotient(), U256::from(100_000u64));
        assert_eq!(info.minimum_to_stake.quotient(), U256::from(50u64));
        assert_eq!(info.reward_divider, Fraction::one());
        assert_eq!(info.apy, Fraction::from_integer(365u64));
        assert!(info.open);
        assert!(info.is_staking());
        assert!(info.has_claimable());
        assert!(info.staked_pair_tokens.is_none());
    }

    #[test]
    fn test_map_resolves_pair_tokens() {
        let mut config = sample_config();
        config.staked_pair = Some(PairAddresses {
            token0: staked_token().address,
            token1: reward_token().address,
        });
        let info = StakingInfoMapper::default()
            .map(&record(0, config), &registry())
            .unwrap()
            .unwrap();
        assert_eq!(info.staked_pair_tokens, Some((staked_token(), reward_token())));
    }

    #[test]
    fn test_map_skips_unknown_tokens() {
        let mut config = sample_config();
        config.reward_token = "0x00000000000000000000000000000000000000ff".into();
        let result = StakingInfoMapper::default().map(&record(1, config), &registry()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_map_all_keeps_valid_pools() {
        let mut broken = sample_config();
        broken.stake_period_seconds = U256::zero();
        let mut unknown = sample_config();
        unknown.staked_token = "0x00000000000000000000000000000000000000ee".into();

        let records = vec![record(0, sample_config()), record(1, broken), record(2, unknown)];
        let mapped = StakingInfoMapper::default().map_all(&records, &registry());

        assert_eq!(mapped.infos.len(), 1);
        assert_eq!(mapped.rejected.len(), 1);
        assert_eq!(mapped.rejected[0].0, "v2-1");
        assert_eq!(mapped.skipped, vec!["v2-2".to_string()]);
    }

    #[test]
    fn test_weekly_rewards() {
        let info = StakingInfoMapper::default()
            .map(&record(0, sample_config()), &registry())
            .unwrap()
            .unwrap();
        // 1000 per day, 7 days
        assert_eq!(info.weekly_total_rewards().unwrap().quotient(), U256::from(7_000u64));
        assert_eq!(info.weekly_user_rewards().unwrap().quotient(), U256::from(3_500u64));
    }

    #[test]
    fn test_hypothetical_reward_rate() {
        let info = StakingInfoMapper::default()
            .map(&record(0, sample_config()), &registry())
            .unwrap()
            .unwrap();
        // (50_000 + 50_000) / (100_000 + 50_000) = 2/3 of the total rate
        let deposit = CurrencyAmount::from_raw(staked_token(), 50_000u64);
        let rate = info.hypothetical_reward_rate(&deposit).unwrap();
        assert_eq!(
            rate.raw,
            info.total_reward_rate.raw.checked_mul(&Fraction::new(2u64, 3u64).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_flat_v1_pool() {
        let config = PoolConfig::flat(staked_token().address, reward_token().address, 86_400u64, 864u64);
        let record = PoolRecord {
            uid: PoolUid::new(PoolVersion::V1, 0),
            address: None,
            config,
            live: live_state(7, 1, 7),
        };
        let info = StakingInfoMapper::default().map(&record, &registry()).unwrap().unwrap();
        assert_eq!(info.version, PoolVersion::V1);
        assert_eq!(info.reward_divider, Fraction::one());
        assert_eq!(info.total_reward_rate.raw, Fraction::new(1u64, 100u64).unwrap());
        assert_eq!(info.user_reward_rate, info.total_reward_rate);
        assert!(info.staking_tax.as_fraction().is_zero());
    }

    #[test]
    fn test_total_unclaimed() {
        let mapper = StakingInfoMapper::default();
        let records = vec![record(0, sample_config()), record(1, sample_config())];
        let mapped = mapper.map_all(&records, &registry());
        let total = total_unclaimed(&mapped.infos, &reward_token()).unwrap();
        assert_eq!(total.quotient(), U256::from(84u64));

        let none = total_unclaimed(&mapped.infos, &staked_token()).unwrap();
        assert!(none.is_zero());
    }
}
