use crate::config::YieldConstants;
use crate::error::{DomainError, DomainResult};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staking contract generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolVersion {
    /// Router pools with a flat emission and no minimums or taxes.
    V1,
    /// Factory pools with dilution minimums and taxes.
    V2,
}

impl fmt::Display for PoolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolVersion::V1 => f.write_str("v1"),
            PoolVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Stable pool identifier, `{version}-{poolIndex}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PoolUid(String);

impl PoolUid {
    #[must_use]
    pub fn new(version: PoolVersion, pool_index: u64) -> Self {
        Self(format!("{version}-{pool_index}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Version and index encoded in the uid.
    #[must_use]
    pub fn parts(&self) -> Option<(PoolVersion, u64)> {
        let (version, index) = self.0.split_once('-')?;
        let version = match version {
            "v1" => PoolVersion::V1,
            "v2" => PoolVersion::V2,
            _ => return None,
        };
        Some((version, index.parse().ok()?))
    }
}

impl FromStr for PoolUid {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uid = Self(s.to_string());
        match uid.parts() {
            Some(_) => Ok(uid),
            None => Err(DomainError::InvalidConfiguration(format!("malformed pool uid `{s}`"))),
        }
    }
}

impl TryFrom<String> for PoolUid {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PoolUid> for String {
    fn from(uid: PoolUid) -> Self {
        uid.0
    }
}

impl fmt::Display for PoolUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Addresses of the two tokens behind an LP share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAddresses {
    pub token0: String,
    pub token1: String,
}

/// Per-pool configuration as returned by the pool contract.
///
/// Immutable for a given block; re-read on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub staked_token: String,
    pub reward_token: String,
    /// Present when the staked asset is an LP share.
    #[serde(default)]
    pub staked_pair: Option<PairAddresses>,
    #[serde(with = "crate::serde_u256")]
    pub stake_period_seconds: U256,
    #[serde(with = "crate::serde_u256")]
    pub reward_tokens_per_period: U256,
    #[serde(with = "crate::serde_u256")]
    pub min_stakers_for_full_reward: U256,
    #[serde(with = "crate::serde_u256")]
    pub min_total_staked_for_full_reward: U256,
    #[serde(default, with = "crate::serde_u256")]
    pub min_user_stake_for_reward: U256,
    #[serde(default)]
    pub stake_tax_bps: u32,
    #[serde(default)]
    pub unstake_tax_bps: u32,
    #[serde(default)]
    pub unstake_reward_tax_bps: u32,
}

impl PoolConfig {
    /// Config of a flat-emission router pool.
    ///
    /// Minimums of 1 keep the reward divider at 1, so the calculator
    /// reduces to `reward / period`.
    #[must_use]
    pub fn flat(
        staked_token: impl Into<String>,
        reward_token: impl Into<String>,
        stake_period_seconds: impl Into<U256>,
        reward_tokens_per_period: impl Into<U256>,
    ) -> Self {
        Self {
            staked_token: staked_token.into(),
            reward_token: reward_token.into(),
            staked_pair: None,
            stake_period_seconds: stake_period_seconds.into(),
            reward_tokens_per_period: reward_tokens_per_period.into(),
            min_stakers_for_full_reward: U256::one(),
            min_total_staked_for_full_reward: U256::one(),
            min_user_stake_for_reward: U256::zero(),
            stake_tax_bps: 0,
            unstake_tax_bps: 0,
            unstake_reward_tax_bps: 0,
        }
    }

    /// Rejects configurations the calculator cannot evaluate.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for a zero stake period, zero
    /// minimums, or a tax above the basis-point base.
    pub fn validate(&self, constants: &YieldConstants) -> DomainResult<()> {
        if self.stake_period_seconds.is_zero() {
            return Err(DomainError::InvalidConfiguration("stake period is zero".into()));
        }
        if self.min_stakers_for_full_reward.is_zero() {
            return Err(DomainError::InvalidConfiguration(
                "minimum stakers for full reward is zero".into(),
            ));
        }
        if self.min_total_staked_for_full_reward.is_zero() {
            return Err(DomainError::InvalidConfiguration(
                "minimum total staked for full reward is zero".into(),
            ));
        }
        if constants.bips_base == 0 {
            return Err(DomainError::InvalidConfiguration("basis point base is zero".into()));
        }
        for (name, bps) in [
            ("stake tax", self.stake_tax_bps),
            ("unstake tax", self.unstake_tax_bps),
            ("unstake reward tax", self.unstake_reward_tax_bps),
        ] {
            if bps > constants.bips_base {
                return Err(DomainError::InvalidConfiguration(format!(
                    "{name} of {bps} bps exceeds base {}",
                    constants.bips_base
                )));
            }
        }
        Ok(())
    }
}

/// Per-block pool state, plus the connected account's position.
///
/// Account fields are zero when no account is connected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLiveState {
    #[serde(with = "crate::serde_u256")]
    pub total_staked: U256,
    #[serde(with = "crate::serde_u256")]
    pub total_reward_pool: U256,
    #[serde(with = "crate::serde_u256")]
    pub count_stakers: U256,
    #[serde(default, with = "crate::serde_u256")]
    pub user_staked: U256,
    #[serde(default, with = "crate::serde_u256")]
    pub user_unclaimed: U256,
    #[serde(default, with = "crate::serde_u256")]
    pub user_claimed: U256,
}

impl PoolLiveState {
    /// Whether the reward pool still holds rewards.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.total_reward_pool.is_zero()
    }
}

/// A pool's configuration joined with its live state by uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub uid: PoolUid,
    /// Pool contract address; router pools share one contract.
    pub address: Option<String>,
    pub config: PoolConfig,
    pub live: PoolLiveState,
}
