//! JSON chain snapshot.
//!
//! A snapshot captures, at one block, everything the calculator and the
//! price resolver read from chain: token metadata, pair reserves, and each
//! pool's configuration and live state. Big integers are decimal strings.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use stake_yield_domain::prelude::{
    PoolConfig, PoolLiveState, PoolRecord, PoolUid, PoolVersion, Token, TokenRegistry,
};
use stake_yield_domain::serde_u256;
use stake_yield_pricing::prelude::{DEFAULT_FEE_BPS, Pair};
use std::path::Path;
use tracing::{debug, info, warn};

/// Reserves and LP supply of one pair contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    /// Pair contract address, also the LP token address.
    pub address: String,
    pub token0: String,
    pub token1: String,
    #[serde(with = "serde_u256")]
    pub reserve0: U256,
    #[serde(with = "serde_u256")]
    pub reserve1: U256,
    #[serde(with = "serde_u256")]
    pub total_supply: U256,
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,
}

fn default_fee_bps() -> u32 {
    DEFAULT_FEE_BPS
}

/// One pool as read from chain.
///
/// Router (v1) pools only expose a flat emission; factory (v2) pools carry
/// the full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum PoolSnapshot {
    V1 {
        index: u64,
        #[serde(default)]
        address: Option<String>,
        staked_token: String,
        reward_token: String,
        #[serde(with = "serde_u256")]
        stake_period_seconds: U256,
        #[serde(with = "serde_u256")]
        reward_tokens_per_period: U256,
        live: PoolLiveState,
    },
    V2 {
        index: u64,
        #[serde(default)]
        address: Option<String>,
        config: PoolConfig,
        live: PoolLiveState,
    },
}

impl PoolSnapshot {
    /// Joins configuration and live state under the pool uid.
    #[must_use]
    pub fn to_record(&self) -> PoolRecord {
        match self {
            Self::V1 {
                index,
                address,
                staked_token,
                reward_token,
                stake_period_seconds,
                reward_tokens_per_period,
                live,
            } => PoolRecord {
                uid: PoolUid::new(PoolVersion::V1, *index),
                address: address.clone(),
                config: PoolConfig::flat(
                    staked_token.clone(),
                    reward_token.clone(),
                    *stake_period_seconds,
                    *reward_tokens_per_period,
                ),
                live: live.clone(),
            },
            Self::V2 {
                index,
                address,
                config,
                live,
            } => PoolRecord {
                uid: PoolUid::new(PoolVersion::V2, *index),
                address: address.clone(),
                config: config.clone(),
                live: live.clone(),
            },
        }
    }
}

/// Everything read from one chain at one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain_id: u64,
    pub block_number: u64,
    pub block_timestamp: DateTime<Utc>,
    /// Address of the reference stablecoin.
    pub stablecoin: String,
    /// Tokens price routes may pass through. Empty allows every pair.
    #[serde(default)]
    pub routing_bases: Vec<String>,
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pairs: Vec<PairSnapshot>,
    #[serde(default)]
    pub pools: Vec<PoolSnapshot>,
}

impl ChainSnapshot {
    /// Reads a snapshot from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        info!(
            path = %path.display(),
            chain_id = snapshot.chain_id,
            block = snapshot.block_number,
            pools = snapshot.pools.len(),
            "Loaded chain snapshot"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        debug!(path = %path.display(), "Saved chain snapshot");
        Ok(())
    }

    /// Token metadata as a lookup table.
    #[must_use]
    pub fn registry(&self) -> TokenRegistry {
        self.tokens.iter().cloned().collect()
    }

    /// Pool records, in snapshot order.
    #[must_use]
    pub fn records(&self) -> Vec<PoolRecord> {
        self.pools.iter().map(PoolSnapshot::to_record).collect()
    }

    /// The reference stablecoin's metadata.
    ///
    /// # Errors
    /// Returns an error if the stablecoin is not among the tokens.
    pub fn stablecoin_token(&self, registry: &TokenRegistry) -> Result<Token> {
        registry
            .get(&self.stablecoin)
            .cloned()
            .ok_or_else(|| anyhow!("Stablecoin {} has no token metadata", self.stablecoin))
    }

    /// Routing base tokens, skipping addresses without metadata.
    #[must_use]
    pub fn routing_base_tokens(&self, registry: &TokenRegistry) -> Vec<Token> {
        self.routing_bases
            .iter()
            .filter_map(|address| {
                let token = registry.get(address).cloned();
                if token.is_none() {
                    warn!(base = %address, "Routing base has no token metadata");
                }
                token
            })
            .collect()
    }

    /// Builds a pair and its LP supply from a snapshot entry.
    ///
    /// The LP token uses registry metadata when present, otherwise
    /// 18 decimals.
    ///
    /// # Errors
    /// Returns an error if either side of the pair has no token metadata.
    pub fn pair(&self, entry: &PairSnapshot, registry: &TokenRegistry) -> Result<(Pair, U256)> {
        let token0 = registry
            .get(&entry.token0)
            .cloned()
            .ok_or_else(|| anyhow!("Pair {} token {} has no metadata", entry.address, entry.token0))?;
        let token1 = registry
            .get(&entry.token1)
            .cloned()
            .ok_or_else(|| anyhow!("Pair {} token {} has no metadata", entry.address, entry.token1))?;
        let liquidity_token = registry.get(&entry.address).cloned().unwrap_or_else(|| {
            Token::new(
                self.chain_id,
                entry.address.clone(),
                18,
                format!("{}-{} LP", token0.symbol, token1.symbol),
                "Liquidity pair share",
            )
        });
        let pair = Pair::new(liquidity_token, (token0, entry.reserve0), (token1, entry.reserve1))?
            .with_fee_bps(entry.fee_bps);
        Ok((pair, entry.total_supply))
    }
}
