//! Data provider seam.
//!
//! The calculator and resolver never read chain state themselves; a
//! `StakingDataProvider` hands them plain values. Implementations decide
//! how to batch and cache reads.

use crate::snapshot::ChainSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use stake_yield_domain::prelude::{PoolRecord, Token, TokenRegistry};
use stake_yield_pricing::prelude::Pair;
use std::path::Path;
use tracing::warn;

/// Block the data was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub chain_id: u64,
    pub number: u64,
    pub timestamp: DateTime<Utc>,
}

/// A pair together with the total supply of its LP token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairState {
    pub pair: Pair,
    pub total_supply: U256,
}

/// Source of chain state for the staking pools.
#[async_trait]
pub trait StakingDataProvider: Send + Sync {
    /// Block the other reads reflect.
    async fn block(&self) -> Result<BlockRef>;

    /// Metadata of every known token.
    async fn tokens(&self) -> Result<TokenRegistry>;

    /// The reference stablecoin.
    async fn stablecoin(&self) -> Result<Token>;

    /// Configuration and live state of every pool.
    async fn pool_records(&self) -> Result<Vec<PoolRecord>>;

    /// Trading pairs usable for pricing.
    async fn pairs(&self) -> Result<Vec<PairState>>;

    /// Tokens price routes may pass through. Empty allows every pair.
    async fn routing_bases(&self) -> Result<Vec<Token>> {
        Ok(Vec::new())
    }
}

/// Provider backed by a [`ChainSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    snapshot: ChainSnapshot,
}

impl SnapshotProvider {
    #[must_use]
    pub fn new(snapshot: ChainSnapshot) -> Self {
        Self { snapshot }
    }

    /// Loads the snapshot at `path`.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be read or parsed.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ChainSnapshot::load(path).await?))
    }

    #[must_use]
    pub fn snapshot(&self) -> &ChainSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl StakingDataProvider for SnapshotProvider {
    async fn block(&self) -> Result<BlockRef> {
        Ok(BlockRef {
            chain_id: self.snapshot.chain_id,
            number: self.snapshot.block_number,
            timestamp: self.snapshot.block_timestamp,
        })
    }

    async fn tokens(&self) -> Result<TokenRegistry> {
        Ok(self.snapshot.registry())
    }

    async fn stablecoin(&self) -> Result<Token> {
        self.snapshot.stablecoin_token(&self.snapshot.registry())
    }

    async fn pool_records(&self) -> Result<Vec<PoolRecord>> {
        Ok(self.snapshot.records())
    }

    /// Pairs with missing token metadata are skipped with a warning.
    async fn pairs(&self) -> Result<Vec<PairState>> {
        let registry = self.snapshot.registry();
        let mut pairs = Vec::with_capacity(self.snapshot.pairs.len());
        for entry in &self.snapshot.pairs {
            match self.snapshot.pair(entry, &registry) {
                Ok((pair, total_supply)) => pairs.push(PairState { pair, total_supply }),
                Err(e) => warn!(pair = %entry.address, error = %e, "Skipping pair"),
            }
        }
        Ok(pairs)
    }

    async fn routing_bases(&self) -> Result<Vec<Token>> {
        Ok(self.snapshot.routing_base_tokens(&self.snapshot.registry()))
    }
}
