use crate::provider::{BlockRef, PairState, StakingDataProvider};
use anyhow::Result;
use serde::Serialize;
use stake_yield_domain::prelude::{
    CurrencyAmount, DomainError, DomainResult, StakingInfo, StakingInfoMapper, Token, YieldCalculator,
    total_unclaimed,
};
use stake_yield_pricing::prelude::{PoolValuation, ResolverConfig, UsdPriceResolver, routing_pairs};
use tracing::{debug, info};

/// A mapped pool with its USD figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolOverview {
    pub info: StakingInfo,
    pub valuation: PoolValuation,
}

/// Every pool at one block, ready for display.
#[derive(Debug, Clone)]
pub struct StakingOverview {
    pub block: BlockRef,
    pub stablecoin: Token,
    pub pools: Vec<PoolOverview>,
    /// Pools whose configuration was rejected.
    pub rejected: Vec<(String, DomainError)>,
    /// Pools whose tokens had no metadata.
    pub skipped: Vec<String>,
}

impl StakingOverview {
    /// Unclaimed rewards in `reward_token` across all pools.
    pub fn total_unclaimed(&self, reward_token: &Token) -> DomainResult<CurrencyAmount> {
        let infos: Vec<StakingInfo> = self.pools.iter().map(|p| p.info.clone()).collect();
        total_unclaimed(&infos, reward_token)
    }
}

/// Builds a resolver over the pairs on a route through the provider's
/// routing bases, and returns every pair the provider knows.
///
/// # Errors
/// Returns an error if the provider fails.
pub async fn load_resolver(
    provider: &dyn StakingDataProvider,
    config: ResolverConfig,
) -> Result<(UsdPriceResolver, Vec<PairState>)> {
    let stablecoin = provider.stablecoin().await?;
    let pairs = provider.pairs().await?;
    let bases = provider.routing_bases().await?;

    let routed = routing_pairs(pairs.iter().map(|p| p.pair.clone()).collect(), &stablecoin, &bases);
    debug!(pairs = pairs.len(), routed = routed.len(), bases = bases.len(), "Loaded pricing pairs");

    let resolver = UsdPriceResolver::new(stablecoin, routed, config);
    Ok((resolver, pairs))
}

/// Reads every pool from `provider`, maps it and values it.
///
/// # Errors
/// Returns an error if the provider fails. Invalid pools are reported in
/// the overview, not as errors.
pub async fn build_overview(
    provider: &dyn StakingDataProvider,
    calculator: YieldCalculator,
    resolver_config: ResolverConfig,
) -> Result<StakingOverview> {
    let block = provider.block().await?;
    let registry = provider.tokens().await?;
    let records = provider.pool_records().await?;
    let (resolver, pairs) = load_resolver(provider, resolver_config).await?;

    let mapped = StakingInfoMapper::new(calculator).map_all(&records, &registry);

    let pools = mapped
        .infos
        .into_iter()
        .map(|info| {
            let staked_pair = pairs
                .iter()
                .find(|p| p.pair.liquidity_token() == &info.staked_token)
                .map(|p| (&p.pair, p.total_supply));
            let valuation = PoolValuation::evaluate(&info, &resolver, staked_pair);
            PoolOverview { info, valuation }
        })
        .collect::<Vec<_>>();

    info!(
        block = block.number,
        pools = pools.len(),
        rejected = mapped.rejected.len(),
        skipped = mapped.skipped.len(),
        "Built staking overview"
    );

    Ok(StakingOverview {
        block,
        stablecoin: resolver.stablecoin().clone(),
        pools,
        rejected: mapped.rejected,
        skipped: mapped.skipped,
    })
}
