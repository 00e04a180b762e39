use crate::pair::Pair;
use crate::resolver::{PricedAsset, UsdPriceResolver};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use stake_yield_domain::prelude::{CurrencyAmount, Fraction, StakingInfo};
use tracing::debug;

/// USD-facing figures of one pool. Each is `None` when a needed price has
/// no route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolValuation {
    /// Total staked LP shares expressed in the pair's base token.
    pub staked_value_in_base: Option<CurrencyAmount>,
    /// Total value locked, in the stablecoin.
    pub tvl_usd: Option<CurrencyAmount>,
    /// APY with reward and staked tokens converted at their USD prices.
    pub usd_apy: Option<Fraction>,
}

impl PoolValuation {
    /// Values `info`. `staked_pair` is the pair and LP total supply when
    /// the staked token is an LP share.
    #[must_use]
    pub fn evaluate(info: &StakingInfo, resolver: &UsdPriceResolver, staked_pair: Option<(&Pair, U256)>) -> Self {
        let staked_asset = match staked_pair {
            Some((pair, total_supply)) => PricedAsset::PairShare {
                pair: pair.clone(),
                total_supply,
            },
            None => PricedAsset::Token(info.staked_token.clone()),
        };

        let staked_value_in_base =
            staked_pair.and_then(|(pair, supply)| Self::lp_value_in_base(&info.total_staked_amount, pair, supply, resolver));

        let tvl_usd = match staked_pair {
            Some(_) => staked_value_in_base.as_ref().and_then(|value| resolver.usd_value(value)),
            None => resolver.usd_value(&info.total_staked_amount),
        };

        let usd_apy = if staked_pair.is_none() && info.staked_token == info.reward_token {
            Some(info.apy)
        } else {
            resolver
                .price_ratio(&PricedAsset::Token(info.reward_token.clone()), &staked_asset)
                .and_then(|ratio| info.apy.checked_mul(&ratio.as_fraction()).ok())
        };

        debug!(
            pool = %info.pool_uid,
            tvl_priced = tvl_usd.is_some(),
            apy_priced = usd_apy.is_some(),
            "Valued staking pool"
        );

        Self {
            staked_value_in_base,
            tvl_usd,
            usd_apy,
        }
    }

    /// formula: staked * 2 * reserve_base / total_supply
    ///
    /// The base side is the first with a USD price, token0 when neither has.
    fn lp_value_in_base(
        staked: &CurrencyAmount,
        pair: &Pair,
        total_supply: U256,
        resolver: &UsdPriceResolver,
    ) -> Option<CurrencyAmount> {
        let base = [pair.token0(), pair.token1()]
            .into_iter()
            .find(|token| resolver.usd_price(token).is_some())
            .unwrap_or(pair.token0());
        let reserve = pair.reserve_of(base).ok()?;
        let share = Fraction::new(reserve, total_supply.max(U256::one())).ok()?.mul_int(2u64).ok()?;
        Some(CurrencyAmount {
            token: base.clone(),
            raw: staked.raw.checked_mul(&share).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cake, cake_wbnb, lp_token, orphan, units, usdc, wbnb, wbnb_usdc};
    use crate::resolver::ResolverConfig;
    use stake_yield_domain::prelude::{Percent, PoolUid, PoolVersion, Token};

    fn resolver() -> UsdPriceResolver {
        UsdPriceResolver::new(usdc(), vec![wbnb_usdc(), cake_wbnb()], ResolverConfig::default())
    }

    fn info(staked: Token, reward: Token, total_staked: U256, apy: u64) -> StakingInfo {
        StakingInfo {
            pool_uid: PoolUid::new(PoolVersion::V2, 0),
            pool_index: 0,
            version: PoolVersion::V2,
            address: None,
            staked_token: staked.clone(),
            reward_token: reward.clone(),
            staked_pair_tokens: None,
            staked_amount: CurrencyAmount::zero(staked.clone()),
            total_staked_amount: CurrencyAmount::from_raw(staked.clone(), total_staked),
            unclaimed_amount: CurrencyAmount::zero(reward.clone()),
            claimed_amount: CurrencyAmount::zero(reward.clone()),
            minimum_to_stake: CurrencyAmount::zero(staked),
            count_stakers: U256::one(),
            total_reward_rate: CurrencyAmount::zero(reward.clone()),
            user_reward_rate: CurrencyAmount::zero(reward),
            reward_divider: Fraction::one(),
            apy: Fraction::from_integer(apy),
            staking_tax: Percent::zero(),
            unstaking_tax: Percent::zero(),
            retrieving_tax: Percent::zero(),
            open: true,
        }
    }

    #[test]
    fn test_token_pool() {
        // stake WBNB (300 USD), earn CAKE (3 USD)
        let pool = info(wbnb(), cake(), units(10, 18), 100);
        let valuation = PoolValuation::evaluate(&pool, &resolver(), None);

        assert!(valuation.staked_value_in_base.is_none());
        assert_eq!(valuation.tvl_usd.unwrap().quotient(), units(3_000, 6));
        // 100 raw CAKE per raw WBNB a year, at 3 / 300
        assert_eq!(valuation.usd_apy, Some(Fraction::from_integer(1u64)));
    }

    #[test]
    fn test_lp_pool() {
        // 5 of 10 WBNB/USDC shares staked, earn CAKE
        let pool = info(lp_token(1), cake(), units(5, 18), 2_000_000);
        let pair = wbnb_usdc();
        let valuation = PoolValuation::evaluate(&pool, &resolver(), Some((&pair, units(10, 18))));

        let in_base = valuation.staked_value_in_base.unwrap();
        assert_eq!(in_base.token, usdc());
        assert_eq!(in_base.quotient(), units(300_000, 6));
        assert_eq!(valuation.tvl_usd.unwrap().quotient(), units(300_000, 6));
        // share worth 60_000 USD per 1e18 raw, CAKE 3 USD per 1e18 raw
        assert_eq!(valuation.usd_apy, Some(Fraction::from_integer(100u64)));
    }

    #[test]
    fn test_same_token_pool_keeps_apy() {
        let pool = info(orphan(), orphan(), units(1, 18), 42);
        let valuation = PoolValuation::evaluate(&pool, &resolver(), None);
        assert!(valuation.tvl_usd.is_none());
        assert_eq!(valuation.usd_apy, Some(Fraction::from_integer(42u64)));
    }

    #[test]
    fn test_unpriced_reward() {
        let pool = info(wbnb(), orphan(), units(1, 18), 42);
        let valuation = PoolValuation::evaluate(&pool, &resolver(), None);
        assert!(valuation.tvl_usd.is_some());
        assert!(valuation.usd_apy.is_none());
    }
}
