//! USD price resolution.
//!
//! Quotes a token by simulating an exact-output trade for a fixed probe
//! amount of the stablecoin and taking the mid price of the winning route.
//! LP shares are valued from the pooled reserve of one side.
//!
//! The resolver only sees the pairs it was built with; fetching and
//! caching pairs is up to the caller.

use crate::error::PricingResult;
use crate::pair::Pair;
use crate::trade::{Trade, TradeOptions, best_trade_exact_out, is_trade_better};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use stake_yield_domain::prelude::{BIPS_BASE, CurrencyAmount, Fraction, Percent, Price, Token};
use tracing::{debug, warn};

/// Resolver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Stablecoin output of the simulated trade, in raw units.
    #[serde(with = "stake_yield_domain::serde_u256")]
    pub probe_amount: U256,
    /// Longest route searched.
    pub max_hops: usize,
    /// A longer route must beat a shorter one by more than this.
    pub better_trade_threshold_bps: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            // 100_000 of a 6-decimal stablecoin
            probe_amount: U256::from(100_000_000_000u64),
            max_hops: 2,
            better_trade_threshold_bps: 50,
        }
    }
}

/// Something that can be quoted in USD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricedAsset {
    Token(Token),
    /// A share of `pair` with the given total supply of LP tokens.
    PairShare { pair: Pair, total_supply: U256 },
}

impl PricedAsset {
    /// Token whose raw units the price is expressed per.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Token(token) => token,
            Self::PairShare { pair, .. } => pair.liquidity_token(),
        }
    }
}

/// Quotes tokens and LP shares against a stablecoin.
#[derive(Debug, Clone)]
pub struct UsdPriceResolver {
    stablecoin: Token,
    pairs: Vec<Pair>,
    config: ResolverConfig,
}

impl UsdPriceResolver {
    #[must_use]
    pub fn new(stablecoin: Token, pairs: Vec<Pair>, config: ResolverConfig) -> Self {
        Self {
            stablecoin,
            pairs,
            config,
        }
    }

    #[must_use]
    pub fn stablecoin(&self) -> &Token {
        &self.stablecoin
    }

    #[must_use]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Best trade buying the probe amount of stablecoin with `token`.
    ///
    /// Tries every hop count up to `max_hops` and only switches to a longer
    /// route when it is better by more than the threshold.
    pub fn best_trade(&self, token: &Token) -> PricingResult<Option<Trade>> {
        let amount_out = CurrencyAmount::from_raw(self.stablecoin.clone(), self.config.probe_amount);
        let threshold = Percent::from_bps(self.config.better_trade_threshold_bps, BIPS_BASE)?;

        let mut best: Option<Trade> = None;
        for hops in 1..=self.config.max_hops {
            let options = TradeOptions {
                max_hops: hops,
                max_num_results: 1,
            };
            let candidate = best_trade_exact_out(&self.pairs, token, &amount_out, options)?
                .into_iter()
                .next();
            if is_trade_better(best.as_ref(), candidate.as_ref(), threshold)? {
                best = candidate;
            }
        }
        Ok(best)
    }

    /// USD price of one raw unit of `token`.
    ///
    /// `None` when no route to the stablecoin exists.
    pub fn usd_price(&self, token: &Token) -> Option<Price> {
        if token == &self.stablecoin {
            return Some(Price::identity(self.stablecoin.clone()));
        }
        let trade = match self.best_trade(token) {
            Ok(Some(trade)) => trade,
            Ok(None) => {
                debug!(token = %token.symbol, "No route to stablecoin");
                return None;
            }
            Err(e) => {
                warn!(token = %token.symbol, error = %e, "Failed to search route");
                return None;
            }
        };
        match trade.route.mid_price() {
            Ok(price) => {
                debug!(token = %token.symbol, route = %trade.route, price = %price, "Resolved USD price");
                Some(price)
            }
            Err(e) => {
                warn!(token = %token.symbol, error = %e, "Failed to price route");
                None
            }
        }
    }

    /// USD value of `amount`.
    pub fn usd_value(&self, amount: &CurrencyAmount) -> Option<CurrencyAmount> {
        self.usd_price(&amount.token)?.quote(amount).ok()
    }

    /// USD price of one raw LP share of `pair`.
    ///
    /// formula: 2 * reserve_base / total_supply * usd_price(base)
    ///
    /// The base is token0, or token1 when token0 has no route. A zero
    /// supply is treated as 1.
    pub fn pair_usd_price(&self, pair: &Pair, total_supply: U256) -> Option<Price> {
        let (base, base_price) = [pair.token0(), pair.token1()]
            .into_iter()
            .find_map(|token| self.usd_price(token).map(|price| (token, price)))?;
        let reserve = pair.reserve_of(base).ok()?;
        let supply = total_supply.max(U256::one());

        let share_in_base = Fraction::new(reserve, supply).ok()?.mul_int(2u64).ok()?;
        let share_price = Price::from_fraction(pair.liquidity_token().clone(), base.clone(), share_in_base);
        share_price.checked_mul(&base_price).ok()
    }

    /// USD price of one raw unit of `asset`.
    pub fn asset_usd_price(&self, asset: &PricedAsset) -> Option<Price> {
        match asset {
            PricedAsset::Token(token) => self.usd_price(token),
            PricedAsset::PairShare { pair, total_supply } => self.pair_usd_price(pair, *total_supply),
        }
    }

    /// Price of `a` in `b`, through their USD prices.
    ///
    /// `None` unless both sides can be priced.
    pub fn price_ratio(&self, a: &PricedAsset, b: &PricedAsset) -> Option<Price> {
        let price_a = self.asset_usd_price(a)?;
        let price_b = self.asset_usd_price(b)?;
        price_a.checked_mul(&price_b.invert().ok()?).ok()
    }
}
