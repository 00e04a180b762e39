//! Exact-output trade search.
//!
//! Enumerates every route of up to `max_hops` pairs that ends in the
//! requested output token, quotes the input each one needs, and keeps the
//! cheapest.

use crate::error::{PricingError, PricingResult};
use crate::pair::Pair;
use crate::route::Route;
use stake_yield_domain::prelude::{CurrencyAmount, Fraction, Percent, Token};
use std::cmp::Ordering;

/// A quoted trade along a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub route: Route,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

impl Trade {
    /// Output received per unit of input, in raw units.
    pub fn execution_price(&self) -> PricingResult<Fraction> {
        Ok(self.output_amount.raw.checked_div(&self.input_amount.raw)?)
    }

    #[must_use]
    pub fn hops(&self) -> usize {
        self.route.hops()
    }
}

/// Search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeOptions {
    /// Longest route considered.
    pub max_hops: usize,
    /// Trades kept, best first.
    pub max_num_results: usize,
}

impl Default for TradeOptions {
    fn default() -> Self {
        Self {
            max_hops: 3,
            max_num_results: 3,
        }
    }
}

/// Orders trades for the same output: least input first, then fewest hops.
fn compare_trades(a: &Trade, b: &Trade) -> Ordering {
    a.input_amount
        .raw
        .cmp(&b.input_amount.raw)
        .then_with(|| a.hops().cmp(&b.hops()))
}

/// Best trades that spend `token_in` to receive exactly `amount_out`.
///
/// Pairs whose reserves cannot fill a hop are skipped.
///
/// # Errors
/// Fails only on arithmetic overflow or on a malformed route.
pub fn best_trade_exact_out(
    pairs: &[Pair],
    token_in: &Token,
    amount_out: &CurrencyAmount,
    options: TradeOptions,
) -> PricingResult<Vec<Trade>> {
    let mut trades = Vec::new();
    if options.max_hops == 0 || token_in == &amount_out.token {
        return Ok(trades);
    }
    search(pairs, token_in, amount_out, amount_out, Vec::new(), options.max_hops, &mut trades)?;
    trades.sort_by(compare_trades);
    trades.truncate(options.max_num_results);
    Ok(trades)
}

fn search(
    pairs: &[Pair],
    token_in: &Token,
    original_out: &CurrencyAmount,
    current_out: &CurrencyAmount,
    suffix: Vec<Pair>,
    max_hops: usize,
    trades: &mut Vec<Trade>,
) -> PricingResult<()> {
    for (i, pair) in pairs.iter().enumerate() {
        if !pair.involves(&current_out.token) {
            continue;
        }
        let amount_in = match pair.input_amount_for(current_out) {
            Ok(amount) => amount,
            Err(PricingError::InsufficientReserves) => continue,
            Err(e) => return Err(e),
        };

        let mut route_pairs = Vec::with_capacity(suffix.len() + 1);
        route_pairs.push(pair.clone());
        route_pairs.extend(suffix.iter().cloned());

        if &amount_in.token == token_in {
            trades.push(Trade {
                route: Route::new(route_pairs, token_in.clone())?,
                input_amount: amount_in,
                output_amount: original_out.clone(),
            });
        } else if max_hops > 1 && pairs.len() > 1 {
            let remaining: Vec<Pair> = pairs[..i].iter().chain(&pairs[i + 1..]).cloned().collect();
            search(&remaining, token_in, original_out, &amount_in, route_pairs, max_hops - 1, trades)?;
        }
    }
    Ok(())
}

/// Whether `candidate` beats `current` by more than `threshold`.
///
/// Any trade beats no trade. A zero threshold compares execution prices
/// directly.
pub fn is_trade_better(
    current: Option<&Trade>,
    candidate: Option<&Trade>,
    threshold: Percent,
) -> PricingResult<bool> {
    match (current, candidate) {
        (_, None) => Ok(false),
        (None, Some(_)) => Ok(true),
        (Some(current), Some(candidate)) => {
            let scaled = current
                .execution_price()?
                .checked_mul(&Fraction::one().checked_add(&threshold.as_fraction())?)?;
            Ok(scaled < candidate.execution_price()?)
        }
    }
}
