use crate::error::{PricingError, PricingResult};
use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};
use stake_yield_domain::DomainError;
use stake_yield_domain::math::big::narrow;
use stake_yield_domain::prelude::{BIPS_BASE, CurrencyAmount, Price, Token};

/// Swap fee of a standard pair, in basis points.
pub const DEFAULT_FEE_BPS: u32 = 30;

/// A constant-product (x * y = k) trading pair.
///
/// Tokens are kept in address order, as the pair contract stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    liquidity_token: Token,
    token0: Token,
    token1: Token,
    #[serde(with = "stake_yield_domain::serde_u256")]
    reserve0: U256,
    #[serde(with = "stake_yield_domain::serde_u256")]
    reserve1: U256,
    fee_bps: u32,
}

impl Pair {
    /// Creates a pair from two tokens and their reserves, in any order.
    ///
    /// # Errors
    /// Returns `IdenticalTokens` when both sides are the same token.
    pub fn new(
        liquidity_token: Token,
        (token_a, reserve_a): (Token, U256),
        (token_b, reserve_b): (Token, U256),
    ) -> PricingResult<Self> {
        if token_a == token_b {
            return Err(PricingError::IdenticalTokens(token_a.address));
        }
        let ((token0, reserve0), (token1, reserve1)) = if token_a.sorts_before(&token_b) {
            ((token_a, reserve_a), (token_b, reserve_b))
        } else {
            ((token_b, reserve_b), (token_a, reserve_a))
        };
        Ok(Self {
            liquidity_token,
            token0,
            token1,
            reserve0,
            reserve1,
            fee_bps: DEFAULT_FEE_BPS,
        })
    }

    /// Overrides the swap fee.
    #[must_use]
    pub fn with_fee_bps(mut self, fee_bps: u32) -> Self {
        self.fee_bps = fee_bps;
        self
    }

    #[must_use]
    pub fn liquidity_token(&self) -> &Token {
        &self.liquidity_token
    }

    #[must_use]
    pub fn token0(&self) -> &Token {
        &self.token0
    }

    #[must_use]
    pub fn token1(&self) -> &Token {
        &self.token1
    }

    #[must_use]
    pub fn reserve0(&self) -> U256 {
        self.reserve0
    }

    #[must_use]
    pub fn reserve1(&self) -> U256 {
        self.reserve1
    }

    #[must_use]
    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    #[must_use]
    pub fn involves(&self, token: &Token) -> bool {
        token == &self.token0 || token == &self.token1
    }

    /// The side of the pair opposite `token`.
    pub fn other(&self, token: &Token) -> PricingResult<&Token> {
        if token == &self.token0 {
            Ok(&self.token1)
        } else if token == &self.token1 {
            Ok(&self.token0)
        } else {
            Err(PricingError::UnknownToken(token.address.clone()))
        }
    }

    /// Raw reserve of `token`.
    pub fn reserve_of(&self, token: &Token) -> PricingResult<U256> {
        if token == &self.token0 {
            Ok(self.reserve0)
        } else if token == &self.token1 {
            Ok(self.reserve1)
        } else {
            Err(PricingError::UnknownToken(token.address.clone()))
        }
    }

    /// Mid price of `token` in the other side of the pair.
    ///
    /// formula: reserve_other / reserve_token
    pub fn price_of(&self, token: &Token) -> PricingResult<Price> {
        let other = self.other(token)?;
        let price = Price::new(
            token.clone(),
            other.clone(),
            self.reserve_of(token)?,
            self.reserve_of(other)?,
        )?;
        Ok(price)
    }

    /// Input needed to receive exactly `output` from the pair.
    ///
    /// formula: dx = x * dy * base / ((y - dy) * (base - fee)) + 1
    ///
    /// # Errors
    /// Returns `InsufficientReserves` when a reserve is empty or `output`
    /// would drain the output reserve.
    pub fn input_amount_for(&self, output: &CurrencyAmount) -> PricingResult<CurrencyAmount> {
        let input_token = self.other(&output.token)?;
        let reserve_out = self.reserve_of(&output.token)?;
        let reserve_in = self.reserve_of(input_token)?;
        let amount_out = output.quotient();

        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(PricingError::InsufficientReserves);
        }
        if self.fee_bps >= BIPS_BASE {
            return Err(PricingError::InsufficientReserves);
        }

        let numerator = reserve_in
            .full_mul(amount_out)
            .checked_mul(U512::from(BIPS_BASE))
            .ok_or(DomainError::Overflow)?;
        let denominator = (reserve_out - amount_out).full_mul(U256::from(BIPS_BASE - self.fee_bps));
        let amount_in = narrow(numerator / denominator)?
            .checked_add(U256::one())
            .ok_or(DomainError::Overflow)?;

        Ok(CurrencyAmount::from_raw(input_token.clone(), amount_in))
    }
}
