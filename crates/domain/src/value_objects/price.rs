use crate::entities::token::Token;
use crate::error::{DomainError, DomainResult};
use crate::math::big::exp10;
use crate::value_objects::amount::CurrencyAmount;
use crate::value_objects::fraction::Fraction;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price of `base` in `quote`, as a ratio of raw base units.
///
/// `ratio` is how many raw `quote` units one raw `base` unit is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub base: Token,
    pub quote: Token,
    ratio: Fraction,
}

impl Price {
    /// Creates the price implied by swapping `base_raw` for `quote_raw`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `base_raw` is zero.
    pub fn new(
        base: Token,
        quote: Token,
        base_raw: impl Into<U256>,
        quote_raw: impl Into<U256>,
    ) -> DomainResult<Self> {
        Ok(Self {
            base,
            quote,
            ratio: Fraction::new(quote_raw, base_raw)?,
        })
    }

    /// Creates a price from an existing raw ratio.
    #[must_use]
    pub fn from_fraction(base: Token, quote: Token, ratio: Fraction) -> Self {
        Self { base, quote, ratio }
    }

    /// The unit price of a token in itself.
    #[must_use]
    pub fn identity(token: Token) -> Self {
        Self {
            base: token.clone(),
            quote: token,
            ratio: Fraction::one(),
        }
    }

    /// Raw-unit ratio.
    #[must_use]
    pub fn as_fraction(&self) -> Fraction {
        self.ratio
    }

    /// Converts an amount of `base` into `quote`.
    ///
    /// # Errors
    /// Returns `TokenMismatch` when the amount is not denominated in `base`.
    pub fn quote(&self, amount: &CurrencyAmount) -> DomainResult<CurrencyAmount> {
        if amount.token != self.base {
            return Err(DomainError::TokenMismatch {
                expected: self.base.address.clone(),
                found: amount.token.address.clone(),
            });
        }
        Ok(CurrencyAmount {
            token: self.quote.clone(),
            raw: amount.raw.checked_mul(&self.ratio)?,
        })
    }

    /// Chains `base -> quote` with `quote -> other.quote`.
    ///
    /// # Errors
    /// Returns `PriceChainMismatch` when `other.base` is not `self.quote`.
    pub fn checked_mul(&self, other: &Price) -> DomainResult<Price> {
        if self.quote != other.base {
            return Err(DomainError::PriceChainMismatch {
                quote: self.quote.symbol.clone(),
                base: other.base.symbol.clone(),
            });
        }
        Ok(Price {
            base: self.base.clone(),
            quote: other.quote.clone(),
            ratio: self.ratio.checked_mul(&other.ratio)?,
        })
    }

    /// Price of `quote` in `base`.
    pub fn invert(&self) -> DomainResult<Price> {
        Ok(Price {
            base: self.quote.clone(),
            quote: self.base.clone(),
            ratio: self.ratio.invert()?,
        })
    }

    /// Price of one whole `base` token in whole `quote` tokens.
    pub fn adjusted(&self) -> DomainResult<Fraction> {
        let base_scale = exp10(u32::from(self.base.decimals)).ok_or(DomainError::Overflow)?;
        let quote_scale = exp10(u32::from(self.quote.decimals)).ok_or(DomainError::Overflow)?;
        self.ratio.checked_mul(&Fraction::new(base_scale, quote_scale)?)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.adjusted() {
            Ok(adjusted) => write!(f, "{} {}/{}", adjusted.to_fixed(6), self.quote, self.base),
            Err(_) => write!(f, "{} (raw) {}/{}", self.ratio, self.quote, self.base),
        }
    }
}
