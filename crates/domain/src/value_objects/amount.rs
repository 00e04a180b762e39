use crate::entities::token::Token;
use crate::error::{DomainError, DomainResult};
use crate::math::big::exp10;
use crate::value_objects::fraction::Fraction;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a token, held as an exact fraction of raw base units.
///
/// Reward rates are fractional (tokens per second), so the raw amount is a
/// `Fraction` rather than an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub token: Token,
    pub raw: Fraction,
}

impl CurrencyAmount {
    /// Wraps an integer number of base units.
    #[must_use]
    pub fn from_raw(token: Token, raw: impl Into<U256>) -> Self {
        Self {
            token,
            raw: Fraction::from_integer(raw),
        }
    }

    /// Wraps `numerator / denominator` base units.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `denominator` is zero.
    pub fn from_fractional(
        token: Token,
        numerator: impl Into<U256>,
        denominator: impl Into<U256>,
    ) -> DomainResult<Self> {
        Ok(Self {
            token,
            raw: Fraction::new(numerator, denominator)?,
        })
    }

    #[must_use]
    pub fn zero(token: Token) -> Self {
        Self::from_raw(token, U256::zero())
    }

    /// Whole base units, rounded down.
    #[must_use]
    pub fn quotient(&self) -> U256 {
        self.raw.quotient()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Adds an amount of the same token.
    ///
    /// # Errors
    /// Returns `TokenMismatch` for a different token.
    pub fn checked_add(&self, other: &Self) -> DomainResult<Self> {
        self.ensure_same_token(other)?;
        Ok(Self {
            token: self.token.clone(),
            raw: self.raw.checked_add(&other.raw)?,
        })
    }

    /// Scales the amount by a fraction, keeping the token.
    pub fn multiply(&self, factor: &Fraction) -> DomainResult<Self> {
        Ok(Self {
            token: self.token.clone(),
            raw: self.raw.checked_mul(factor)?,
        })
    }

    /// Divides the amount by a fraction, keeping the token.
    pub fn divide(&self, divisor: &Fraction) -> DomainResult<Self> {
        Ok(Self {
            token: self.token.clone(),
            raw: self.raw.checked_div(divisor)?,
        })
    }

    /// Amount in whole tokens, as an exact fraction.
    pub fn to_units(&self) -> DomainResult<Fraction> {
        let scale = exp10(u32::from(self.token.decimals)).ok_or(DomainError::Overflow)?;
        self.raw.div_int(scale)
    }

    /// Amount in whole tokens with `places` decimals, rounded half up.
    ///
    /// # Errors
    /// Returns `Overflow` when the token's decimal scale does not fit.
    pub fn to_exact(&self, places: u32) -> DomainResult<String> {
        Ok(self.to_units()?.to_fixed(places))
    }

    fn ensure_same_token(&self, other: &Self) -> DomainResult<()> {
        if self.token != other.token {
            return Err(DomainError::TokenMismatch {
                expected: self.token.address.clone(),
                found: other.token.address.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_exact(u32::from(self.token.decimals.min(6))) {
            Ok(exact) => write!(f, "{exact} {}", self.token.symbol),
            Err(_) => write!(f, "- {}", self.token.symbol),
        }
    }
}

/// Parses user-typed decimal text into raw base units of `token`.
///
/// Returns `None` for empty or malformed text, more fractional digits than
/// the token supports, or a zero value.
#[must_use]
pub fn parse_units(typed: &str, token: &Token) -> Option<CurrencyAmount> {
    parse_raw_units(typed, token).filter(|amount| !amount.is_zero())
}

/// Like [`parse_units`], but accepts a well-formed zero.
#[must_use]
pub fn parse_raw_units(typed: &str, token: &Token) -> Option<CurrencyAmount> {
    let typed = typed.trim();
    if typed.is_empty() {
        return None;
    }

    let (whole, fractional) = match typed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (typed, ""),
    };
    if whole.is_empty() && fractional.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fractional.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let decimals = usize::from(token.decimals);
    if fractional.len() > decimals {
        return None;
    }

    let digits = format!("{whole}{fractional:0<decimals$}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some(CurrencyAmount::zero(token.clone()));
    }
    let raw = U256::from_dec_str(significant).ok()?;
    Some(CurrencyAmount::from_raw(token.clone(), raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(decimals: u8) -> Token {
        Token::new(56, "0x00000000000000000000000000000000000000aa", decimals, "TKN", "Token")
    }

    #[test]
    fn test_parse_units() {
        let t = token(18);
        let parsed = parse_units("1.5", &t).unwrap();
        assert_eq!(parsed.quotient(), U256::from(1_500_000_000_000_000_000u128));

        let t6 = token(6);
        assert_eq!(parse_units("  42 ", &t6).unwrap().quotient(), U256::from(42_000_000u64));
        assert_eq!(parse_units(".25", &t6).unwrap().quotient(), U256::from(250_000u64));
        assert_eq!(parse_units("3.", &t6).unwrap().quotient(), U256::from(3_000_000u64));
    }

    #[test]
    fn test_parse_units_rejects() {
        let t6 = token(6);
        assert!(parse_units("", &t6).is_none());
        assert!(parse_units(".", &t6).is_none());
        assert!(parse_units("0", &t6).is_none());
        assert!(parse_units("0.000", &t6).is_none());
        assert!(parse_units("1.0000001", &t6).is_none());
        assert!(parse_units("1e5", &t6).is_none());
        assert!(parse_units("-1", &t6).is_none());
        assert!(parse_units("1.2.3", &t6).is_none());
    }

    #[test]
    fn test_parse_raw_units_accepts_zero_only_when_well_formed() {
        let t6 = token(6);
        assert!(parse_raw_units("0", &t6).unwrap().is_zero());
        assert!(parse_raw_units("0.000", &t6).unwrap().is_zero());
        assert_eq!(parse_raw_units("2.5", &t6).unwrap().quotient(), U256::from(2_500_000u64));
        for typed in ["", ".", "0.0.0", "0x0", "-0", "0.0000001"] {
            assert!(parse_raw_units(typed, &t6).is_none(), "{typed}");
        }
    }

    #[test]
    fn test_add_requires_same_token() {
        let a = CurrencyAmount::from_raw(token(18), 5u64);
        let b = CurrencyAmount::from_raw(token(18), 7u64);
        assert_eq!(a.checked_add(&b).unwrap().quotient(), U256::from(12u64));

        let other = Token::new(56, "0x00000000000000000000000000000000000000bb", 18, "OTH", "Other");
        let c = CurrencyAmount::from_raw(other, 1u64);
        assert!(matches!(a.checked_add(&c), Err(DomainError::TokenMismatch { .. })));
    }

    #[test]
    fn test_to_exact() {
        let amount = CurrencyAmount::from_raw(token(6), 1_234_567u64);
        assert_eq!(amount.to_exact(2).unwrap(), "1.23");
        assert_eq!(amount.to_exact(6).unwrap(), "1.234567");
        assert_eq!(amount.to_string(), "1.234567 TKN");
    }

    #[test]
    fn test_to_exact_reports_unscalable_decimals() {
        let amount = CurrencyAmount::from_raw(token(78), 1u64);
        assert_eq!(amount.to_exact(2), Err(DomainError::Overflow));
        assert_eq!(amount.to_string(), "- TKN");
    }

    #[test]
    fn test_fractional_amount() {
        let rate = CurrencyAmount::from_fractional(token(18), 1000u64, 86_400u64).unwrap();
        assert_eq!(rate.quotient(), U256::zero());
        let weekly = rate.multiply(&Fraction::from_integer(604_800u64)).unwrap();
        assert_eq!(weekly.quotient(), U256::from(7000u64));
    }
}
