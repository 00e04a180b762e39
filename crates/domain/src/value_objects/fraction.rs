use crate::error::{DomainError, DomainResult};
use crate::math::big::{exp10, gcd, narrow};
use primitive_types::{U256, U512};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An exact, non-negative rational number.
///
/// Always stored in lowest terms with a positive denominator, so the derived
/// equality is value equality. Products are formed in 512 bits and reduced
/// before narrowing back to 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFraction")]
pub struct Fraction {
    #[serde(with = "crate::serde_u256")]
    numerator: U256,
    #[serde(with = "crate::serde_u256")]
    denominator: U256,
}

/// Wire form of a [`Fraction`], reduced and checked on the way in.
#[derive(Deserialize)]
struct RawFraction {
    #[serde(with = "crate::serde_u256")]
    numerator: U256,
    #[serde(with = "crate::serde_u256")]
    denominator: U256,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = DomainError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl Fraction {
    /// Creates a reduced fraction.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `denominator` is zero.
    pub fn new(numerator: impl Into<U256>, denominator: impl Into<U256>) -> DomainResult<Self> {
        Self::reduce(U512::from(numerator.into()), U512::from(denominator.into()))
    }

    /// Creates `value / 1`.
    #[must_use]
    pub fn from_integer(value: impl Into<U256>) -> Self {
        Self {
            numerator: value.into(),
            denominator: U256::one(),
        }
    }

    /// Returns `0 / 1`.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_integer(U256::zero())
    }

    /// Returns `1 / 1`.
    #[must_use]
    pub fn one() -> Self {
        Self::from_integer(U256::one())
    }

    fn reduce(numerator: U512, denominator: U512) -> DomainResult<Self> {
        if denominator.is_zero() {
            return Err(DomainError::DivisionByZero);
        }
        if numerator.is_zero() {
            return Ok(Self::zero());
        }
        let divisor = gcd(numerator, denominator);
        Ok(Self {
            numerator: narrow(numerator / divisor)?,
            denominator: narrow(denominator / divisor)?,
        })
    }

    /// Numerator in lowest terms.
    #[must_use]
    pub fn numerator(&self) -> U256 {
        self.numerator
    }

    /// Denominator in lowest terms.
    #[must_use]
    pub fn denominator(&self) -> U256 {
        self.denominator
    }

    /// Integer part, rounded down.
    #[must_use]
    pub fn quotient(&self) -> U256 {
        self.numerator / self.denominator
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Adds two fractions.
    ///
    /// # Errors
    /// Returns `Overflow` when the reduced sum exceeds 256 bits.
    pub fn checked_add(&self, other: &Self) -> DomainResult<Self> {
        let left = self.numerator.full_mul(other.denominator);
        let right = other.numerator.full_mul(self.denominator);
        let numerator = left.checked_add(right).ok_or(DomainError::Overflow)?;
        Self::reduce(numerator, self.denominator.full_mul(other.denominator))
    }

    /// Subtracts `other`, failing instead of going negative.
    ///
    /// # Errors
    /// Returns `Overflow` when `other` is greater than `self`.
    pub fn checked_sub(&self, other: &Self) -> DomainResult<Self> {
        let left = self.numerator.full_mul(other.denominator);
        let right = other.numerator.full_mul(self.denominator);
        let numerator = left.checked_sub(right).ok_or(DomainError::Overflow)?;
        Self::reduce(numerator, self.denominator.full_mul(other.denominator))
    }

    /// Multiplies two fractions.
    ///
    /// # Errors
    /// Returns `Overflow` when the reduced product exceeds 256 bits.
    pub fn checked_mul(&self, other: &Self) -> DomainResult<Self> {
        Self::reduce(
            self.numerator.full_mul(other.numerator),
            self.denominator.full_mul(other.denominator),
        )
    }

    /// Divides by `other`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `other` is zero, `Overflow` when the
    /// reduced result exceeds 256 bits.
    pub fn checked_div(&self, other: &Self) -> DomainResult<Self> {
        Self::reduce(
            self.numerator.full_mul(other.denominator),
            self.denominator.full_mul(other.numerator),
        )
    }

    /// Multiplies by an integer.
    pub fn mul_int(&self, value: impl Into<U256>) -> DomainResult<Self> {
        self.checked_mul(&Self::from_integer(value))
    }

    /// Divides by an integer.
    pub fn div_int(&self, value: impl Into<U256>) -> DomainResult<Self> {
        self.checked_div(&Self::from_integer(value))
    }

    /// Swaps numerator and denominator.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero fraction.
    pub fn invert(&self) -> DomainResult<Self> {
        if self.is_zero() {
            return Err(DomainError::DivisionByZero);
        }
        Ok(Self {
            numerator: self.denominator,
            denominator: self.numerator,
        })
    }

    /// Renders with a fixed number of decimal places, rounding half up.
    #[must_use]
    pub fn to_fixed(&self, places: u32) -> String {
        let Some(scale) = exp10(places) else {
            return self.quotient().to_string();
        };
        let scaled = self.numerator.full_mul(scale);
        let denominator = U512::from(self.denominator);
        let mut units = scaled / denominator;
        let remainder = scaled % denominator;
        if remainder + remainder >= denominator {
            units += U512::one();
        }

        let digits = units.to_string();
        if places == 0 {
            return digits;
        }
        let places = places as usize;
        let padded = if digits.len() <= places {
            format!("{}{}", "0".repeat(places + 1 - digits.len()), digits)
        } else {
            digits
        };
        let split = padded.len() - places;
        format!("{}.{}", &padded[..split], &padded[split..])
    }

    /// Converts to a `Decimal` rounded to `places` decimal places.
    ///
    /// # Errors
    /// Returns `Overflow` when the value does not fit a `Decimal`.
    pub fn to_decimal(&self, places: u32) -> DomainResult<Decimal> {
        Decimal::from_str(&self.to_fixed(places)).map_err(|_| DomainError::Overflow)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for Fraction {
    fn from(v: u64) -> Self {
        Self::from_integer(v)
    }
}

impl From<U256> for Fraction {
    fn from(v: U256) -> Self {
        Self::from_integer(v)
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator.full_mul(other.denominator);
        let right = other.numerator.full_mul(self.denominator);
        left.cmp(&right)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == U256::one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
