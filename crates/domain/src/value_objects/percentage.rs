use crate::error::DomainResult;
use crate::value_objects::fraction::Fraction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact ratio displayed as a percentage, e.g. `1/20` is 5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Percent(pub Fraction);

impl Percent {
    /// Builds `bps / base` exactly.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `base` is zero.
    pub fn from_bps(bps: u32, base: u32) -> DomainResult<Self> {
        Ok(Self(Fraction::new(u64::from(bps), u64::from(base))?))
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(Fraction::zero())
    }

    #[must_use]
    pub fn as_fraction(&self) -> Fraction {
        self.0
    }

    /// Renders the value times 100, e.g. `"5.00"` for `1/20`.
    ///
    /// # Errors
    /// Returns `Overflow` when the scaled value does not fit.
    pub fn to_fixed_percent(&self, places: u32) -> DomainResult<String> {
        Ok(self.0.mul_int(100u64)?.to_fixed(places))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_fixed_percent(2) {
            Ok(percent) => write!(f, "{percent}%"),
            Err(_) => f.write_str("-"),
        }
    }
}
