//! Constants used by the yield calculator.
//!
//! The annualization period and the tax basis-point base have changed
//! between staking contract generations, so they are carried in
//! `YieldConstants` instead of being baked into the formulas.

use serde::{Deserialize, Serialize};

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: u64 = 60 * 60 * 24 * 365;

/// Seconds in a week, used for weekly reward display.
pub const SECONDS_IN_WEEK: u64 = 60 * 60 * 24 * 7;

/// Seconds in a day, the stake period of drafted pools.
pub const SECONDS_IN_DAY: u64 = 60 * 60 * 24;

/// Basis points in 100%.
pub const BIPS_BASE: u32 = 10_000;

/// How the minimum-stake and minimum-stakers ratios are divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DilutionRounding {
    /// Integer division, rounded down, then clamped to at least 1.
    #[default]
    Floor,
    /// Exact rational division, then clamped to at least 1.
    Exact,
}

/// Configurable constants of the yield calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldConstants {
    /// Seconds used to annualize per-second reward rates.
    pub seconds_per_year: u64,
    /// Basis points in 100%, the denominator of every tax.
    pub bips_base: u32,
    /// Rounding applied to the dilution ratios.
    pub dilution_rounding: DilutionRounding,
}

impl Default for YieldConstants {
    fn default() -> Self {
        Self {
            seconds_per_year: SECONDS_PER_YEAR,
            bips_base: BIPS_BASE,
            dilution_rounding: DilutionRounding::Floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = YieldConstants::default();
        assert_eq!(c.seconds_per_year, 31_536_000);
        assert_eq!(c.bips_base, 10_000);
        assert_eq!(c.dilution_rounding, DilutionRounding::Floor);
    }

    #[test]
    fn test_rounding_serde_names() {
        let json = serde_json::to_string(&DilutionRounding::Exact).unwrap();
        assert_eq!(json, "\"exact\"");
    }
}
