//! Yield/tax calculator.
//!
//! Pure transformation from a pool's configuration and live state to its
//! APY, reward rates and taxes. All arithmetic is exact over raw base
//! units; token decimals only matter for display.

use crate::config::YieldConstants;
use crate::entities::pool::{PoolConfig, PoolLiveState};
use crate::entities::token::Token;
use crate::error::DomainResult;
use crate::metrics::YieldMetrics;
use crate::metrics::apy::pool_apy;
use crate::metrics::dilution::reward_divider;
use crate::metrics::reward_rate::{total_reward_rate, user_reward_rate};
use crate::metrics::tax::PoolTaxes;
use crate::value_objects::Fraction;
use tracing::debug;

/// Computes `YieldMetrics` under a fixed set of constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldCalculator {
    constants: YieldConstants,
}

impl YieldCalculator {
    /// Creates a calculator.
    #[must_use]
    pub fn new(constants: YieldConstants) -> Self {
        Self { constants }
    }

    /// Constants in use.
    #[must_use]
    pub fn constants(&self) -> &YieldConstants {
        &self.constants
    }

    /// Derives yield, rates and taxes for one pool.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` when `config` fails validation.
    /// Degenerate live state (no stakers, nothing staked) is not an error.
    pub fn compute(
        &self,
        config: &PoolConfig,
        live: &PoolLiveState,
        reward_token: &Token,
    ) -> DomainResult<YieldMetrics> {
        config.validate(&self.constants)?;

        let divider = reward_divider(config, live, self.constants.dilution_rounding)?;
        if divider > Fraction::one() {
            debug!(
                total_staked = %live.total_staked,
                count_stakers = %live.count_stakers,
                divider = %divider,
                "Pool below minimums, reward rate diluted"
            );
        }

        let apy = pool_apy(config, live, &divider, &self.constants)?;
        let total_rate = total_reward_rate(config, &divider, reward_token)?;
        let user_rate = user_reward_rate(&total_rate, live.user_staked, live.total_staked)?;
        let taxes = PoolTaxes::from_config(config, &self.constants)?;

        Ok(YieldMetrics {
            apy,
            reward_divider: divider,
            total_reward_rate: total_rate,
            user_reward_rate: user_rate,
            taxes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DilutionRounding;
    use crate::error::DomainError;
    use crate::fixtures::{live_state, reward_token, sample_config};
    use primitive_types::U256;

    fn calculator() -> YieldCalculator {
        YieldCalculator::default()
    }

    #[test]
    fn test_launch_estimate_scenario() {
        let metrics = calculator()
            .compute(&sample_config(), &live_state(0, 0, 0), &reward_token())
            .unwrap();
        assert_eq!(metrics.apy, Fraction::new(73u64, 2u64).unwrap());
        assert!(!metrics.apy.is_zero());
        assert!(metrics.user_reward_rate.is_zero());
    }

    #[test]
    fn test_exactly_at_minimums_scenario() {
        let metrics = calculator()
            .compute(&sample_config(), &live_state(100_000, 10, 0), &reward_token())
            .unwrap();
        assert_eq!(metrics.reward_divider, Fraction::one());
        assert_eq!(metrics.total_reward_rate.raw, Fraction::new(1000u64, 86_400u64).unwrap());
    }

    #[test]
    fn test_half_stake_scenario() {
        let metrics = calculator()
            .compute(&sample_config(), &live_state(100_000, 10, 50_000), &reward_token())
            .unwrap();
        assert_eq!(
            metrics.user_reward_rate.raw,
            metrics.total_reward_rate.raw.div_int(2u64).unwrap()
        );
    }

    #[test]
    fn test_pro_rata_round_trip_at_full_stake() {
        let live = live_state(123_457, 11, 123_457);
        let metrics = calculator().compute(&sample_config(), &live, &reward_token()).unwrap();
        assert_eq!(metrics.user_reward_rate, metrics.total_reward_rate);

        let again = user_reward_rate(&metrics.total_reward_rate, live.total_staked, live.total_staked).unwrap();
        assert_eq!(again, metrics.total_reward_rate);
    }

    #[test]
    fn test_taxes_are_exact() {
        let metrics = calculator()
            .compute(&sample_config(), &live_state(1, 1, 0), &reward_token())
            .unwrap();
        assert_eq!(metrics.taxes.staking.as_fraction(), Fraction::new(1u64, 100u64).unwrap());
        assert_eq!(metrics.taxes.retrieving.as_fraction(), Fraction::new(3u64, 100u64).unwrap());
    }

    #[test]
    fn test_rejects_zero_stake_period() {
        let mut config = sample_config();
        config.stake_period_seconds = U256::zero();
        let err = calculator()
            .compute(&config, &live_state(0, 0, 0), &reward_token())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_apy_is_non_negative_over_many_states() {
        let calc = YieldCalculator::new(YieldConstants {
            dilution_rounding: DilutionRounding::Exact,
            ..Default::default()
        });
        for total in [0u64, 1, 7, 99_999, 100_000, 10_000_000] {
            for stakers in [0u64, 1, 3, 10, 5_000] {
                let metrics = calc
                    .compute(&sample_config(), &live_state(total, stakers, total / 2), &reward_token())
                    .unwrap();
                assert!(metrics.apy >= Fraction::zero());
                assert!(!metrics.apy.denominator().is_zero());
                assert!(metrics.user_reward_rate.raw <= metrics.total_reward_rate.raw);
            }
        }
    }
}
