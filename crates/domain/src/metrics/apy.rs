use crate::config::YieldConstants;
use crate::entities::pool::{PoolConfig, PoolLiveState};
use crate::error::DomainResult;
use crate::value_objects::fraction::Fraction;

/// Undiluted emission, raw reward units per second.
pub fn emission_rate(config: &PoolConfig) -> DomainResult<Fraction> {
    Fraction::new(config.reward_tokens_per_period, config.stake_period_seconds)
}

/// Annual yield of the pool in percent, in raw reward units per raw staked unit.
///
/// An empty pool has no yield of its own; it is estimated as if the
/// configured minimums were staked, which is what an early depositor can
/// expect once the pool fills to its thresholds.
///
/// formula: emission * seconds_per_year * 100 / divider / total_staked
pub fn pool_apy(
    config: &PoolConfig,
    live: &PoolLiveState,
    reward_divider: &Fraction,
    constants: &YieldConstants,
) -> DomainResult<Fraction> {
    let annual = emission_rate(config)?
        .mul_int(constants.seconds_per_year)?
        .mul_int(100u64)?;

    if live.total_staked.is_zero() {
        annual
            .div_int(config.min_total_staked_for_full_reward)?
            .div_int(config.min_stakers_for_full_reward)
    } else {
        annual.checked_div(reward_divider)?.div_int(live.total_staked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DilutionRounding;
    use crate::fixtures::{live_state, sample_config};
    use crate::metrics::dilution::reward_divider;
    use primitive_types::U256;

    fn apy_for(total_staked: u64, count_stakers: u64) -> Fraction {
        let config = sample_config();
        let live = live_state(total_staked, count_stakers, 0);
        let divider = reward_divider(&config, &live, DilutionRounding::Floor).unwrap();
        pool_apy(&config, &live, &divider, &YieldConstants::default()).unwrap()
    }

    #[test]
    fn test_empty_pool_substitutes_minimums() {
        // 1000 / 86400 * 31_536_000 * 100 = 36_500_000; / 100_000 / 10 = 36.5
        let apy = apy_for(0, 0);
        assert_eq!(apy, Fraction::new(73u64, 2u64).unwrap());
        assert_eq!(apy.to_fixed(2), "36.50");
    }

    #[test]
    fn test_at_minimums_has_no_penalty() {
        // 36_500_000 / 1 / 100_000
        assert_eq!(apy_for(100_000, 10), Fraction::from_integer(365u64));
    }

    #[test]
    fn test_under_subscribed_pool() {
        // divider 8, staked 25_000: 36_500_000 / 8 / 25_000 = 182.5
        assert_eq!(apy_for(25_000, 5), Fraction::new(365u64, 2u64).unwrap());
    }

    #[test]
    fn test_large_pool() {
        // 36_500_000 / 10^9
        assert_eq!(apy_for(1_000_000_000, 1_000), Fraction::new(73u64, 2_000u64).unwrap());
    }

    #[test]
    fn test_zero_emission() {
        let mut config = sample_config();
        config.reward_tokens_per_period = U256::zero();
        let live = live_state(1_000, 3, 0);
        let apy = pool_apy(&config, &live, &Fraction::one(), &YieldConstants::default()).unwrap();
        assert!(apy.is_zero());
    }

    #[test]
    fn test_custom_year_length() {
        let constants = YieldConstants {
            seconds_per_year: 86_400 * 360,
            ..Default::default()
        };
        let config = sample_config();
        let live = live_state(100_000, 10, 0);
        let apy = pool_apy(&config, &live, &Fraction::one(), &constants).unwrap();
        // 1000 * 360 * 100 / 100_000
        assert_eq!(apy, Fraction::from_integer(360u64));
    }
}
