use crate::config::YieldConstants;
use crate::entities::pool::PoolConfig;
use crate::error::DomainResult;
use crate::value_objects::percentage::Percent;
use serde::{Deserialize, Serialize};

/// `bps / base` as an exact percentage.
pub fn tax_percent(bps: u32, base: u32) -> DomainResult<Percent> {
    Percent::from_bps(bps, base)
}

/// The three taxes a pool charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTaxes {
    /// Taken from the deposit on stake.
    pub staking: Percent,
    /// Taken from the principal on unstake.
    pub unstaking: Percent,
    /// Taken from the rewards on unstake or claim.
    pub retrieving: Percent,
}

impl PoolTaxes {
    pub fn from_config(config: &PoolConfig, constants: &YieldConstants) -> DomainResult<Self> {
        Ok(Self {
            staking: tax_percent(config.stake_tax_bps, constants.bips_base)?,
            unstaking: tax_percent(config.unstake_tax_bps, constants.bips_base)?,
            retrieving: tax_percent(config.unstake_reward_tax_bps, constants.bips_base)?,
        })
    }
}
