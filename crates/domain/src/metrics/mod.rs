use crate::value_objects::{CurrencyAmount, Fraction};
use serde::{Deserialize, Serialize};

pub mod apy;
pub mod calculator;
pub mod dilution;
pub mod reward_rate;
pub mod tax;

pub use calculator::YieldCalculator;
pub use tax::PoolTaxes;

/// Yield, rate and tax fields derived for one pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldMetrics {
    /// Annual yield in percent, raw reward units per raw staked unit.
    pub apy: Fraction,
    /// Under-subscription penalty, 1 when fully subscribed.
    pub reward_divider: Fraction,
    /// Reward per second to all stakers.
    pub total_reward_rate: CurrencyAmount,
    /// Reward per second to the connected account.
    pub user_reward_rate: CurrencyAmount,
    pub taxes: PoolTaxes,
}
