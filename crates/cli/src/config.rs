//! Runtime settings read from the environment.

use anyhow::{Context, Result};
use stake_yield_domain::prelude::{DilutionRounding, YieldConstants};
use stake_yield_pricing::prelude::ResolverConfig;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_SNAPSHOT: &str = "STAKE_YIELD_SNAPSHOT";
pub const ENV_SECONDS_PER_YEAR: &str = "STAKE_YIELD_SECONDS_PER_YEAR";
pub const ENV_BIPS_BASE: &str = "STAKE_YIELD_BIPS_BASE";
pub const ENV_MAX_HOPS: &str = "STAKE_YIELD_MAX_HOPS";
pub const ENV_DILUTION_ROUNDING: &str = "STAKE_YIELD_DILUTION_ROUNDING";

/// Calculator and resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub snapshot: Option<PathBuf>,
    pub constants: YieldConstants,
    pub resolver: ResolverConfig,
}

impl AppConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Reads settings from `vars`, keeping defaults for missing keys.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = vars.get(ENV_SNAPSHOT) {
            config.snapshot = Some(PathBuf::from(path));
        }
        if let Some(seconds) = parse_var(vars, ENV_SECONDS_PER_YEAR)? {
            config.constants.seconds_per_year = seconds;
        }
        if let Some(base) = parse_var(vars, ENV_BIPS_BASE)? {
            config.constants.bips_base = base;
        }
        if let Some(hops) = parse_var(vars, ENV_MAX_HOPS)? {
            config.resolver.max_hops = hops;
        }
        if let Some(rounding) = vars.get(ENV_DILUTION_ROUNDING) {
            config.constants.dilution_rounding = match rounding.trim().to_lowercase().as_str() {
                "floor" => DilutionRounding::Floor,
                "exact" => DilutionRounding::Exact,
                other => anyhow::bail!("{ENV_DILUTION_ROUNDING} must be `floor` or `exact`, got `{other}`"),
            };
        }

        Ok(config)
    }
}

fn parse_var<T>(vars: &HashMap<String, String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    vars.get(key)
        .map(|value| value.trim().parse::<T>().with_context(|| format!("Invalid {key}: `{value}`")))
        .transpose()
}
