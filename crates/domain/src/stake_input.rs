//! Validation of the amount typed into the stake form.

use crate::entities::token::Token;
use crate::value_objects::{CurrencyAmount, parse_units};
use primitive_types::U256;
use thiserror::Error;

/// Why a typed stake amount cannot be submitted.
///
/// Variants are ordered by priority: a missing account is reported before
/// a bad amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StakeInputError {
    #[error("Connect Wallet")]
    ConnectWallet,

    #[error("Enter an amount")]
    EnterAmount,
}

/// Parses `typed` as an amount of `token` the account can stake.
///
/// The amount must parse to a non-zero value and must not exceed
/// `balance`. An unknown balance rejects every amount.
///
/// # Errors
/// `ConnectWallet` when no account is connected, otherwise `EnterAmount`
/// when the amount is missing, malformed or above the balance.
pub fn derive_stake_input(
    typed: &str,
    token: &Token,
    balance: Option<&CurrencyAmount>,
    account_connected: bool,
) -> Result<CurrencyAmount, StakeInputError> {
    if !account_connected {
        return Err(StakeInputError::ConnectWallet);
    }

    let parsed = parse_units(typed, token).ok_or(StakeInputError::EnterAmount)?;
    match balance {
        Some(balance) if balance.token == parsed.token && parsed.raw <= balance.raw => Ok(parsed),
        _ => Err(StakeInputError::EnterAmount),
    }
}

/// Largest amount of `balance` that can be staked while keeping `reserve`
/// raw units back, e.g. gas for a native coin.
///
/// Fractional base units are dropped. A balance at or below the reserve
/// gives zero.
#[must_use]
pub fn max_amount_spend(balance: &CurrencyAmount, reserve: impl Into<U256>) -> CurrencyAmount {
    let spendable = balance.quotient().checked_sub(reserve.into()).unwrap_or_default();
    CurrencyAmount::from_raw(balance.token.clone(), spendable)
}
