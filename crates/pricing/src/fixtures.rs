//! Shared test fixtures.
//!
//! Addresses are chosen so that USDC < WBNB < CAKE < ORPHAN by address.

use crate::pair::Pair;
use primitive_types::U256;
use stake_yield_domain::prelude::Token;

pub fn usdc() -> Token {
    Token::new(56, "0x0000000000000000000000000000000000000010", 6, "USDC", "USD Coin")
}

pub fn wbnb() -> Token {
    Token::new(56, "0x0000000000000000000000000000000000000020", 18, "WBNB", "Wrapped BNB")
}

pub fn cake() -> Token {
    Token::new(56, "0x0000000000000000000000000000000000000030", 18, "CAKE", "Cake")
}

/// Token with no pair to the stablecoin.
pub fn orphan() -> Token {
    Token::new(56, "0x0000000000000000000000000000000000000005", 18, "ORPH", "Orphan")
}

pub fn lp_token(n: u8) -> Token {
    Token::new(56, format!("0x00000000000000000000000000000000000000f{n}"), 18, "UNI-V2", "Uniswap V2")
}

pub fn units(whole: u64, decimals: u8) -> U256 {
    U256::from(whole) * U256::exp10(usize::from(decimals))
}

/// 1000 WBNB against 300_000 USDC, WBNB at 300 USD.
pub fn wbnb_usdc() -> Pair {
    Pair::new(lp_token(1), (wbnb(), units(1_000, 18)), (usdc(), units(300_000, 6))).unwrap()
}

/// 100_000 CAKE against 1000 WBNB, CAKE at 0.01 WBNB.
pub fn cake_wbnb() -> Pair {
    Pair::new(lp_token(2), (cake(), units(100_000, 18)), (wbnb(), units(1_000, 18))).unwrap()
}
