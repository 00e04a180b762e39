use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An ERC-20 token on a given chain.
///
/// Two tokens are the same token when chain id and address match; the
/// address comparison ignores checksum casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl Token {
    pub fn new(
        chain_id: u64,
        address: impl Into<String>,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address: address.into(),
            decimals,
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Lowercase address, used as the lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        self.address.to_lowercase()
    }

    /// Whether this token's address sorts before `other`'s.
    ///
    /// Pair contracts order their two tokens this way.
    #[must_use]
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.key() < other.key()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address.eq_ignore_ascii_case(&other.address)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.key().hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_case() {
        let a = Token::new(56, "0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d", 18, "USDC", "USD Coin");
        let b = Token::new(56, "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d", 18, "usdc", "");
        let other_chain = Token::new(97, "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d", 18, "USDC", "");
        assert_eq!(a, b);
        assert_ne!(a, other_chain);
    }

    #[test]
    fn test_sorts_before() {
        let a = Token::new(56, "0x0A", 18, "A", "A");
        let b = Token::new(56, "0x0b", 18, "B", "B");
        assert!(a.sorts_before(&b));
        assert!(!b.sorts_before(&a));
    }
}
