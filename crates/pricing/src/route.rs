use crate::error::{PricingError, PricingResult};
use crate::pair::Pair;
use stake_yield_domain::prelude::{Price, Token};

/// An ordered path of pairs from `input` to `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pairs: Vec<Pair>,
    path: Vec<Token>,
}

impl Route {
    /// Builds a route starting at `input` through `pairs` in order.
    ///
    /// # Errors
    /// Returns `InvalidRoute` when `pairs` is empty or a pair does not
    /// contain the token reached so far.
    pub fn new(pairs: Vec<Pair>, input: Token) -> PricingResult<Self> {
        if pairs.is_empty() {
            return Err(PricingError::InvalidRoute("no pairs".into()));
        }
        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(input);
        for pair in &pairs {
            let current = &path[path.len() - 1];
            let next = pair
                .other(current)
                .map_err(|_| PricingError::InvalidRoute(format!("pair does not contain {current}")))?
                .clone();
            path.push(next);
        }
        Ok(Self { pairs, path })
    }

    #[must_use]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Tokens visited, input first.
    #[must_use]
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    #[must_use]
    pub fn input(&self) -> &Token {
        &self.path[0]
    }

    #[must_use]
    pub fn output(&self) -> &Token {
        &self.path[self.path.len() - 1]
    }

    #[must_use]
    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    /// Price of the input token in the output token at current reserves.
    ///
    /// formula: product of each hop's mid price
    pub fn mid_price(&self) -> PricingResult<Price> {
        let mut price = Price::identity(self.input().clone());
        for (pair, token) in self.pairs.iter().zip(&self.path) {
            price = price.checked_mul(&pair.price_of(token)?)?;
        }
        Ok(price)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols: Vec<&str> = self.path.iter().map(|t| t.symbol.as_str()).collect();
        write!(f, "{}", symbols.join(" > "))
    }
}
