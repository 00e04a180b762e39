use crate::pair::Pair;
use stake_yield_domain::prelude::Token;
use std::collections::HashSet;

/// Token pairs worth fetching to trade between `a` and `b`.
///
/// Covers the direct pair, each side against every base token, and every
/// base against every other base. Pairs of a token with itself and
/// duplicates in either order are dropped.
#[must_use]
pub fn candidate_pair_keys(a: &Token, b: &Token, bases: &[Token]) -> Vec<(Token, Token)> {
    let base_pairs = bases
        .iter()
        .flat_map(|base| bases.iter().map(move |other| (base, other)));

    let candidates = std::iter::once((a, b))
        .chain(bases.iter().map(|base| (a, base)))
        .chain(bases.iter().map(|base| (b, base)))
        .chain(base_pairs);

    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for (x, y) in candidates {
        if x == y {
            continue;
        }
        let (first, second) = if x.sorts_before(y) { (x, y) } else { (y, x) };
        if seen.insert((first.key(), second.key())) {
            keys.push((first.clone(), second.clone()));
        }
    }
    keys
}

/// Keeps the pairs that lie on a candidate route from one of their own
/// tokens to `quote` through `bases`.
///
/// With no bases every pair is kept.
#[must_use]
pub fn routing_pairs(pairs: Vec<Pair>, quote: &Token, bases: &[Token]) -> Vec<Pair> {
    if bases.is_empty() {
        return pairs;
    }

    let mut wanted = HashSet::new();
    for token in pairs.iter().flat_map(|p| [p.token0(), p.token1()]) {
        for (x, y) in candidate_pair_keys(token, quote, bases) {
            wanted.insert((x.key(), y.key()));
        }
    }

    pairs
        .into_iter()
        .filter(|p| {
            let (a, b) = (p.token0().key(), p.token1().key());
            wanted.contains(&(a.clone(), b.clone())) || wanted.contains(&(b, a))
        })
        .collect()
}
