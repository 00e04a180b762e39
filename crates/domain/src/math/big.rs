use crate::error::{DomainError, DomainResult};
use primitive_types::{U256, U512};

/// Greatest common divisor by Euclid's algorithm.
pub fn gcd(mut a: U512, mut b: U512) -> U512 {
    while !b.is_zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Narrows a 512-bit value back to 256 bits.
///
/// # Errors
/// Returns `Overflow` when the value does not fit.
pub fn narrow(value: U512) -> DomainResult<U256> {
    U256::try_from(value).map_err(|_| DomainError::Overflow)
}

/// Returns `10^exponent`, or `None` past 256 bits.
pub fn exp10(exponent: u32) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exponent))
}
