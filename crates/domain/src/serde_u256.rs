//! Decimal-string serde for `U256`.
//!
//! `primitive-types` serializes as `0x` hex; on-chain amounts are easier to
//! audit as base-10 strings, so DTO fields opt into this module with
//! `#[serde(with = "crate::serde_u256")]`. Deserialization also accepts plain
//! JSON integers.

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Serializes a `U256` as a decimal string.
pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// Deserializes a `U256` from a decimal string, a `0x` hex string or an integer.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    deserializer.deserialize_any(U256Visitor)
}

struct U256Visitor;

impl Visitor<'_> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or an integer string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom("negative integer"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        let v = v.trim();
        if let Some(hex) = v.strip_prefix("0x") {
            U256::from_str_radix(hex, 16).map_err(|e| E::custom(format!("{e:?}")))
        } else {
            U256::from_dec_str(v).map_err(|e| E::custom(format!("{e:?}")))
        }
    }
}
