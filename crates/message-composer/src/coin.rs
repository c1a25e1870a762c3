//! Funds attached to an execute message.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unsigned 128-bit amount, carried on the wire as a decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint128(u128);

impl Uint128 {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn u128(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<Uint128> for String {
    fn from(value: Uint128) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uint128 {
    type Err = CoinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Uint128)
            .map_err(|_| CoinParseError::InvalidAmount(s.to_string()))
    }
}

impl Serialize for Uint128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Uint128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(Uint128Visitor)
    }
}

struct Uint128Visitor;

impl<'de> Visitor<'de> for Uint128Visitor {
    type Value = Uint128;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("string-encoded integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<u128>()
            .map(Uint128)
            .map_err(|e| E::custom(format!("invalid Uint128 '{}': {}", v, e)))
    }
}

/// A (denomination, amount) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Uint128,
}

impl Coin {
    pub fn new(amount: impl Into<Uint128>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinParseError;

    /// Parse the `<amount><denom>` notation used by chain CLIs, e.g. `100uatom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoinParseError::Empty);
        }

        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoinParseError::MissingDenom(trimmed.to_string()))?;
        if split == 0 {
            return Err(CoinParseError::InvalidAmount(trimmed.to_string()));
        }

        let (amount, denom) = trimmed.split_at(split);
        Ok(Coin {
            denom: denom.to_string(),
            amount: amount.parse()?,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinParseError {
    #[error("empty coin string")]
    Empty,
    #[error("invalid amount in '{0}'")]
    InvalidAmount(String),
    #[error("missing denomination in '{0}'")]
    MissingDenom(String),
}

/// Parse a comma separated coin list (`100uatom,5ujuno`), keeping its order.
pub fn parse_coins(input: &str) -> Result<Vec<Coin>, CoinParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(str::parse).collect()
}
