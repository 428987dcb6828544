// citrate/core/primitives/src/coins.rs

//! Integral coin vectors.
//!
//! A [`Coins`] value is a set of `(denom, amount)` pairs kept sorted by
//! denomination with no zero entries, so two vectors holding the same funds
//! always compare equal structurally.

use crate::error::CoinError;
use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Minimum and maximum denomination length
const DENOM_MIN_LEN: usize = 3;
const DENOM_MAX_LEN: usize = 128;

/// Check a denomination: a lowercase letter followed by lowercase letters,
/// digits or `/`.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let mut chars = denom.chars();
    let valid = (DENOM_MIN_LEN..=DENOM_MAX_LEN).contains(&denom.len())
        && chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/');

    if valid {
        Ok(())
    } else {
        Err(CoinError::InvalidDenom(denom.to_string()))
    }
}

/// Split `"100atom"` style input into its numeric and denomination parts.
pub(crate) fn split_amount_denom<'a>(
    s: &'a str,
    is_amount_char: impl Fn(char) -> bool,
) -> Result<(&'a str, &'a str), CoinError> {
    let s = s.trim();
    let split = s.find(|c: char| !is_amount_char(c)).unwrap_or(s.len());
    let (amount, denom) = s.split_at(split);
    if amount.is_empty() {
        return Err(CoinError::InvalidAmount(s.to_string()));
    }
    validate_denom(denom)?;
    Ok((amount, denom))
}

/// A single denomination and amount
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coin {
    pub denom: String,
    pub amount: U256,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<U256>) -> Result<Self, CoinError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self {
            denom,
            amount: amount.into(),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount_denom(s, |c| c.is_ascii_digit())?;
        let amount =
            U256::from_dec_str(amount).map_err(|_| CoinError::InvalidAmount(amount.to_string()))?;
        Coin::new(denom, amount)
    }
}

/// Sorted, zero-free vector of coins
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Coins(BTreeMap<String, U256>);

impl Coins {
    /// Build a vector from individual coins. Zero amounts are dropped,
    /// duplicate denominations are rejected.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Result<Self, CoinError> {
        let mut map = BTreeMap::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            if map.contains_key(&coin.denom) {
                return Err(CoinError::DuplicateDenom(coin.denom));
            }
            map.insert(coin.denom, coin.amount);
        }
        map.retain(|_, amount| !amount.is_zero());
        Ok(Self(map))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Per-denomination sum of two vectors
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, CoinError> {
        let mut sum = self.0.clone();
        for (denom, amount) in &other.0 {
            let entry = sum.entry(denom.clone()).or_insert_with(U256::zero);
            *entry = entry
                .checked_add(*amount)
                .ok_or_else(|| CoinError::Overflow(denom.clone()))?;
        }
        Ok(Coins(sum))
    }

    /// Amount held in `denom`, zero if absent
    pub fn amount_of(&self, denom: &str) -> U256 {
        self.0.get(denom).copied().unwrap_or_else(U256::zero)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &U256)> {
        self.0.iter().map(|(denom, amount)| (denom.as_str(), amount))
    }

    /// Insert a whole amount produced by truncation; zero is skipped.
    pub(crate) fn insert_nonzero(&mut self, denom: &str, amount: U256) {
        if !amount.is_zero() {
            self.0.insert(denom.to_string(), amount);
        }
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        let mut coins = Coins::empty();
        coins.insert_nonzero(&coin.denom, coin.amount);
        coins
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (denom, amount)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}{}", amount, denom)?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Coins::empty());
        }
        let coins = s
            .split(',')
            .map(str::parse::<Coin>)
            .collect::<Result<Vec<_>, _>>()?;
        Coins::new(coins)
    }
}

impl Serialize for Coins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
