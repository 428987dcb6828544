// citrate/core/primitives/src/dec_coins.rs

//! Fractional coin vectors, used by pools that accrue sub-unit amounts.

use crate::coins::{split_amount_denom, validate_denom, Coins};
use crate::decimal::Dec;
use crate::error::CoinError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Dec) -> Result<Self, CoinError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self { denom, amount })
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount_denom(s, |c| c.is_ascii_digit() || c == '.')?;
        DecCoin::new(denom, amount.parse()?)
    }
}

/// Sorted, zero-free vector of decimal coins
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DecCoins(BTreeMap<String, Dec>);

impl DecCoins {
    pub fn new(coins: impl IntoIterator<Item = DecCoin>) -> Result<Self, CoinError> {
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

    /// Lift an integral vector into decimal form
    pub fn from_coins(coins: &Coins) -> Result<Self, CoinError> {
        let mut map = BTreeMap::new();
        for (denom, amount) in coins.iter() {
            let amount = Dec::from_int(*amount).ok_or_else(|| CoinError::Overflow(denom.to_string()))?;
            map.insert(denom.to_string(), amount);
        }
        Ok(Self(map))
    }

    pub fn checked_add(&self, other: &DecCoins) -> Result<DecCoins, CoinError> {
        let mut sum = self.0.clone();
        for (denom, amount) in &other.0 {
            let entry = sum.entry(denom.clone()).or_insert_with(Dec::zero);
            *entry = entry
                .checked_add(*amount)
                .ok_or_else(|| CoinError::Overflow(denom.clone()))?;
        }
        Ok(DecCoins(sum))
    }

    pub fn amount_of(&self, denom: &str) -> Dec {
        self.0.get(denom).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dec)> {
        self.0.iter().map(|(denom, amount)| (denom.as_str(), amount))
    }

    /// Split into whole coins and the per-denomination change below one unit.
    ///
    /// `whole + change` reproduces `self` exactly.
    pub fn truncate_decimal(&self) -> (Coins, DecCoins) {
        let mut whole = Coins::empty();
        let mut change = BTreeMap::new();

        for (denom, amount) in &self.0 {
            let (units, remainder) = amount.truncate();
            whole.insert_nonzero(denom, units);
            if !remainder.is_zero() {
                change.insert(denom.clone(), remainder);
            }
        }

        (whole, DecCoins(change))
    }
}

impl fmt::Display for DecCoins {
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

impl FromStr for DecCoins {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(DecCoins::empty());
        }
        let coins = s
            .split(',')
            .map(str::parse::<DecCoin>)
            .collect::<Result<Vec<_>, _>>()?;
        DecCoins::new(coins)
    }
}

impl Serialize for DecCoins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DecCoins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
