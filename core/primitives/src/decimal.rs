// citrate/core/primitives/src/decimal.rs

use crate::error::CoinError;
use primitive_types::U256;
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by [`Dec`]
pub const PRECISION: usize = 18;

fn precision_multiplier() -> U256 {
    U256::exp10(PRECISION)
}

/// Non-negative fixed-point decimal with 18 fractional digits.
///
/// Stored as an integer count of 10^-18 units, so addition is exact and
/// truncation splits cleanly into a whole part and a sub-unit remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(U256);

impl Dec {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn one() -> Self {
        Self(precision_multiplier())
    }

    /// Build from a raw count of 10^-18 units
    pub fn from_atomics(raw: U256) -> Self {
        Self(raw)
    }

    /// Build from a whole number of units
    pub fn from_int(value: U256) -> Option<Self> {
        value.checked_mul(precision_multiplier()).map(Self)
    }

    pub fn atomics(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Dec) -> Option<Dec> {
        self.0.checked_add(other.0).map(Dec)
    }

    /// Split into the whole number of units and the remainder below one unit
    pub fn truncate(&self) -> (U256, Dec) {
        let multiplier = precision_multiplier();
        (self.0 / multiplier, Dec(self.0 % multiplier))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = self.truncate();
        let fraction = fraction.0.to_string();
        write!(f, "{}.{}{}", whole, "0".repeat(PRECISION - fraction.len()), fraction)
    }
}

impl FromStr for Dec {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoinError::InvalidAmount(s.to_string());
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty()
            || fraction.len() > PRECISION
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole = U256::from_dec_str(whole).map_err(|_| invalid())?;
        let padded = format!("{:0<width$}", fraction, width = PRECISION);
        let fraction = U256::from_dec_str(&padded).map_err(|_| invalid())?;

        Dec::from_int(whole)
            .and_then(|d| d.checked_add(Dec(fraction)))
            .ok_or_else(invalid)
    }
}
