// citrate/core/primitives/src/lib.rs

//! Ledger primitives shared by the supply checks: integral coin vectors,
//! 18-digit fixed-point decimals and their fractional coin vectors, and
//! account addresses.

pub mod address;
pub mod coins;
pub mod dec_coins;
pub mod decimal;
pub mod error;

pub use address::Address;
pub use coins::{validate_denom, Coin, Coins};
pub use dec_coins::{DecCoin, DecCoins};
pub use decimal::{Dec, PRECISION};
pub use error::CoinError;

/// Re-exported so downstream crates name the same integer type.
pub use primitive_types::U256;
