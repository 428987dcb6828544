// citrate/core/supply/src/supplier.rs

use citrate_primitives::Coins;
use serde::{Deserialize, Serialize};

/// Persisted supply summary, maintained by mint/burn/transfer logic.
///
/// The checks in this crate only read it; each field is compared against an
/// independently computed live sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub circulating_supply: Coins,
    #[serde(default)]
    pub modules_supply: Coins,
    #[serde(default)]
    pub initial_vesting_supply: Coins,
    #[serde(default)]
    pub total_supply: Coins,
}

impl Supplier {
    pub fn new(
        circulating_supply: Coins,
        modules_supply: Coins,
        initial_vesting_supply: Coins,
        total_supply: Coins,
    ) -> Self {
        Self {
            circulating_supply,
            modules_supply,
            initial_vesting_supply,
            total_supply,
        }
    }
}
