// citrate/core/supply/src/snapshot.rs

//! Read-only view of ledger state handed to every check.
//!
//! The host assembles one snapshot per committed block from its account
//! store, staking, fee and distribution subsystems. Each accessor is fallible:
//! a subsystem that cannot be read reports
//! [`SupplyError::CollaboratorUnavailable`] and the check propagates it.

use crate::account::Account;
use crate::error::{Collaborator, SupplyError};
use crate::supplier::Supplier;
use chrono::{DateTime, Utc};
use citrate_primitives::{Coin, Coins, DecCoins, U256};
use serde::{Deserialize, Serialize};

pub trait LedgerSnapshot {
    /// Timestamp of the block the snapshot was taken at
    fn block_time(&self) -> Result<DateTime<Utc>, SupplyError>;

    fn supplier(&self) -> Result<Supplier, SupplyError>;

    /// Visit each account exactly once. The callback returns `true` to stop.
    fn iterate_accounts(&self, f: &mut dyn FnMut(&Account) -> bool) -> Result<(), SupplyError>;

    /// Total bonded stake in the bond denomination
    fn bonded_supply(&self) -> Result<Coin, SupplyError>;

    fn collected_fees(&self) -> Result<Coins, SupplyError>;

    fn community_pool(&self) -> Result<DecCoins, SupplyError>;

    /// Rewards accrued by delegators and validators but not yet withdrawn
    fn outstanding_rewards(&self) -> Result<DecCoins, SupplyError>;
}

/// Bond denomination used by [`MemorySnapshot::new`]
pub const DEFAULT_BOND_DENOM: &str = "stake";

/// In-memory snapshot, loadable from JSON.
///
/// Readings left unset are reported as unavailable collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub block_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub supplier: Option<Supplier>,
    #[serde(default)]
    pub accounts: Option<Vec<Account>>,
    #[serde(default, with = "coin_string")]
    pub bonded: Option<Coin>,
    #[serde(default)]
    pub collected_fees: Option<Coins>,
    #[serde(default)]
    pub community_pool: Option<DecCoins>,
    #[serde(default)]
    pub outstanding_rewards: Option<DecCoins>,
}

impl MemorySnapshot {
    /// Snapshot with every reading present and empty
    pub fn new(height: u64, block_time: DateTime<Utc>) -> Self {
        Self {
            height,
            block_time: Some(block_time),
            supplier: Some(Supplier::default()),
            accounts: Some(Vec::new()),
            bonded: Some(Coin {
                denom: DEFAULT_BOND_DENOM.to_string(),
                amount: U256::zero(),
            }),
            collected_fees: Some(Coins::empty()),
            community_pool: Some(DecCoins::empty()),
            outstanding_rewards: Some(DecCoins::empty()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_supplier(mut self, supplier: Supplier) -> Self {
        self.supplier = Some(supplier);
        self
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.get_or_insert_with(Vec::new).push(account);
        self
    }

    pub fn with_bonded(mut self, bonded: Coin) -> Self {
        self.bonded = Some(bonded);
        self
    }

    pub fn with_collected_fees(mut self, fees: Coins) -> Self {
        self.collected_fees = Some(fees);
        self
    }

    pub fn with_community_pool(mut self, pool: DecCoins) -> Self {
        self.community_pool = Some(pool);
        self
    }

    pub fn with_outstanding_rewards(mut self, rewards: DecCoins) -> Self {
        self.outstanding_rewards = Some(rewards);
        self
    }
}

fn missing(collaborator: Collaborator) -> SupplyError {
    SupplyError::unavailable(collaborator, "reading not present in snapshot")
}

impl LedgerSnapshot for MemorySnapshot {
    fn block_time(&self) -> Result<DateTime<Utc>, SupplyError> {
        self.block_time.ok_or_else(|| missing(Collaborator::BlockHeader))
    }

    fn supplier(&self) -> Result<Supplier, SupplyError> {
        self.supplier.clone().ok_or_else(|| missing(Collaborator::Supplier))
    }

    fn iterate_accounts(&self, f: &mut dyn FnMut(&Account) -> bool) -> Result<(), SupplyError> {
        let accounts = self.accounts.as_ref().ok_or_else(|| missing(Collaborator::Accounts))?;
        for account in accounts {
            if f(account) {
                break;
            }
        }
        Ok(())
    }

    fn bonded_supply(&self) -> Result<Coin, SupplyError> {
        self.bonded.clone().ok_or_else(|| missing(Collaborator::Staking))
    }

    fn collected_fees(&self) -> Result<Coins, SupplyError> {
        self.collected_fees
            .clone()
            .ok_or_else(|| missing(Collaborator::FeeCollector))
    }

    fn community_pool(&self) -> Result<DecCoins, SupplyError> {
        self.community_pool
            .clone()
            .ok_or_else(|| missing(Collaborator::CommunityPool))
    }

    fn outstanding_rewards(&self) -> Result<DecCoins, SupplyError> {
        self.outstanding_rewards
            .clone()
            .ok_or_else(|| missing(Collaborator::OutstandingRewards))
    }
}

/// Serde adapter for an optional coin written as `"100stake"`
mod coin_string {
    use citrate_primitives::Coin;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(coin: &Option<Coin>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match coin {
            Some(coin) => serializer.collect_str(coin),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Coin>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| s.parse().map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_readings_are_unavailable() {
        let snapshot = MemorySnapshot::default();
        assert!(matches!(
            snapshot.block_time(),
            Err(SupplyError::CollaboratorUnavailable { collaborator: Collaborator::BlockHeader, .. })
        ));
        assert!(matches!(
            snapshot.iterate_accounts(&mut |_| false),
            Err(SupplyError::CollaboratorUnavailable { collaborator: Collaborator::Accounts, .. })
        ));
        assert!(matches!(
            snapshot.bonded_supply(),
            Err(SupplyError::CollaboratorUnavailable { collaborator: Collaborator::Staking, .. })
        ));
    }

    #[test]
    fn test_each_pool_names_its_own_reading() {
        let mut snapshot = MemorySnapshot::new(1, Utc::now());
        snapshot.outstanding_rewards = None;
        assert!(snapshot.community_pool().is_ok());
        let err = snapshot.outstanding_rewards().unwrap_err();
        assert_eq!(
            err,
            SupplyError::unavailable(Collaborator::OutstandingRewards, "reading not present in snapshot")
        );
        assert!(err.to_string().contains("outstanding rewards"));

        let mut snapshot = MemorySnapshot::new(1, Utc::now());
        snapshot.community_pool = None;
        assert!(snapshot.outstanding_rewards().is_ok());
        assert!(matches!(
            snapshot.community_pool(),
            Err(SupplyError::CollaboratorUnavailable { collaborator: Collaborator::CommunityPool, .. })
        ));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "height": 42,
            "block_time": "2024-01-01T00:00:00Z",
            "supplier": {
                "circulating_supply": "100atom",
                "modules_supply": "50atom",
                "total_supply": "150atom"
            },
            "accounts": [
                { "type": "basic", "address": "0x0101010101010101010101010101010101010101", "coins": "100atom" },
                { "type": "module", "address": "0x0202020202020202020202020202020202020202", "coins": "50atom", "name": "fee_collector" }
            ],
            "bonded": "0atom",
            "collected_fees": "",
            "community_pool": "",
            "outstanding_rewards": ""
        }"#;

        let snapshot = MemorySnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.height, 42);
        assert_eq!(snapshot.supplier().unwrap().total_supply, "150atom".parse().unwrap());
        assert!(snapshot.bonded_supply().unwrap().is_zero());

        let mut seen = 0;
        snapshot
            .iterate_accounts(&mut |_| {
                seen += 1;
                false
            })
            .unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_iteration_stops_when_callback_asks() {
        let snapshot = MemorySnapshot::new(1, Utc::now())
            .with_account(Account::basic(Default::default(), Coins::empty()))
            .with_account(Account::basic(Default::default(), Coins::empty()));

        let mut seen = 0;
        snapshot
            .iterate_accounts(&mut |_| {
                seen += 1;
                true
            })
            .unwrap();
        assert_eq!(seen, 1);
    }
}
