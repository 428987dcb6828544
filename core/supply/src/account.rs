// citrate/core/supply/src/account.rs

//! Account records as seen by the supply checks.
//!
//! Accounts form a closed set of kinds. Every kind holds spendable coins;
//! vesting accounts additionally carry a lock-up schedule and module accounts
//! are owned by a named subsystem. A module account may itself be granted a
//! vesting schedule, so the capability queries below are independent.

use chrono::{DateTime, Utc};
use citrate_primitives::{Address, Coins};
use serde::{Deserialize, Serialize};

/// Fields shared by every account kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: Address,
    #[serde(default)]
    pub coins: Coins,
    #[serde(default)]
    pub account_number: u64,
    #[serde(default)]
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: Address, coins: Coins) -> Self {
        Self {
            address,
            coins,
            account_number: 0,
            sequence: 0,
        }
    }
}

/// Lock-up schedule of a vesting grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Coins granted at account creation
    pub original_vesting: Coins,
    /// Unix seconds
    #[serde(default)]
    pub start_time: i64,
    /// Unix seconds
    pub end_time: i64,
}

impl VestingSchedule {
    /// Whether the grant is still locked at `block_time`.
    ///
    /// Compared at second precision; the account unlocks exactly at
    /// `end_time`.
    pub fn is_locked_at(&self, block_time: DateTime<Utc>) -> bool {
        block_time.timestamp() < self.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingAccount {
    #[serde(flatten)]
    pub base: BaseAccount,
    pub schedule: VestingSchedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAccount {
    #[serde(flatten)]
    pub base: BaseAccount,
    /// Owning subsystem, e.g. `"fee_collector"`
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub vesting: Option<VestingSchedule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Account {
    Basic(BaseAccount),
    Vesting(VestingAccount),
    Module(ModuleAccount),
}

impl Account {
    pub fn basic(address: Address, coins: Coins) -> Self {
        Account::Basic(BaseAccount::new(address, coins))
    }

    pub fn vesting(address: Address, coins: Coins, schedule: VestingSchedule) -> Self {
        Account::Vesting(VestingAccount {
            base: BaseAccount::new(address, coins),
            schedule,
        })
    }

    pub fn module(address: Address, name: impl Into<String>, coins: Coins) -> Self {
        Account::Module(ModuleAccount {
            base: BaseAccount::new(address, coins),
            name: name.into(),
            permissions: Vec::new(),
            vesting: None,
        })
    }

    fn base(&self) -> &BaseAccount {
        match self {
            Account::Basic(base) => base,
            Account::Vesting(vacc) => &vacc.base,
            Account::Module(macc) => &macc.base,
        }
    }

    pub fn address(&self) -> Address {
        self.base().address
    }

    pub fn coins(&self) -> &Coins {
        &self.base().coins
    }

    /// Owned by a subsystem rather than an external party
    pub fn is_module(&self) -> bool {
        matches!(self, Account::Module(_))
    }

    /// Carries a vesting schedule, whether or not it is still locked
    pub fn is_vesting(&self) -> bool {
        self.vesting_schedule().is_some()
    }

    pub fn vesting_schedule(&self) -> Option<&VestingSchedule> {
        match self {
            Account::Basic(_) => None,
            Account::Vesting(vacc) => Some(&vacc.schedule),
            Account::Module(macc) => macc.vesting.as_ref(),
        }
    }

    pub fn module_name(&self) -> Option<&str> {
        match self {
            Account::Module(macc) => Some(&macc.name),
            _ => None,
        }
    }
}
