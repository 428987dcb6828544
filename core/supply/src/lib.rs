// citrate/core/supply/src/lib.rs

//! Supply invariants for the Citrate ledger.
//!
//! After each block the supplier record is audited against live state: its
//! circulating, module and initial vesting fields against the account
//! population, and its total supply against every token-holding pool. Checks
//! are pure reads over a [`LedgerSnapshot`] and report through
//! [`SupplyError`]; halting the chain is the host's decision.

pub mod account;
pub mod aggregate;
pub mod error;
pub mod invariants;
pub mod registry;
pub mod runner;
pub mod snapshot;
pub mod supplier;

pub use account::{Account, BaseAccount, ModuleAccount, VestingAccount, VestingSchedule};
pub use aggregate::{aggregate, aggregate_accounts, AccountTotals};
pub use error::{Collaborator, FieldMismatch, SupplyError, SupplyField};
pub use invariants::{
    reconcile_total_supply, AllInvariants, Invariant, Reconciliation, SupplierInvariant,
    TotalSupplyInvariant, MODULE_NAME, SUPPLIER_ROUTE, TOTAL_SUPPLY_ROUTE,
};
pub use registry::{register_supply_invariants, InvariantRegistry, InvariantReport};
pub use runner::{BlockAudit, InvariantRunner, RunnerConfig, RunnerDecision};
pub use snapshot::{LedgerSnapshot, MemorySnapshot, DEFAULT_BOND_DENOM};
pub use supplier::Supplier;
