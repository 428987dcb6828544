// citrate/core/supply/src/invariants/mod.rs

//! Supply invariants.
//!
//! Each invariant is a stateless check over a [`LedgerSnapshot`]; it either
//! passes or returns the structured reason it failed. Deciding what happens
//! on failure is left to the caller.

pub mod supplier;
pub mod total_supply;

use crate::error::SupplyError;
use crate::snapshot::LedgerSnapshot;

pub use supplier::SupplierInvariant;
pub use total_supply::{reconcile_total_supply, Reconciliation, TotalSupplyInvariant};

/// Module name the supply invariants are registered under
pub const MODULE_NAME: &str = "supply";

pub const SUPPLIER_ROUTE: &str = "supplier";
pub const TOTAL_SUPPLY_ROUTE: &str = "total-supply";

pub trait Invariant: Send + Sync {
    /// Route name, unique within the owning module
    fn route(&self) -> &'static str;

    fn check(&self, snapshot: &dyn LedgerSnapshot) -> Result<(), SupplyError>;
}

/// Runs the supplier check, then the total supply check, stopping at the
/// first failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInvariants;

impl Invariant for AllInvariants {
    fn route(&self) -> &'static str {
        "all"
    }

    fn check(&self, snapshot: &dyn LedgerSnapshot) -> Result<(), SupplyError> {
        SupplierInvariant.check(snapshot)?;
        TotalSupplyInvariant.check(snapshot)
    }
}
