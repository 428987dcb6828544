// citrate/core/supply/src/invariants/total_supply.rs

//! Total supply reconciliation.
//!
//! The community pool and outstanding rewards are fractional. Each is
//! truncated on its own; the two sub-unit remainders are then summed and
//! truncated again so that a combined remainder of one unit or more is
//! credited back as `carry`. Whatever stays below one unit after that second
//! truncation is dropped and never counted.

use super::{Invariant, TOTAL_SUPPLY_ROUTE};
use crate::error::{FieldMismatch, SupplyError, SupplyField};
use crate::snapshot::LedgerSnapshot;
use citrate_primitives::{Coins, DecCoins};
use tracing::trace;

/// Every term of a reconstructed total supply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub circulating: Coins,
    pub modules: Coins,
    pub bonded: Coins,
    pub collected_fees: Coins,
    pub community_pool: Coins,
    pub rewards: Coins,
    /// Whole units recovered from the summed remainders
    pub carry: Coins,
    /// Precision dropped after the second truncation, below one unit per denom
    pub discarded: DecCoins,
    pub reconstructed: Coins,
    pub recorded: Coins,
}

impl Reconciliation {
    pub fn is_balanced(&self) -> bool {
        self.reconstructed == self.recorded
    }
}

/// Rebuild the total supply from the supplier record and external pools.
///
/// Trusts the record's circulating and module fields; cross-checking those
/// against accounts is [`super::SupplierInvariant`]'s job.
pub fn reconcile_total_supply(snapshot: &dyn LedgerSnapshot) -> Result<Reconciliation, SupplyError> {
    let supplier = snapshot.supplier()?;

    let bonded = Coins::from(snapshot.bonded_supply()?);
    let collected_fees = snapshot.collected_fees()?;
    let (community_pool, community_change) = snapshot.community_pool()?.truncate_decimal();
    let (rewards, rewards_change) = snapshot.outstanding_rewards()?.truncate_decimal();

    let (carry, discarded) = community_change.checked_add(&rewards_change)?.truncate_decimal();

    let reconstructed = [
        &supplier.modules_supply,
        &bonded,
        &collected_fees,
        &community_pool,
        &rewards,
        &carry,
    ]
    .into_iter()
    .try_fold(supplier.circulating_supply.clone(), |acc, term| acc.checked_add(term))?;

    if !discarded.is_empty() {
        trace!("Total supply reconciliation dropped sub-unit remainder {}", discarded);
    }

    Ok(Reconciliation {
        circulating: supplier.circulating_supply,
        modules: supplier.modules_supply,
        bonded,
        collected_fees,
        community_pool,
        rewards,
        carry,
        discarded,
        reconstructed,
        recorded: supplier.total_supply,
    })
}

/// Checks the supplier record's total supply against the sum of every
/// token-holding pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalSupplyInvariant;

impl Invariant for TotalSupplyInvariant {
    fn route(&self) -> &'static str {
        TOTAL_SUPPLY_ROUTE
    }

    fn check(&self, snapshot: &dyn LedgerSnapshot) -> Result<(), SupplyError> {
        let reconciliation = reconcile_total_supply(snapshot)?;
        if reconciliation.is_balanced() {
            return Ok(());
        }

        Err(SupplyError::InvariantViolation {
            route: TOTAL_SUPPLY_ROUTE,
            mismatches: vec![FieldMismatch {
                field: SupplyField::TotalSupply,
                recorded: reconciliation.recorded,
                computed: reconciliation.reconstructed,
            }],
        })
    }
}
