// citrate/core/supply/src/invariants/supplier.rs

use super::{Invariant, SUPPLIER_ROUTE};
use crate::aggregate::{aggregate_accounts, AccountTotals};
use crate::error::{FieldMismatch, SupplyError, SupplyField};
use crate::snapshot::LedgerSnapshot;
use crate::supplier::Supplier;
use citrate_primitives::Coins;

/// Checks the supplier record's circulating, module and initial vesting
/// fields against sums computed from the live account population.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplierInvariant;

impl SupplierInvariant {
    /// Compare a record against already aggregated totals.
    ///
    /// Every diverging field is reported, not only the first one.
    pub fn compare(supplier: &Supplier, totals: &AccountTotals) -> Result<(), SupplyError> {
        let pairs: [(SupplyField, &Coins, &Coins); 3] = [
            (SupplyField::CirculatingSupply, &supplier.circulating_supply, &totals.circulating),
            (SupplyField::ModulesSupply, &supplier.modules_supply, &totals.modules),
            (
                SupplyField::InitialVestingSupply,
                &supplier.initial_vesting_supply,
                &totals.initial_vesting,
            ),
        ];

        let mismatches: Vec<FieldMismatch> = pairs
            .into_iter()
            .filter(|(_, recorded, computed)| recorded != computed)
            .map(|(field, recorded, computed)| FieldMismatch {
                field,
                recorded: recorded.clone(),
                computed: computed.clone(),
            })
            .collect();

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(SupplyError::InvariantViolation {
                route: SUPPLIER_ROUTE,
                mismatches,
            })
        }
    }
}

impl Invariant for SupplierInvariant {
    fn route(&self) -> &'static str {
        SUPPLIER_ROUTE
    }

    fn check(&self, snapshot: &dyn LedgerSnapshot) -> Result<(), SupplyError> {
        let supplier = snapshot.supplier()?;
        let totals = aggregate_accounts(snapshot)?;
        Self::compare(&supplier, &totals)
    }
}
