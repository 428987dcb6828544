// citrate/core/supply/src/aggregate.rs

use crate::account::Account;
use crate::error::SupplyError;
use crate::snapshot::LedgerSnapshot;
use chrono::{DateTime, Utc};
use citrate_primitives::Coins;
use tracing::{debug, warn};

/// Live sums over the whole account population
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountTotals {
    /// Holdings of every account that is not module-owned
    pub circulating: Coins,
    /// Holdings of module-owned accounts
    pub modules: Coins,
    /// Original grants of vesting-capable accounts still locked at block time
    pub initial_vesting: Coins,
    pub accounts: u64,
}

impl AccountTotals {
    /// Fold one account into the running sums.
    ///
    /// The circulating/module split and the vesting sum are independent: a
    /// module account with a locked schedule lands in both `modules` and
    /// `initial_vesting`.
    pub fn accumulate(&mut self, account: &Account, block_time: DateTime<Utc>) -> Result<(), SupplyError> {
        if let Some(schedule) = account.vesting_schedule() {
            if schedule.is_locked_at(block_time) {
                self.initial_vesting = self.initial_vesting.checked_add(&schedule.original_vesting)?;
            }
        }

        if account.is_module() {
            self.modules = self.modules.checked_add(account.coins())?;
        } else {
            self.circulating = self.circulating.checked_add(account.coins())?;
        }

        self.accounts += 1;
        Ok(())
    }
}

/// Single pass over an account population
pub fn aggregate<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    block_time: DateTime<Utc>,
) -> Result<AccountTotals, SupplyError> {
    let mut totals = AccountTotals::default();
    for account in accounts {
        totals.accumulate(account, block_time)?;
    }
    Ok(totals)
}

/// Single pass over the snapshot's accounts at the snapshot's block time
pub fn aggregate_accounts(snapshot: &dyn LedgerSnapshot) -> Result<AccountTotals, SupplyError> {
    let block_time = snapshot.block_time()?;
    let mut totals = AccountTotals::default();
    let mut failure = None;

    snapshot.iterate_accounts(&mut |account| match totals.accumulate(account, block_time) {
        Ok(()) => false,
        Err(e) => {
            warn!("Aggregation stopped at account {}: {}", account.address(), e);
            failure = Some(e);
            true
        }
    })?;

    if let Some(e) = failure {
        return Err(e);
    }

    debug!(
        "Aggregated {} accounts: circulating={} modules={} initial_vesting={}",
        totals.accounts, totals.circulating, totals.modules, totals.initial_vesting
    );
    Ok(totals)
}
