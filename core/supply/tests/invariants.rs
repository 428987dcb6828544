// End-to-end supply invariant scenarios over in-memory snapshots

use chrono::{TimeZone, Utc};
use citrate_primitives::{Address, Coin, Coins, DecCoins};
use citrate_supply::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn coins(s: &str) -> Coins {
    s.parse().unwrap()
}

fn dec_coins(s: &str) -> DecCoins {
    s.parse().unwrap()
}

/// One ordinary account with 100atom and one module account with 50atom
fn two_account_ledger(supplier: Supplier) -> MemorySnapshot {
    MemorySnapshot::new(100, Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        .with_supplier(supplier)
        .with_account(Account::basic(Address([1; 20]), coins("100atom")))
        .with_account(Account::module(Address([2; 20]), "fee_collector", coins("50atom")))
}

fn consistent_supplier() -> Supplier {
    Supplier::new(coins("100atom"), coins("50atom"), Coins::empty(), coins("150atom"))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_consistent_ledger_passes_both_checks() {
    let snapshot = two_account_ledger(consistent_supplier());

    assert!(SupplierInvariant.check(&snapshot).is_ok());
    assert!(TotalSupplyInvariant.check(&snapshot).is_ok());
    assert!(AllInvariants.check(&snapshot).is_ok());
}

#[test]
fn test_understated_circulating_supply_is_reported() {
    let mut supplier = consistent_supplier();
    supplier.circulating_supply = coins("99atom");
    let snapshot = two_account_ledger(supplier);

    let err = SupplierInvariant.check(&snapshot).unwrap_err();
    assert_eq!(
        err.mismatches(),
        &[FieldMismatch {
            field: SupplyField::CirculatingSupply,
            recorded: coins("99atom"),
            computed: coins("100atom"),
        }]
    );
    assert!(err.to_string().contains("99atom"));
    assert!(err.to_string().contains("100atom"));
}

#[test]
fn test_all_invariants_stops_at_supplier_failure() {
    let mut supplier = consistent_supplier();
    supplier.modules_supply = coins("49atom");
    supplier.total_supply = coins("1atom");
    let snapshot = two_account_ledger(supplier);

    let err = AllInvariants.check(&snapshot).unwrap_err();
    match err {
        SupplyError::InvariantViolation { route, .. } => assert_eq!(route, SUPPLIER_ROUTE),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_vesting_grants_tracked_until_end_time() {
    let block_time = Utc.timestamp_opt(1_000, 0).unwrap();
    let locked = VestingSchedule {
        original_vesting: coins("30atom"),
        start_time: 0,
        end_time: 1_001,
    };
    let unlocked = VestingSchedule {
        original_vesting: coins("70atom"),
        start_time: 0,
        end_time: 1_000,
    };

    let snapshot = MemorySnapshot::new(5, block_time)
        .with_supplier(Supplier::new(
            coins("20atom"),
            Coins::empty(),
            coins("30atom"),
            coins("20atom"),
        ))
        .with_account(Account::vesting(Address([1; 20]), coins("10atom"), locked))
        .with_account(Account::vesting(Address([2; 20]), coins("10atom"), unlocked));

    assert!(SupplierInvariant.check(&snapshot).is_ok());
}

#[test]
fn test_total_supply_includes_pools_and_carry() {
    let supplier = Supplier::new(
        coins("100atom"),
        coins("50atom"),
        Coins::empty(),
        coins("188atom,40stake"),
    );
    let snapshot = two_account_ledger(supplier)
        .with_bonded(Coin::new("stake", 40u64).unwrap())
        .with_collected_fees(coins("25atom"))
        .with_community_pool(dec_coins("10.6atom"))
        .with_outstanding_rewards(dec_coins("1.5atom"));

    // 100 + 50 + 25 fees + 10 community + 1 rewards + 1 carried from 0.6 + 0.5
    let reconciliation = reconcile_total_supply(&snapshot).unwrap();
    assert_eq!(reconciliation.carry, coins("1atom"));
    assert_eq!(reconciliation.discarded, dec_coins("0.1atom"));
    assert_eq!(reconciliation.reconstructed, coins("187atom,40stake"));

    let err = TotalSupplyInvariant.check(&snapshot).unwrap_err();
    assert_eq!(err.mismatches()[0].recorded, coins("188atom,40stake"));
    assert_eq!(err.mismatches()[0].computed, coins("187atom,40stake"));
}

#[test]
fn test_checks_are_idempotent() {
    let mut supplier = consistent_supplier();
    supplier.initial_vesting_supply = coins("5atom");
    let snapshot = two_account_ledger(supplier);

    let mut registry = InvariantRegistry::new();
    register_supply_invariants(&mut registry).unwrap();

    let first: Vec<_> = registry.run_all(&snapshot).into_iter().map(|r| (r.key, r.outcome)).collect();
    let second: Vec<_> = registry.run_all(&snapshot).into_iter().map(|r| (r.key, r.outcome)).collect();
    assert_eq!(first, second);
    assert!(first[0].1.is_err());
    assert!(first[1].1.is_ok());
}

#[test]
fn test_unavailable_staking_is_not_a_pass() {
    let mut snapshot = two_account_ledger(consistent_supplier());
    snapshot.bonded = None;

    let err = TotalSupplyInvariant.check(&snapshot).unwrap_err();
    assert_eq!(
        err,
        SupplyError::unavailable(Collaborator::Staking, "reading not present in snapshot")
    );
}

#[test]
fn test_runner_halts_on_corrupted_record() {
    let mut registry = InvariantRegistry::new();
    register_supply_invariants(&mut registry).unwrap();
    let runner = InvariantRunner::new(registry, RunnerConfig::default());

    let mut supplier = consistent_supplier();
    supplier.circulating_supply = coins("99atom");
    let audit = runner.on_block(100, &two_account_ledger(supplier));

    // The total supply check trusts the same understated record, so it fails too
    assert_eq!(audit.decision, RunnerDecision::Halt);
    assert_eq!(audit.failures().count(), 2);
}
