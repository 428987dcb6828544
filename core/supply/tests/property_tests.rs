// Property-based tests for the supply aggregation and reconciliation
//
// These tests verify:
// 1. Partition: circulating + modules always equals the sum of all holdings
// 2. Vesting cutoff: a grant counts in full while locked and not at all after
// 3. Carry: summed pool remainders lose strictly less than one unit per denom

use chrono::{TimeZone, Utc};
use citrate_primitives::{Address, Coin, Coins, Dec, DecCoin, DecCoins, U256};
use citrate_supply::*;
use proptest::prelude::*;

const DENOMS: [&str; 3] = ["atom", "photon", "stake"];

// ============================================================================
// Strategies
// ============================================================================

fn coins_strategy() -> impl Strategy<Value = Coins> {
    proptest::collection::vec(0u64..1_000_000, DENOMS.len()).prop_map(|amounts| {
        Coins::new(
            DENOMS
                .iter()
                .zip(amounts)
                .map(|(denom, amount)| Coin::new(*denom, amount).unwrap()),
        )
        .unwrap()
    })
}

#[derive(Debug, Clone)]
enum Kind {
    Basic,
    Vesting { end_time: i64 },
    Module,
}

fn account_strategy() -> impl Strategy<Value = (Kind, Coins, Coins)> {
    let kind = prop_oneof![
        Just(Kind::Basic),
        (0i64..2_000).prop_map(|end_time| Kind::Vesting { end_time }),
        Just(Kind::Module),
    ];
    (kind, coins_strategy(), coins_strategy())
}

fn build(index: usize, kind: &Kind, held: &Coins, granted: &Coins) -> Account {
    let address = Address([(index % 256) as u8; 20]);
    match kind {
        Kind::Basic => Account::basic(address, held.clone()),
        Kind::Module => Account::module(address, format!("module{}", index), held.clone()),
        Kind::Vesting { end_time } => Account::vesting(
            address,
            held.clone(),
            VestingSchedule {
                original_vesting: granted.clone(),
                start_time: 0,
                end_time: *end_time,
            },
        ),
    }
}

fn sum<'a>(items: impl IntoIterator<Item = &'a Coins>) -> Coins {
    items
        .into_iter()
        .fold(Coins::empty(), |acc, c| acc.checked_add(c).unwrap())
}

/// Fraction of one unit in 10^-18 steps
fn fraction_strategy() -> impl Strategy<Value = Dec> {
    (0u64..1_000_000_000_000_000_000).prop_map(|raw| Dec::from_atomics(U256::from(raw)))
}

proptest! {
    #[test]
    fn prop_circulating_plus_modules_is_total_holdings(
        population in proptest::collection::vec(account_strategy(), 0..40)
    ) {
        let accounts: Vec<Account> = population
            .iter()
            .enumerate()
            .map(|(i, (kind, held, granted))| build(i, kind, held, granted))
            .collect();

        let totals = aggregate(&accounts, Utc.timestamp_opt(1_000, 0).unwrap()).unwrap();
        let holdings = sum(population.iter().map(|(_, held, _)| held));

        prop_assert_eq!(totals.circulating.checked_add(&totals.modules).unwrap(), holdings);

        let module_holdings = sum(
            population
                .iter()
                .filter(|(kind, _, _)| matches!(kind, Kind::Module))
                .map(|(_, held, _)| held),
        );
        prop_assert_eq!(totals.modules, module_holdings);
    }

    #[test]
    fn prop_vesting_counts_only_before_end_time(
        population in proptest::collection::vec(account_strategy(), 0..40),
        now in 0i64..2_000,
    ) {
        let accounts: Vec<Account> = population
            .iter()
            .enumerate()
            .map(|(i, (kind, held, granted))| build(i, kind, held, granted))
            .collect();

        let totals = aggregate(&accounts, Utc.timestamp_opt(now, 0).unwrap()).unwrap();
        let expected = sum(population.iter().filter_map(|(kind, _, granted)| match kind {
            Kind::Vesting { end_time } if *end_time > now => Some(granted),
            _ => None,
        }));

        prop_assert_eq!(totals.initial_vesting, expected);
    }

    #[test]
    fn prop_carry_loses_less_than_one_unit(
        whole_community in 0u64..1_000,
        whole_rewards in 0u64..1_000,
        frac_community in fraction_strategy(),
        frac_rewards in fraction_strategy(),
    ) {
        let pool = |whole: u64, frac: Dec| {
            let amount = Dec::from_int(U256::from(whole)).unwrap().checked_add(frac).unwrap();
            DecCoins::new(vec![DecCoin::new("atom", amount).unwrap()]).unwrap()
        };

        let snapshot = MemorySnapshot::new(1, Utc.timestamp_opt(0, 0).unwrap())
            .with_community_pool(pool(whole_community, frac_community))
            .with_outstanding_rewards(pool(whole_rewards, frac_rewards));

        let rec = reconcile_total_supply(&snapshot).unwrap();
        let reconstructed = rec.reconstructed.amount_of("atom");
        let exact = frac_community.checked_add(frac_rewards).unwrap();
        let (carry, dropped) = exact.truncate();

        prop_assert_eq!(reconstructed, U256::from(whole_community + whole_rewards) + carry);
        prop_assert!(carry <= U256::one());
        prop_assert!(dropped < Dec::one());
        prop_assert_eq!(rec.discarded.amount_of("atom"), dropped);
    }
}
