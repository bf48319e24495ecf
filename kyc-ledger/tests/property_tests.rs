//! Property-based tests for ledger invariants
//!
//! - Frozen ⇔ freeze reason present, for any sequence of operations
//! - Unknown owners never change ledger state
//! - Closed is never reached
//! - Listing order is first-insertion order

use kyc_ledger::{AccountStatus, Ledger, OwnerType};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum Op {
    Create(usize, OwnerType, Option<String>),
    Freeze(usize, String),
    Unfreeze(usize),
}

const NAMES: [&str; 4] = ["Jane Doe", "John Smith", "Test Company AG", "X"];

fn op_strategy() -> impl Strategy<Value = Op> {
    let owner_type = prop_oneof![Just(OwnerType::Individual), Just(OwnerType::Company)];
    let uid = proptest::option::of(Just("CHE-123.456.789".to_string()));
    prop_oneof![
        (0..NAMES.len(), owner_type, uid).prop_map(|(i, t, u)| Op::Create(i, t, u)),
        (0..NAMES.len(), "[a-z ]{1,12}").prop_map(|(i, r)| Op::Freeze(i, r)),
        (0..NAMES.len()).prop_map(Op::Unfreeze),
    ]
}

proptest! {
    #[test]
    fn prop_status_and_reason_agree(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let ledger = Ledger::new();

        for op in ops {
            match op {
                Op::Create(i, owner_type, uid) => {
                    ledger.create_account(NAMES[i], owner_type, Decimal::ONE, uid);
                }
                Op::Freeze(i, reason) => {
                    let existed = ledger.get_account(NAMES[i]).is_some();
                    prop_assert_eq!(ledger.freeze_account(NAMES[i], &reason), existed);
                }
                Op::Unfreeze(i) => {
                    let existed = ledger.get_account(NAMES[i]).is_some();
                    prop_assert_eq!(ledger.unfreeze_account(NAMES[i]), existed);
                }
            }

            for account in ledger.list_accounts() {
                prop_assert_ne!(account.status, AccountStatus::Closed);
                prop_assert_eq!(
                    account.status == AccountStatus::Frozen,
                    account.freeze_reason.is_some()
                );
            }
        }
    }

    #[test]
    fn prop_listing_follows_first_insertion(order in Just(NAMES.to_vec()).prop_shuffle(), repeats in 1usize..3) {
        let ledger = Ledger::new();
        for _ in 0..repeats {
            for name in &order {
                ledger.create_account(*name, OwnerType::Individual, Decimal::ZERO, None);
            }
        }

        let listed: Vec<String> = ledger.list_accounts().into_iter().map(|a| a.owner.name).collect();
        prop_assert_eq!(listed, order.iter().map(|n| n.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_unknown_owner_is_noop(name in "[A-Z][a-z]{2,10}", reason in ".{0,20}") {
        let ledger = Ledger::new();
        ledger.create_account("Jane Doe", OwnerType::Individual, Decimal::ZERO, None);
        prop_assume!(name != "Jane Doe");

        prop_assert!(!ledger.freeze_account(&name, &reason));
        prop_assert!(!ledger.unfreeze_account(&name));
        prop_assert_eq!(ledger.len(), 1);
        prop_assert_eq!(ledger.get_account("Jane Doe").unwrap().status, AccountStatus::Active);
    }
}
