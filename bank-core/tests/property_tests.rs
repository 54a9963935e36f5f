//! Property-based tests for ledger invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Non-negative balances after every operation
//! - Snapshot consistency: `balance_after` tracks the running balance
//! - Conservation: transfers never change total deposits
//! - Rejected operations leave no trace

use bank_core::{Account, AccountNumber, Bank, Error, TransactionKind};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid amounts (positive decimals, two places)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating non-positive amounts
fn non_positive_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_00i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// One ledger operation against account slots `0..ACCOUNTS`
#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, Decimal),
    Withdraw(usize, Decimal),
    Transfer(usize, usize, Decimal),
}

const ACCOUNTS: usize = 4;

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACCOUNTS, amount_strategy()).prop_map(|(a, amount)| Op::Deposit(a, amount)),
        (0..ACCOUNTS, amount_strategy()).prop_map(|(a, amount)| Op::Withdraw(a, amount)),
        (0..ACCOUNTS, 0..ACCOUNTS, amount_strategy())
            .prop_map(|(from, to, amount)| Op::Transfer(from, to, amount)),
    ]
}

/// Bank with `ACCOUNTS` accounts and their numbers
fn funded_bank(initial: &[Decimal]) -> (Bank, Vec<String>) {
    let mut bank = Bank::new("Property Bank");
    let numbers = initial
        .iter()
        .enumerate()
        .map(|(i, balance)| {
            bank.create_account(format!("Customer {i}"), *balance)
                .unwrap()
                .account_number()
                .to_string()
        })
        .collect();
    (bank, numbers)
}

fn assert_log_consistent(account: &Account) -> Result<(), TestCaseError> {
    let mut running = Decimal::ZERO;
    for tx in account.transactions() {
        prop_assert!(tx.amount > Decimal::ZERO);
        running += tx.kind.signed(tx.amount);
        prop_assert_eq!(tx.balance_after, running);
        prop_assert!(tx.balance_after >= Decimal::ZERO);
    }
    prop_assert_eq!(account.balance(), running);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: balances stay non-negative and logs stay consistent under any
    /// sequence of operations
    #[test]
    fn prop_invariants_hold_for_any_sequence(
        initial in prop::collection::vec(prop_oneof![Just(Decimal::ZERO), amount_strategy()], ACCOUNTS),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let (mut bank, numbers) = funded_bank(&initial);
        let mut expected_total: Decimal = initial.iter().copied().sum();

        for op in ops {
            match op {
                Op::Deposit(a, amount) => {
                    bank.deposit(&numbers[a], amount).unwrap();
                    expected_total += amount;
                }
                Op::Withdraw(a, amount) => {
                    if bank.withdraw(&numbers[a], amount).is_ok() {
                        expected_total -= amount;
                    }
                }
                Op::Transfer(from, to, amount) => {
                    let _ = bank.transfer(&numbers[from], &numbers[to], amount);
                }
            }

            prop_assert_eq!(bank.total_deposits(), expected_total);
            for account in bank.list_accounts() {
                prop_assert!(account.balance() >= Decimal::ZERO);
            }
        }

        for account in bank.list_accounts() {
            assert_log_consistent(account)?;
        }
    }

    /// Property: a funded transfer moves exactly `amount` and appends one
    /// record on each side
    #[test]
    fn prop_transfer_conserves_money(
        from_balance in amount_strategy(),
        to_balance in amount_strategy(),
        fraction in 1u32..=100u32,
    ) {
        let (mut bank, numbers) = funded_bank(&[from_balance, to_balance]);
        let amount = (from_balance * Decimal::from(fraction) / Decimal::from(100)).round_dp(2);
        prop_assume!(amount > Decimal::ZERO);

        let before = bank.total_deposits();
        bank.transfer(&numbers[0], &numbers[1], amount).unwrap();

        let from = bank.get_account(&numbers[0]).unwrap();
        let to = bank.get_account(&numbers[1]).unwrap();
        prop_assert_eq!(from.balance(), from_balance - amount);
        prop_assert_eq!(to.balance(), to_balance + amount);
        prop_assert_eq!(bank.total_deposits(), before);
        prop_assert_eq!(from.transactions().len(), 2);
        prop_assert_eq!(to.transactions().len(), 2);
        prop_assert_eq!(from.transactions()[1].kind, TransactionKind::Withdrawal);
        prop_assert_eq!(to.transactions()[1].kind, TransactionKind::Deposit);
    }

    /// Property: overdrawing is rejected without touching state
    #[test]
    fn prop_overdraw_rejected(balance in amount_strategy(), extra in amount_strategy()) {
        let mut account = Account::new(AccountNumber::new("X"), "Y", balance).unwrap();

        let err = account.withdraw_default(balance + extra).unwrap_err();
        let is_insufficient = matches!(err, Error::InsufficientFunds { .. });
        prop_assert!(is_insufficient);
        prop_assert_eq!(account.balance(), balance);
        prop_assert_eq!(account.transactions().len(), 1);
    }

    /// Property: non-positive amounts are rejected without touching state
    #[test]
    fn prop_non_positive_amounts_rejected(balance in amount_strategy(), amount in non_positive_strategy()) {
        let (mut bank, numbers) = funded_bank(&[balance, balance]);

        let deposit = bank.deposit(&numbers[0], amount);
        prop_assert!(matches!(deposit, Err(Error::InvalidAmount(_))));
        let withdrawal = bank.withdraw(&numbers[0], amount);
        prop_assert!(matches!(withdrawal, Err(Error::InvalidAmount(_))));
        let transfer = bank.transfer(&numbers[0], &numbers[1], amount);
        prop_assert!(matches!(transfer, Err(Error::InvalidAmount(_))));

        for number in &numbers {
            let account = bank.get_account(number).unwrap();
            prop_assert_eq!(account.balance(), balance);
            prop_assert_eq!(account.transactions().len(), 1);
        }
    }

    /// Property: deposit followed by an equal withdrawal is a no-op on balance
    #[test]
    fn prop_deposit_withdraw_round_trip(balance in amount_strategy(), amount in amount_strategy()) {
        let mut account = Account::new(AccountNumber::new("1000"), "Alice", balance).unwrap();

        account.deposit_default(amount).unwrap();
        account.withdraw_default(amount).unwrap();

        prop_assert_eq!(account.balance(), balance);
        prop_assert_eq!(account.transactions().len(), 3);
    }

    /// Property: account numbers are unique and increase from 1000
    #[test]
    fn prop_account_numbers_monotonic(count in 1usize..50) {
        let mut bank = Bank::new("Numbers");
        for i in 0..count {
            let number = bank
                .create_account(format!("Customer {i}"), Decimal::ZERO)
                .unwrap()
                .account_number()
                .to_string();
            prop_assert_eq!(number, (1000 + i).to_string());
        }
        prop_assert_eq!(bank.len(), count);
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_alice_bob_transfer_scenario() {
        let mut bank = Bank::new("Test");
        let alice = bank
            .create_account("Alice", Decimal::from(1000))
            .unwrap()
            .account_number()
            .to_string();
        let bob = bank
            .create_account("Bob", Decimal::from(500))
            .unwrap()
            .account_number()
            .to_string();
        assert_eq!(alice, "1000");
        assert_eq!(bob, "1001");

        bank.transfer("1000", "1001", Decimal::from(300)).unwrap();

        assert_eq!(bank.get_account("1000").unwrap().balance(), Decimal::from(700));
        assert_eq!(bank.get_account("1001").unwrap().balance(), Decimal::from(800));
        assert_eq!(bank.total_deposits(), Decimal::from(1500));
    }

    #[test]
    fn test_overdraw_keeps_single_record() {
        let mut account =
            Account::new(AccountNumber::new("X"), "Y", Decimal::new(1000, 1)).unwrap();

        let err = account.withdraw_default(Decimal::new(1500, 1)).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));
        assert_eq!(account.balance(), Decimal::new(1000, 1));
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_unknown_account_transfer_mutates_nothing() {
        let mut bank = Bank::new("Test");
        bank.create_account("Alice", Decimal::from(100)).unwrap();

        let err = bank.transfer("1000", "4242", Decimal::from(50)).unwrap_err();
        assert!(matches!(err, Error::AccountNotFound { .. }));

        let alice = bank.get_account("1000").unwrap();
        assert_eq!(alice.balance(), Decimal::from(100));
        assert_eq!(alice.transactions().len(), 1);
    }

    #[test]
    fn test_history_serializes_record_fields() {
        let mut bank = Bank::new("Test");
        bank.create_account("Alice", Decimal::from(100)).unwrap();
        bank.withdraw("1000", Decimal::new(2550, 2)).unwrap();

        let history = bank.get_account("1000").unwrap().transaction_history();
        let json = serde_json::to_value(&history).unwrap();

        assert_eq!(json[0]["kind"], "deposit");
        assert_eq!(json[0]["description"], "Initial deposit");
        assert_eq!(json[1]["kind"], "withdrawal");
        assert_eq!(json[1]["amount"], "25.50");
        assert_eq!(json[1]["balance_after"], "74.50");
    }
}
