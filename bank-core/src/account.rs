//! A single customer account
//!
//! The account owns its balance and an append-only transaction log. Every
//! mutation validates first and only then touches state, so a rejected call
//! leaves both the balance and the log exactly as they were.
//!
//! # Invariants
//!
//! - `balance >= 0` at all times
//! - The log is chronological and never reordered or pruned
//! - The last record's `balance_after` equals the current balance

use crate::{
    types::{AccountNumber, Transaction, TransactionKind},
    Error, Result,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Description recorded for the opening balance
pub const INITIAL_DEPOSIT: &str = "Initial deposit";

/// Default description for [`Account::deposit_default`]
pub const DEFAULT_DEPOSIT: &str = "Deposit";

/// Default description for [`Account::withdraw_default`]
pub const DEFAULT_WITHDRAWAL: &str = "Withdrawal";

/// Bank account
#[derive(Debug, Clone)]
pub struct Account {
    account_number: AccountNumber,
    customer_name: String,
    balance: Decimal,
    transactions: Vec<Transaction>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create an account with an opening balance.
    ///
    /// A positive opening balance is recorded as an "Initial deposit"
    /// transaction; a zero balance leaves the log empty.
    pub fn new(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::invalid_amount("Initial balance cannot be negative"));
        }

        let mut account = Self::empty(account_number, customer_name.into());
        account.balance = initial_balance;

        if initial_balance > Decimal::ZERO {
            account.append(TransactionKind::Deposit, initial_balance, INITIAL_DEPOSIT);
        }

        Ok(account)
    }

    /// Create an account with a zero balance
    pub fn open(account_number: AccountNumber, customer_name: impl Into<String>) -> Self {
        Self::empty(account_number, customer_name.into())
    }

    fn empty(account_number: AccountNumber, customer_name: String) -> Self {
        Self {
            account_number,
            customer_name,
            balance: Decimal::ZERO,
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Account number
    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    /// Account holder
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// When the account was opened
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Read-only view of the log
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Owned snapshot of the log, oldest first
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Deposit money, returning the new balance.
    ///
    /// Fails with [`Error::BalanceOverflow`] if the new balance is not
    /// representable; the account is left untouched.
    pub fn deposit(&mut self, amount: Decimal, description: &str) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_amount("Deposit amount must be positive"));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow {
                balance: self.balance,
                amount,
            })?;
        self.append(TransactionKind::Deposit, amount, description);

        tracing::debug!(
            account = %self.account_number,
            %amount,
            balance = %self.balance,
            "deposit applied"
        );

        Ok(self.balance)
    }

    /// Deposit with the default "Deposit" description
    pub fn deposit_default(&mut self, amount: Decimal) -> Result<Decimal> {
        self.deposit(amount, DEFAULT_DEPOSIT)
    }

    /// Withdraw money, returning the new balance.
    ///
    /// Withdrawing the entire balance is allowed and leaves it at exactly zero.
    pub fn withdraw(&mut self, amount: Decimal, description: &str) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_amount("Withdrawal amount must be positive"));
        }

        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }

        self.balance -= amount;
        self.append(TransactionKind::Withdrawal, amount, description);

        tracing::debug!(
            account = %self.account_number,
            %amount,
            balance = %self.balance,
            "withdrawal applied"
        );

        Ok(self.balance)
    }

    /// Withdraw with the default "Withdrawal" description
    pub fn withdraw_default(&mut self, amount: Decimal) -> Result<Decimal> {
        self.withdraw(amount, DEFAULT_WITHDRAWAL)
    }

    // Balance must already reflect the change.
    fn append(&mut self, kind: TransactionKind, amount: Decimal, description: &str) {
        self.transactions
            .push(Transaction::record(kind, amount, description, self.balance));
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account({}, {}, Balance: ${:.2})",
            self.account_number, self.customer_name, self.balance
        )
    }
}
