//! Bank: owner of all accounts
//!
//! The bank mints account numbers, keeps accounts in insertion order, and
//! orchestrates transfers as a withdrawal on one account followed by a
//! deposit on another.
//!
//! # Example
//!
//! ```
//! use bank_core::Bank;
//! use rust_decimal::Decimal;
//!
//! let mut bank = Bank::new("Test");
//! let alice = bank.create_account("Alice", Decimal::from(1000))?.account_number().to_string();
//! let bob = bank.create_account("Bob", Decimal::from(500))?.account_number().to_string();
//!
//! bank.transfer(&alice, &bob, Decimal::from(300))?;
//! assert_eq!(bank.total_deposits(), Decimal::from(1500));
//! # Ok::<(), bank_core::Error>(())
//! ```

use crate::{
    account::{Account, DEFAULT_DEPOSIT, DEFAULT_WITHDRAWAL},
    config::BankConfig,
    error::AccountRole,
    metrics::Metrics,
    types::AccountNumber,
    Error, Result,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::collections::HashMap;
use std::fmt;

/// First account number minted by [`Bank::new`]
pub const FIRST_ACCOUNT_NUMBER: u64 = 1000;

/// A bank holding many accounts
#[derive(Debug)]
pub struct Bank {
    name: String,

    /// Accounts in creation order
    accounts: Vec<Account>,

    /// Account number -> position in `accounts`
    index: HashMap<AccountNumber, usize>,

    next_account_number: u64,

    metrics: Option<Metrics>,
}

impl Bank {
    /// Create an empty bank
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: Vec::new(),
            index: HashMap::new(),
            next_account_number: FIRST_ACCOUNT_NUMBER,
            metrics: None,
        }
    }

    /// Create an empty bank from configuration
    pub fn from_config(config: &BankConfig) -> Self {
        let mut bank = Self::new(config.name.clone());
        bank.next_account_number = config.first_account_number;
        bank
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Bank name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached metrics collector, if any
    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the bank has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Open a new account under the next account number.
    ///
    /// The number is consumed even if the opening balance is rejected.
    pub fn create_account(
        &mut self,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<&Account> {
        let account_number = self.generate_account_number();
        let account = Account::new(account_number.clone(), customer_name, initial_balance)
            .map_err(|err| self.rejected(err))?;

        tracing::info!(
            bank = %self.name,
            account = %account_number,
            customer = %account.customer_name(),
            %initial_balance,
            "account created"
        );

        let position = self.accounts.len();
        self.accounts.push(account);
        self.index.insert(account_number, position);
        self.with_metrics_do(Metrics::record_account_created);

        Ok(&self.accounts[position])
    }

    /// Look up an account; `None` if it does not exist
    pub fn get_account(&self, account_number: &str) -> Option<&Account> {
        self.index
            .get(account_number)
            .map(|&position| &self.accounts[position])
    }

    /// All accounts in creation order
    pub fn list_accounts(&self) -> Vec<&Account> {
        self.accounts.iter().collect()
    }

    /// Deposit into an account by number, returning the new balance
    pub fn deposit(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal> {
        let result = match self.account_mut(account_number) {
            Some(account) => account.deposit(amount, DEFAULT_DEPOSIT),
            None => Err(Error::not_found(
                AccountRole::Account,
                &AccountNumber::new(account_number),
            )),
        };

        match result {
            Ok(balance) => {
                self.with_metrics_do(Metrics::record_deposit);
                Ok(balance)
            }
            Err(err) => Err(self.rejected(err)),
        }
    }

    /// Withdraw from an account by number, returning the new balance
    pub fn withdraw(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal> {
        let result = match self.account_mut(account_number) {
            Some(account) => account.withdraw(amount, DEFAULT_WITHDRAWAL),
            None => Err(Error::not_found(
                AccountRole::Account,
                &AccountNumber::new(account_number),
            )),
        };

        match result {
            Ok(balance) => {
                self.with_metrics_do(Metrics::record_withdrawal);
                Ok(balance)
            }
            Err(err) => Err(self.rejected(err)),
        }
    }

    /// Move `amount` from one account to another.
    ///
    /// Amount and both account numbers are validated before anything is
    /// mutated. A failed withdrawal leg changes nothing. If the deposit leg
    /// fails (the destination balance would overflow), the amount is deposited back into the source and
    /// [`Error::TransferFailed`] is returned.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<()> {
        self.try_transfer(from, to, amount)
            .map_err(|err| self.rejected(err))
    }

    fn try_transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_amount("Transfer amount must be positive"));
        }

        let from_number = AccountNumber::new(from);
        let to_number = AccountNumber::new(to);

        if !self.index.contains_key(from) {
            return Err(Error::not_found(AccountRole::Source, &from_number));
        }
        if !self.index.contains_key(to) {
            return Err(Error::not_found(AccountRole::Destination, &to_number));
        }

        self.account_mut(from)
            .ok_or_else(|| Error::not_found(AccountRole::Source, &from_number))?
            .withdraw(amount, &format!("Transfer to {}", to_number))?;

        let deposited = match self.account_mut(to) {
            Some(destination) => {
                destination.deposit(amount, &format!("Transfer from {}", from_number))
            }
            None => Err(Error::not_found(AccountRole::Destination, &to_number)),
        };

        if let Err(cause) = deposited {
            return Err(self.roll_back(from_number, to_number, amount, cause));
        }

        tracing::info!(
            bank = %self.name,
            from = %from_number,
            to = %to_number,
            %amount,
            "transfer completed"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_withdrawal();
            metrics.record_deposit();
            metrics.record_transfer(amount.to_f64().unwrap_or_default());
        }

        Ok(())
    }

    // Best effort: a failure here is logged and left as is.
    fn roll_back(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
        cause: Error,
    ) -> Error {
        tracing::warn!(
            from = %from,
            to = %to,
            %amount,
            error = %cause,
            "deposit leg failed, rolling back withdrawal"
        );

        let compensated = match self.account_mut(from.as_str()) {
            Some(source) => source.deposit(amount, &format!("Transfer rollback to {}", to)),
            None => Err(Error::not_found(AccountRole::Source, &from)),
        };

        if let Err(err) = compensated {
            tracing::error!(
                from = %from,
                %amount,
                error = %err,
                "transfer rollback failed"
            );
        }

        self.with_metrics_do(Metrics::record_rollback);

        Error::TransferFailed {
            from,
            to,
            source: Box::new(cause),
        }
    }

    /// Sum of all account balances.
    ///
    /// Saturates at [`Decimal::MAX`] when the sum is not representable.
    pub fn total_deposits(&self) -> Decimal {
        self.accounts
            .iter()
            .map(Account::balance)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX)
    }

    fn generate_account_number(&mut self) -> AccountNumber {
        let number = AccountNumber::new(self.next_account_number.to_string());
        self.next_account_number += 1;
        number
    }

    fn account_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        let position = *self.index.get(account_number)?;
        self.accounts.get_mut(position)
    }

    fn rejected(&self, err: Error) -> Error {
        tracing::warn!(bank = %self.name, error = %err, "operation rejected");
        self.with_metrics_do(Metrics::record_rejected);
        err
    }

    fn with_metrics_do(&self, record: impl FnOnce(&Metrics)) {
        if let Some(metrics) = &self.metrics {
            record(metrics);
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bank({}, Accounts: {}, Total Deposits: ${:.2})",
            self.name,
            self.accounts.len(),
            self.total_deposits()
        )
    }
}
