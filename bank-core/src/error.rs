//! Error types for the bank ledger

use crate::types::AccountNumber;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which side of an operation an unresolved account number was given for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    /// Source of a transfer
    Source,
    /// Destination of a transfer
    Destination,
    /// Target of a single-account operation (deposit, withdrawal)
    Account,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Source => write!(f, "Source account"),
            AccountRole::Destination => write!(f, "Destination account"),
            AccountRole::Account => write!(f, "Account"),
        }
    }
}

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Amount was not positive, or an initial balance was negative
    #[error("{0}")]
    InvalidAmount(String),

    /// Withdrawal (or the withdrawal leg of a transfer) exceeds the balance
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the request
        balance: Decimal,
        /// Amount that was requested
        requested: Decimal,
    },

    /// Deposit would push the balance past the largest representable amount
    #[error("Deposit of {amount} would overflow balance {balance}")]
    BalanceOverflow {
        /// Balance at the time of the request
        balance: Decimal,
        /// Amount that was deposited
        amount: Decimal,
    },

    /// Account number did not resolve
    #[error("{role} {account} not found")]
    AccountNotFound {
        /// Side of the operation the number was given for
        role: AccountRole,
        /// The unresolved account number
        account: AccountNumber,
    },

    /// Deposit leg of a transfer failed; the withdrawal was compensated
    #[error("Transfer failed and was rolled back: {source}")]
    TransferFailed {
        /// Source account
        from: AccountNumber,
        /// Destination account
        to: AccountNumber,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidAmount`]
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Error::InvalidAmount(msg.into())
    }

    /// Shorthand for [`Error::AccountNotFound`]
    pub fn not_found(role: AccountRole, account: &AccountNumber) -> Self {
        Error::AccountNotFound {
            role,
            account: account.clone(),
        }
    }
}
