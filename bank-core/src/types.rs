//! Core types for the ledger
//!
//! All money values are exact decimals; every record is immutable once
//! appended to an account's log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Account number, minted by the bank as a decimal string ("1000", "1001", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Create new account number
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountNumber {
    fn from(number: &str) -> Self {
        Self::new(number)
    }
}

impl From<String> for AccountNumber {
    fn from(number: String) -> Self {
        Self(number)
    }
}

impl Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Direction of a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in
    Deposit,
    /// Money out
    Withdrawal,
}

impl TransactionKind {
    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    /// Signed effect of `amount` on a balance
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in an account's transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Record ID (UUIDv7 for time-ordering)
    pub id: Uuid,

    /// Deposit or withdrawal
    pub kind: TransactionKind,

    /// Always positive
    pub amount: Decimal,

    /// Free-text description ("Deposit", "Transfer to 1001", ...)
    pub description: String,

    /// When the record was appended
    pub timestamp: DateTime<Utc>,

    /// Account balance immediately after this transaction
    pub balance_after: Decimal,
}

impl Transaction {
    pub(crate) fn record(
        kind: TransactionKind,
        amount: Decimal,
        description: impl Into<String>,
        balance_after: Decimal,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            amount,
            description: description.into(),
            timestamp: Utc::now(),
            balance_after,
        }
    }
}
