//! Bank Core
//!
//! In-memory banking ledger: accounts, deposits, withdrawals, transfers and
//! per-account transaction history, plus the interactive menu that drives it.
//!
//! # Architecture
//!
//! - **Account**: balance + append-only transaction log for one customer
//! - **Bank**: sole owner of accounts, mints account numbers, runs transfers
//! - **Single Owner**: all mutation goes through `&mut Bank`, no locking
//!
//! # Invariants
//!
//! - Non-negative balances: every operation that would overdraw is rejected
//! - Append-only: transaction records are never modified or deleted
//! - Snapshot consistency: each record's `balance_after` is the running balance
//! - Conservation: transfers leave the bank's total deposits unchanged

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod account;
pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;
pub mod types;

// Re-exports
pub use account::Account;
pub use bank::Bank;
pub use config::Config;
pub use error::{AccountRole, Error, Result};
pub use metrics::Metrics;
pub use types::{AccountNumber, Transaction, TransactionKind};
