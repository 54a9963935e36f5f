//! Metrics collection for observability
//!
//! Prometheus counters for ledger operations. Each [`Metrics`] owns a private
//! registry, so several banks (or tests) can run side by side.
//!
//! # Metrics
//!
//! - `bank_accounts_created_total` - Accounts opened
//! - `bank_deposits_total` - Deposits applied (transfer legs included)
//! - `bank_withdrawals_total` - Withdrawals applied (transfer legs included)
//! - `bank_transfers_total` - Completed transfers
//! - `bank_transfer_amount` - Histogram of transferred amounts
//! - `bank_rejected_operations_total` - Operations rejected with an error
//! - `bank_transfer_rollbacks_total` - Transfers compensated after a failed deposit leg

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::fmt;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Accounts opened
    pub accounts_created: IntCounter,

    /// Deposits applied
    pub deposits_total: IntCounter,

    /// Withdrawals applied
    pub withdrawals_total: IntCounter,

    /// Completed transfers
    pub transfers_total: IntCounter,

    /// Transferred amounts
    pub transfer_amount: Histogram,

    /// Rejected operations
    pub rejected_total: IntCounter,

    /// Compensated transfers
    pub rollbacks_total: IntCounter,

    registry: Registry,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let accounts_created =
            IntCounter::new("bank_accounts_created_total", "Total number of accounts opened")?;
        registry.register(Box::new(accounts_created.clone()))?;

        let deposits_total =
            IntCounter::new("bank_deposits_total", "Total number of deposits applied")?;
        registry.register(Box::new(deposits_total.clone()))?;

        let withdrawals_total =
            IntCounter::new("bank_withdrawals_total", "Total number of withdrawals applied")?;
        registry.register(Box::new(withdrawals_total.clone()))?;

        let transfers_total =
            IntCounter::new("bank_transfers_total", "Total number of completed transfers")?;
        registry.register(Box::new(transfers_total.clone()))?;

        let transfer_amount = Histogram::with_opts(
            HistogramOpts::new("bank_transfer_amount", "Histogram of transferred amounts")
                .buckets(vec![1.0, 10.0, 50.0, 100.0, 500.0, 1_000.0, 5_000.0, 10_000.0]),
        )?;
        registry.register(Box::new(transfer_amount.clone()))?;

        let rejected_total = IntCounter::new(
            "bank_rejected_operations_total",
            "Total number of operations rejected with an error",
        )?;
        registry.register(Box::new(rejected_total.clone()))?;

        let rollbacks_total = IntCounter::new(
            "bank_transfer_rollbacks_total",
            "Total number of transfers compensated after a failed deposit leg",
        )?;
        registry.register(Box::new(rollbacks_total.clone()))?;

        Ok(Self {
            accounts_created,
            deposits_total,
            withdrawals_total,
            transfers_total,
            transfer_amount,
            rejected_total,
            rollbacks_total,
            registry,
        })
    }

    /// Record account creation
    pub fn record_account_created(&self) {
        self.accounts_created.inc();
    }

    /// Record a deposit
    pub fn record_deposit(&self) {
        self.deposits_total.inc();
    }

    /// Record a withdrawal
    pub fn record_withdrawal(&self) {
        self.withdrawals_total.inc();
    }

    /// Record a completed transfer
    pub fn record_transfer(&self, amount: f64) {
        self.transfers_total.inc();
        self.transfer_amount.observe(amount);
    }

    /// Record a rejected operation
    pub fn record_rejected(&self) {
        self.rejected_total.inc();
    }

    /// Record a compensated transfer
    pub fn record_rollback(&self) {
        self.rollbacks_total.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render the registry in the Prometheus text exposition format
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(err) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::warn!(error = %err, "failed to encode metrics");
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("accounts_created", &self.accounts_created.get())
            .field("deposits_total", &self.deposits_total.get())
            .field("withdrawals_total", &self.withdrawals_total.get())
            .field("transfers_total", &self.transfers_total.get())
            .field("rejected_total", &self.rejected_total.get())
            .field("rollbacks_total", &self.rollbacks_total.get())
            .finish()
    }
}
