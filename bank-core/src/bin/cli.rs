//! Interactive banking CLI binary

use anyhow::Context;
use bank_core::{cli::Session, telemetry, Bank, Config, Metrics};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    telemetry::init(&config.logging);
    tracing::info!(bank = %config.bank.name, "starting banking CLI");

    let mut bank = Bank::from_config(&config.bank);
    if config.metrics.enabled {
        bank = bank.with_metrics(Metrics::new().context("failed to register metrics")?);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(&mut bank, stdin.lock(), stdout.lock())
        .with_currency_symbol(config.bank.currency_symbol.clone())
        .run()
        .context("terminal I/O failed")?;

    if let Some(metrics) = bank.metrics() {
        print!("{}", metrics.render());
    }

    tracing::info!(summary = %bank, "shutting down banking CLI");
    Ok(())
}
