//! Configuration for the bank

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bank settings
    pub bank: BankConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Metrics settings
    pub metrics: MetricsConfig,
}

/// Bank settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Bank display name
    pub name: String,

    /// First account number handed out
    pub first_account_number: u64,

    /// Symbol printed in front of amounts by the CLI
    pub currency_symbol: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            name: "MyBank".to_string(),
            first_account_number: 1000,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Metrics settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Print the Prometheus text exposition when the CLI exits
    pub enabled: bool,
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables on top of the defaults
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Read the file named by `BANK_CONFIG` (if set), then apply env overrides
    pub fn load() -> crate::Result<Self> {
        let mut config = match std::env::var("BANK_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> crate::Result<()> {
        if let Ok(name) = std::env::var("BANK_NAME") {
            self.bank.name = name;
        }

        if let Ok(first) = std::env::var("BANK_FIRST_ACCOUNT_NUMBER") {
            self.bank.first_account_number = first.trim().parse().map_err(|_| {
                crate::Error::Config(format!("Invalid BANK_FIRST_ACCOUNT_NUMBER: {}", first))
            })?;
        }

        if let Ok(filter) = std::env::var("BANK_LOG") {
            self.logging.filter = filter;
        }

        if let Ok(format) = std::env::var("BANK_LOG_FORMAT") {
            self.logging.format = LogFormat::parse(&format).ok_or_else(|| {
                crate::Error::Config(format!("Invalid BANK_LOG_FORMAT: {}", format))
            })?;
        }

        if let Ok(enabled) = std::env::var("BANK_METRICS") {
            self.metrics.enabled = matches!(enabled.as_str(), "1" | "true" | "yes" | "on");
        }

        Ok(())
    }
}
