//! # Application Configuration
//!
//! Settings for the `quickcart` runner.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command Line (highest priority)                                    │
//! │     quickcart demo --json                                              │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     QUICKCART_SHIPPING_FEE=12.50                                       │
//! │     QUICKCART_STORE_NAME="Corner Shop"                                 │
//! │     QUICKCART_OUTPUT=json                                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/quickcart/checkout.toml (Linux)                          │
//! │     ~/Library/Application Support/com.quickcart.quickcart/checkout.toml│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     $30.00 shipping, text output                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [store]
//! name = "Corner Shop"
//!
//! [checkout]
//! shipping_fee_cents = 3000
//! output = "text"  # text | json
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use quickcart_core::validation::validate_shipping_fee;
use quickcart_core::{Money, DEFAULT_SHIPPING_FEE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

const ENV_SHIPPING_FEE: &str = "QUICKCART_SHIPPING_FEE";
const ENV_STORE_NAME: &str = "QUICKCART_STORE_NAME";
const ENV_OUTPUT: &str = "QUICKCART_OUTPUT";

// =============================================================================
// Output Format
// =============================================================================

/// How receipts and scenario results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable receipts and shipment notices.
    #[default]
    Text,

    /// One JSON document per line.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shown in the demo banner and in logs.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "QuickCart Demo Store".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Flat shipping fee in cents.
    #[serde(default = "default_shipping_fee_cents")]
    pub shipping_fee_cents: i64,

    #[serde(default)]
    pub output: OutputFormat,
}

fn default_shipping_fee_cents() -> i64 {
    DEFAULT_SHIPPING_FEE.cents()
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            shipping_fee_cents: default_shipping_fee_cents(),
            output: OutputFormat::default(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform `checkout.toml`)
    /// 3. Environment variables
    ///
    /// A missing default file is fine; a missing explicit file is an error.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else if explicit {
                return Err(CliError::ConfigNotFound(path));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "store.name must not be empty".into(),
            ));
        }

        validate_shipping_fee(self.shipping_fee()).map_err(|_| {
            CliError::InvalidConfig(format!(
                "checkout.shipping_fee_cents must not be negative, got {}",
                self.checkout.shipping_fee_cents
            ))
        })?;

        Ok(())
    }

    /// Returns the configured shipping fee.
    pub fn shipping_fee(&self) -> Money {
        Money::from_cents(self.checkout.shipping_fee_cents)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quickcart", "quickcart")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`. Unparseable values are logged and skipped.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(fee) = lookup(ENV_SHIPPING_FEE) {
            match fee.parse::<Money>() {
                Ok(parsed) => {
                    debug!(fee = %parsed, "Overriding shipping fee from environment");
                    self.checkout.shipping_fee_cents = parsed.cents();
                }
                Err(e) => warn!(value = %fee, error = %e, "Ignoring invalid shipping fee in environment"),
            }
        }

        if let Some(name) = lookup(ENV_STORE_NAME) {
            self.store.name = name;
        }

        if let Some(output) = lookup(ENV_OUTPUT) {
            match output.parse() {
                Ok(parsed) => self.checkout.output = parsed,
                Err(_) => warn!(output = %output, "Unknown output format in environment"),
            }
        }
    }
}
