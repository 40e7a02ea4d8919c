//! # CLI Error Types
//!
//! Everything the `quickcart` binary can fail with. Checkout failures inside
//! the demo scenarios are reported as outcomes, not returned here; a
//! `CliError` always ends the process.

use std::path::PathBuf;

use quickcart_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Domain error while setting up the demo store.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config values that parse but make no sense.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
