//! # QuickCart CLI Library
//!
//! Everything behind the `quickcart` binary, kept in a library so it can be
//! tested without spawning a process.
//!
//! ## Module Organization
//! ```text
//! quickcart_cli/
//! ├── lib.rs        ◄─── You are here (arguments, logging, dispatch)
//! ├── config.rs     ◄─── AppConfig loading and validation
//! ├── scenarios.rs  ◄─── Scripted demo checkouts
//! └── error.rs      ◄─── CliError
//! ```
//!
//! ## Output Streams
//! Receipts, shipment notices and scenario results go to stdout. Logs go to
//! stderr, so `quickcart demo --json | jq` keeps working with logging on.

pub mod config;
pub mod error;
pub mod scenarios;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use quickcart_core::{
    CheckoutProcess, JsonReceiptPrinter, ReceiptPrinter, ShippingNotifier, TextReceiptPrinter,
    TextShippingNotifier,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, OutputFormat};
use error::CliResult;
use scenarios::DemoStore;

#[derive(Debug, Parser)]
#[command(name = "quickcart")]
#[command(author, version, about = "QuickCart checkout demo")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the scripted checkout scenarios
    Demo {
        /// Print receipts and results as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Parses arguments, sets up logging and runs the chosen command.
pub fn run() -> CliResult<()> {
    init_tracing();
    execute(Cli::parse())
}

/// Runs an already-parsed command line.
pub fn execute(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config)?;

    match cli.command {
        Command::Demo { json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                config.checkout.output
            };
            demo(&config, format)
        }
        Command::Config => {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", config.to_toml()?)?;
            Ok(())
        }
    }
}

fn demo(config: &AppConfig, format: OutputFormat) -> CliResult<()> {
    info!(store = %config.store.name, fee = %config.shipping_fee(), %format, "Starting demo");

    // In JSON mode the shipment is embedded in each receipt.
    let (notifier, printer): (Box<dyn ShippingNotifier>, Box<dyn ReceiptPrinter>) = match format {
        OutputFormat::Text => (
            Box::new(TextShippingNotifier::stdout()),
            Box::new(TextReceiptPrinter::stdout()),
        ),
        OutputFormat::Json => (
            Box::new(TextShippingNotifier::new(io::sink())),
            Box::new(JsonReceiptPrinter::stdout()),
        ),
    };
    let mut checkout = CheckoutProcess::new(notifier, printer).with_shipping_fee(config.shipping_fee())?;

    let now = Utc::now();
    let mut store = DemoStore::open(now)?;
    let mut stdout = io::stdout();

    if format == OutputFormat::Text {
        writeln!(stdout, "=== {} ===", config.store.name)?;
        writeln!(stdout)?;
    }

    let reports = scenarios::run_all(&mut checkout, &mut store, &mut stdout, format, now)?;

    let completed = reports.iter().filter(|r| r.is_completed()).count();
    info!(completed, failed = reports.len() - completed, "Demo finished");
    Ok(())
}

/// Initializes tracing. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,quickcart=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo() {
        let cli = Cli::try_parse_from(["quickcart", "demo", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Demo { json: true }));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_global_config_flag() {
        let cli = Cli::try_parse_from(["quickcart", "config", "--config", "shop.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["quickcart"]).is_err());
        assert!(Cli::try_parse_from(["quickcart", "refund"]).is_err());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = Cli::try_parse_from([
            "quickcart",
            "config",
            "--config",
            "/nonexistent/quickcart/checkout.toml",
        ])
        .unwrap();
        assert!(matches!(
            execute(cli),
            Err(error::CliError::ConfigNotFound(_))
        ));
    }
}
