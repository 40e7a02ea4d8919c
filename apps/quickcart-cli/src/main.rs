//! # QuickCart Entry Point
//!
//! ```bash
//! # Run the scripted checkouts
//! quickcart demo
//!
//! # Same, as JSON lines
//! quickcart demo --json
//!
//! # Show the effective configuration
//! quickcart config --config ./checkout.toml
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs for testability
    match quickcart_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
