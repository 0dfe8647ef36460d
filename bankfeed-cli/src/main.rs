// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! bankfeed CLI - pull raw financial data from the provider sandbox into
//! the local event store.
//!
//! # Examples
//!
//! ```bash
//! # Pull every registered product
//! bankfeed
//!
//! # Pull a single product
//! bankfeed transactions
//!
//! # Payroll income (skip-on-not-ready policy)
//! bankfeed income_payroll
//!
//! # List registered products
//! bankfeed --list
//!
//! # Use an explicit database file
//! bankfeed assets --db ./events.db
//! ```
//!
//! Credentials come from `PLAID_CLIENT_ID` and `PLAID_SECRET`; `PLAID_ENV`
//! overrides the sandbox base URL.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bankfeed_products::{ProductRegistry, ProductSelector};

// ============================================================================
// CLI Definition
// ============================================================================

/// bankfeed - archive raw open-banking payloads.
#[derive(Parser)]
#[command(name = "bankfeed")]
#[command(about = "Pull raw financial data into the local event store")]
#[command(version)]
pub struct Cli {
    /// Product to pull, or "all" for every registered product.
    #[arg(default_value = "all")]
    pub product: String,

    /// List registered products and exit.
    #[arg(long)]
    pub list: bool,

    /// Path to the SQLite event database.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Verbose output (debug logging).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no logging).
    #[arg(long, short)]
    pub quiet: bool,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Unknown product selector.
    UnknownProduct = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.list {
        commands::products::run();
        return Ok(());
    }

    let selector: ProductSelector = match cli.product.parse() {
        Ok(selector) => selector,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Usage: bankfeed [{}|all]", ProductRegistry::names().join("|"));
            std::process::exit(ExitCode::UnknownProduct as i32);
        }
    };

    if let Err(err) = commands::pull::run(selector, cli.db.as_deref()).await {
        if !cli.quiet {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
