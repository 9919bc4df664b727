//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_snapshot` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output (the snapshot document on stdout)
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use dns_snapshot::config::Opt;
use dns_snapshot::initialization::init_logger_with;
use dns_snapshot::{run_snapshot, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.effective_log_level(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_snapshot(&config).await {
        Ok(report) => {
            println!("{}", report.json);
            if report.written {
                if let Some(path) = &report.path {
                    log::info!("Snapshot written to {}", path.display());
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("dns_snapshot error: {:#}", e);
            process::exit(1);
        }
    }
}
