//! Transparency sandbox CLI
//!
//! Runs the canonical transparency suites through the sandbox and prints the
//! results.
//!
//! - `transparency sandbox`      # basic transparency check
//! - `transparency diagnostics`  # diagnostic suite
//! - `transparency simulate`     # load simulation suite
//! - `transparency demo`         # all three, in order
//! - `transparency config`       # validate environment configuration
//!
//! Every command accepts `--format table|markdown|json`. The process exits
//! with status 1 when a check or scenario fails, or the configuration is
//! invalid.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use args::Cli;
use clap::Parser;
use std::process::ExitCode;
use transparency_core::AppConfig;
use transparency_core::config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logging needs the config; an invalid one still gets default logging
    let loaded = load_config();
    let defaults = AppConfig::default();
    logging::init(loaded.as_ref().unwrap_or(&defaults));

    let success = router::route(cli, loaded).await?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
