//! Command routing logic for CLI

use anyhow::Result;
use transparency_core::{AppConfig, ConfigError};

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;

/// Route a parsed command line to its handler
///
/// Returns whether everything the command ran succeeded.
pub async fn route(cli: Cli, config: Result<AppConfig, ConfigError>) -> Result<bool> {
    let console = CliConsole::new(cli.verbose);

    // Only the config command fails on a bad environment; the suites fall back to defaults
    if cli.command != Commands::Config {
        if let Err(err) = &config {
            console.warn(&format!("{}; continuing with defaults", err));
        }
    }

    match cli.command {
        Commands::Sandbox => commands::sandbox::execute(&console, cli.format).await,
        Commands::Diagnostics => commands::diagnostics::execute(&console, cli.format).await,
        Commands::Simulate => commands::simulate::execute(&console, cli.format).await,
        Commands::Demo => commands::demo::execute(&console, cli.format).await,
        Commands::Config => commands::config::execute(&console, cli.format, config),
    }
}
