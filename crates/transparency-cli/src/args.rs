//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use transparency_core::ReportFormat;

#[derive(Parser)]
#[command(name = "transparency")]
#[command(about = "Run transparency checks and simulations in a deadline-bounded sandbox")]
#[command(version)]
pub struct Cli {
    /// Output format: table, markdown or json
    #[arg(long, short, global = true, default_value = "table")]
    pub format: ReportFormat,

    /// Include per-scenario sandbox logs in simulation table output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Score a random sample inside a one-off sandbox
    Sandbox,

    /// Run the transparency diagnostic suite
    Diagnostics,

    /// Run the load simulation suite
    Simulate,

    /// Run the sandbox check, diagnostics and simulations in order
    Demo,

    /// Load and validate configuration from the environment
    Config,
}
