//! Transparency Sandbox
//!
//! Deadline-bounded, panic-safe execution of in-process work, with two batch
//! runners built on top of it.
//!
//! # Features
//!
//! - **Sandbox**: runs one unit of work under a timeout and returns a
//!   normalized outcome with its own log trace
//! - **Diagnostics**: named pass/fail/skip checks run in registration order
//! - **Simulations**: input/output scenarios with optional output validation
//! - **Reports**: table, Markdown and JSON rendering of runner results
//! - **Configuration**: environment-driven application settings
//!
//! # Example
//!
//! ```rust,ignore
//! use transparency_core::{DiagnosticCheck, DiagnosticRunner};
//!
//! let mut runner = DiagnosticRunner::new("startup");
//! runner.register_test(DiagnosticCheck::from_fn("config", "Config loads", || Ok(true)));
//! let outcomes = runner.run_all().await;
//! ```

pub mod config;
pub mod demos;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod report;
pub mod sandbox;
pub mod simulation;

// Re-exports for convenience
pub use config::{AppConfig, ConfigError, Environment, load_config};
pub use diagnostics::{
    DiagnosticCheck, DiagnosticOutcome, DiagnosticRunner, DiagnosticStatus, DiagnosticSummary,
    run_diagnostics,
};
pub use error::{ErrorInfo, ErrorKind, SandboxError};
pub use logging::{LogLevel, Logger, NullLogger, SharedLogger, TracingLogger};
pub use report::{ReportFormat, render_diagnostics, render_execution, render_simulations};
pub use sandbox::{ExecutionOutcome, Sandbox, SandboxOptions, run_in_sandbox};
pub use simulation::{
    SimulationOutcome, SimulationRunner, SimulationScenario, SimulationSummary, run_simulations,
};
