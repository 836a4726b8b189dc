//! Pass/fail diagnostic checks
//!
//! Checks are registered on a [`DiagnosticRunner`] and executed in order,
//! each through the runner's single sandbox, with skipped checks reported
//! without running.

mod runner;
mod types;

pub use runner::{DEFAULT_DIAGNOSTIC_RUNNER, DiagnosticRunner, run_diagnostics};
pub use types::{CheckFn, DiagnosticCheck, DiagnosticOutcome, DiagnosticStatus, DiagnosticSummary};
