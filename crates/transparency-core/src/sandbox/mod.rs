//! Deadline-bounded execution of in-process work
//!
//! The isolation here is logical: work runs on the caller's runtime, and the
//! sandbox only guarantees that nothing it runs can fail the caller.

mod config;
mod executor;
mod types;


pub use config::{
    DEFAULT_TIMEOUT_MS, DIAGNOSTIC_TIMEOUT_MS, SIMULATION_TIMEOUT_MS, SandboxOptions,
};
pub use executor::Sandbox;
pub use types::ExecutionOutcome;

use std::fmt::Display;
use std::future::Future;

/// Create a one-off sandbox, run `work` in it and discard the sandbox
///
/// `name` always wins over the name carried in `options`.
pub async fn run_in_sandbox<T, E, F, Fut>(
    name: impl Into<String>,
    work: F,
    options: Option<SandboxOptions>,
) -> ExecutionOutcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let options = SandboxOptions {
        name: name.into(),
        ..options.unwrap_or_default()
    };
    Sandbox::new(options).execute(work).await
}
