//! Core sandbox executor implementation

use futures::FutureExt;
use serde_json::{Value, json};
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::{Instant, timeout};

use super::config::SandboxOptions;
use super::types::ExecutionOutcome;
use crate::error::{ErrorInfo, SandboxError, panic_message};
use crate::logging::{LogLevel, SharedLogger, TracingLogger, emit};

/// Runs one unit of work at a time under a deadline
///
/// Failures, panics and timeouts are turned into data on the returned
/// [`ExecutionOutcome`]; `execute` itself never fails. The instance is meant
/// to be reused sequentially: each call resets the captured log lines.
pub struct Sandbox {
    options: SandboxOptions,
    logger: SharedLogger,
    logs: Vec<String>,
}

impl Sandbox {
    /// Create a sandbox that forwards to `tracing`
    pub fn new(options: SandboxOptions) -> Self {
        Self::with_logger(options, TracingLogger::shared("sandbox"))
    }

    /// Create a sandbox with an explicit logger
    pub fn with_logger(options: SandboxOptions, logger: SharedLogger) -> Self {
        let sandbox = Self {
            options,
            logger,
            logs: Vec::new(),
        };

        sandbox.forward(
            LogLevel::Info,
            &format!("Sandbox \"{}\" initialized", sandbox.options.name),
            Some(&json!({
                "timeout": sandbox.options.effective_timeout_ms(),
                "isolated": sandbox.options.isolated,
            })),
        );

        sandbox
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    pub fn options(&self) -> &SandboxOptions {
        &self.options
    }

    /// Deadline applied to every execution
    pub fn timeout(&self) -> Duration {
        self.options.timeout()
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Copy of the log lines captured by the most recent execution
    pub fn logs(&self) -> Vec<String> {
        self.logs.clone()
    }

    /// Execute asynchronous work under the deadline
    pub async fn execute<T, E, F, Fut>(&mut self, work: F) -> ExecutionOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.logs.clear();
        let starting = format!("Starting sandbox execution: {}", self.options.name);
        self.log(LogLevel::Info, &starting, None);

        let deadline_ms = self.options.effective_timeout_ms();
        let start = Instant::now();

        // Whichever of work and deadline settles first wins; the loser is dropped.
        let result = match timeout(self.options.timeout(), run_guarded(work)).await {
            Ok(result) => result,
            Err(_) => Err(SandboxError::Timeout(deadline_ms)),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => self.log(
                LogLevel::Info,
                "Sandbox execution completed successfully",
                Some(json!({ "duration": elapsed_ms })),
            ),
            Err(err) => self.log(
                LogLevel::Error,
                "Sandbox execution failed",
                Some(json!({ "error": err.to_string() })),
            ),
        }

        ExecutionOutcome {
            result: result.map_err(ErrorInfo::from),
            elapsed_ms,
            logs: self.logs.clone(),
        }
    }

    /// Execute synchronous work under the deadline
    ///
    /// The closure runs on the current task, so a closure that blocks keeps
    /// the deadline from firing until it returns.
    pub async fn execute_sync<T, E, F>(&mut self, work: F) -> ExecutionOutcome<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Display,
    {
        self.execute(move || async move { work() }).await
    }

    /// Record a line in the per-call buffer and forward it if the level allows
    fn log(&mut self, level: LogLevel, message: &str, metadata: Option<Value>) {
        let entry = match &metadata {
            Some(meta) => format!("[{}] {} {}", level.tag(), message, meta),
            None => format!("[{}] {}", level.tag(), message),
        };
        self.logs.push(entry);
        self.forward(level, message, metadata.as_ref());
    }

    fn forward(&self, level: LogLevel, message: &str, metadata: Option<&Value>) {
        if !self.options.log_level.allows(level) {
            return;
        }

        emit(self.logger.as_ref(), level, message, metadata);
    }
}

impl std::fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sandbox")
            .field("options", &self.options)
            .field("logs", &self.logs.len())
            .finish()
    }
}

/// Drive the work to completion, converting errors and panics into `SandboxError`
async fn run_guarded<T, E, F, Fut>(work: F) -> Result<T, SandboxError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let future = match std::panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(future) => future,
        Err(panic) => return Err(SandboxError::Execution(panic_message(panic.as_ref()))),
    };

    // Rendering the error runs caller code too, so it stays inside the guard
    let rendered = async move { future.await.map_err(|err| err.to_string()) };

    match AssertUnwindSafe(rendered).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(message)) => Err(SandboxError::Execution(message)),
        Err(panic) => Err(SandboxError::Execution(panic_message(panic.as_ref()))),
    }
}
