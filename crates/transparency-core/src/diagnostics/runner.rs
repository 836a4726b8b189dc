//! Sequential runner for diagnostic checks

use serde_json::json;
use std::collections::BTreeMap;
use tokio::time::Instant;

use super::types::{DiagnosticCheck, DiagnosticOutcome, DiagnosticStatus, DiagnosticSummary};
use crate::logging::{LogLevel, SharedLogger, TracingLogger, emit};
use crate::sandbox::{DIAGNOSTIC_TIMEOUT_MS, Sandbox, SandboxOptions};

/// Default runner name
pub const DEFAULT_DIAGNOSTIC_RUNNER: &str = "diagnostic-runner";

/// Runs registered checks one after another through a single sandbox
pub struct DiagnosticRunner {
    name: String,
    tests: Vec<DiagnosticCheck>,
    sandbox: Sandbox,
    logger: SharedLogger,
}

impl DiagnosticRunner {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_logger(name, TracingLogger::shared("diagnostics"))
    }

    /// Create a runner whose sandbox and own messages go to `logger`
    pub fn with_logger(name: impl Into<String>, logger: SharedLogger) -> Self {
        let name = name.into();
        let options = SandboxOptions::new(name.clone())
            .with_timeout_ms(DIAGNOSTIC_TIMEOUT_MS)
            .with_log_level(LogLevel::Info);

        Self {
            sandbox: Sandbox::with_logger(options, logger.clone()),
            name,
            tests: Vec::new(),
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a check. Duplicated names are kept.
    pub fn register_test(&mut self, test: DiagnosticCheck) {
        emit(
            self.logger.as_ref(),
            LogLevel::Debug,
            &format!("Registered diagnostic test: {}", test.name),
            None,
        );
        self.tests.push(test);
    }

    /// Number of registered checks
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Run every registered check in registration order
    pub async fn run_all(&mut self) -> Vec<DiagnosticOutcome> {
        emit(
            self.logger.as_ref(),
            LogLevel::Info,
            &format!("Running {} diagnostic tests", self.tests.len()),
            None,
        );

        let mut results = Vec::with_capacity(self.tests.len());
        for test in &self.tests {
            if test.skip {
                results.push(DiagnosticOutcome {
                    name: test.name.clone(),
                    status: DiagnosticStatus::Skip,
                    message: "Test skipped".to_string(),
                    elapsed_ms: 0,
                    metadata: None,
                });
                continue;
            }

            results.push(Self::run_test(&mut self.sandbox, test).await);
        }

        let summary = DiagnosticSummary::from_outcomes(&results);
        emit(
            self.logger.as_ref(),
            LogLevel::Info,
            "Diagnostic tests completed",
            Some(&json!({
                "total": summary.total,
                "passed": summary.passed,
                "failed": summary.failed,
                "skipped": summary.skipped,
            })),
        );

        results
    }

    async fn run_test(sandbox: &mut Sandbox, test: &DiagnosticCheck) -> DiagnosticOutcome {
        let start = Instant::now();
        let outcome = sandbox.execute(|| test.invoke()).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome.result {
            Err(failure) => {
                let message = if failure.message.is_empty() {
                    "Test execution failed".to_string()
                } else {
                    failure.message.clone()
                };
                let mut metadata = BTreeMap::new();
                metadata.insert("error".to_string(), json!(failure));

                DiagnosticOutcome {
                    name: test.name.clone(),
                    status: DiagnosticStatus::Fail,
                    message,
                    elapsed_ms,
                    metadata: Some(metadata),
                }
            }
            Ok(passed) => DiagnosticOutcome {
                name: test.name.clone(),
                status: if passed {
                    DiagnosticStatus::Pass
                } else {
                    DiagnosticStatus::Fail
                },
                message: if passed { "Test passed" } else { "Test failed" }.to_string(),
                elapsed_ms,
                metadata: None,
            },
        }
    }
}

impl Default for DiagnosticRunner {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSTIC_RUNNER)
    }
}

/// Register `tests` on a fresh runner, run them and discard the runner
pub async fn run_diagnostics(
    tests: impl IntoIterator<Item = DiagnosticCheck>,
) -> Vec<DiagnosticOutcome> {
    let mut runner = DiagnosticRunner::default();
    for test in tests {
        runner.register_test(test);
    }
    runner.run_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::logging::RecordingLogger;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_passing_checks() {
        let mut runner = DiagnosticRunner::new("test-diagnostics");
        runner.register_test(DiagnosticCheck::from_fn("test-1", "Should pass", || Ok(true)));
        runner.register_test(DiagnosticCheck::new("test-2", "Should also pass", || async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(true)
        }));

        let results = runner.run_all().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, DiagnosticStatus::Pass);
        assert_eq!(results[0].message, "Test passed");
        assert_eq!(results[1].status, DiagnosticStatus::Pass);
    }

    #[tokio::test]
    async fn test_false_is_a_failure() {
        let mut runner = DiagnosticRunner::new("fail-diagnostics");
        runner.register_test(DiagnosticCheck::from_fn("failing-test", "Should fail", || Ok(false)));

        let results = runner.run_all().await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, DiagnosticStatus::Fail);
        assert_eq!(results[0].message, "Test failed");
        assert!(results[0].metadata.is_none());
    }

    #[tokio::test]
    async fn test_skip_does_not_invoke_check() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut runner = DiagnosticRunner::new("skip-diagnostics");
        runner.register_test(
            DiagnosticCheck::from_fn("skipped-test", "Should skip", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            })
            .skipped(),
        );

        let results = runner.run_all().await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, DiagnosticStatus::Skip);
        assert_eq!(results[0].message, "Test skipped");
        assert_eq!(results[0].elapsed_ms, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_errors_become_failures_with_metadata() {
        let mut runner = DiagnosticRunner::new("error-diagnostics");
        runner.register_test(DiagnosticCheck::from_fn("boom", "Raises", || {
            Err(anyhow::anyhow!("probe unreachable"))
        }));
        runner.register_test(DiagnosticCheck::from_fn("silent", "Raises with no message", || {
            Err(anyhow::anyhow!(""))
        }));

        let results = runner.run_all().await;

        assert_eq!(results[0].status, DiagnosticStatus::Fail);
        assert_eq!(results[0].message, "probe unreachable");
        let metadata = results[0].metadata.as_ref().unwrap();
        assert_eq!(metadata["error"]["kind"], "execution");
        assert_eq!(metadata["error"]["message"], "probe unreachable");

        assert_eq!(results[1].message, "Test execution failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_check_times_out() {
        let mut runner = DiagnosticRunner::new("slow-diagnostics");
        runner.register_test(DiagnosticCheck::new("slow", "Never finishes in time", || async {
            tokio::time::sleep(Duration::from_millis(DIAGNOSTIC_TIMEOUT_MS + 1)).await;
            Ok(true)
        }));

        let results = runner.run_all().await;

        assert_eq!(results[0].status, DiagnosticStatus::Fail);
        assert!(results[0].message.contains("timeout after 60000ms"));
        let metadata = results[0].metadata.as_ref().unwrap();
        assert_eq!(metadata["error"]["kind"], serde_json::json!(ErrorKind::Timeout));
    }

    #[tokio::test]
    async fn test_order_and_counts() {
        let mut runner = DiagnosticRunner::new("mixed");
        runner.register_test(DiagnosticCheck::from_fn("passes", "true", || Ok(true)));
        runner.register_test(DiagnosticCheck::from_fn("fails", "false", || Ok(false)));
        runner.register_test(DiagnosticCheck::from_fn("skips", "skipped", || Ok(true)).skipped());
        assert_eq!(runner.test_count(), 3);

        let results = runner.run_all().await;

        let statuses: Vec<DiagnosticStatus> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![DiagnosticStatus::Pass, DiagnosticStatus::Fail, DiagnosticStatus::Skip]
        );
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["passes", "fails", "skips"]);

        let summary = DiagnosticSummary::from_outcomes(&results);
        assert_eq!((summary.passed, summary.failed, summary.skipped), (1, 1, 1));

        // Registration count is unaffected by running
        assert_eq!(runner.test_count(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_both_recorded() {
        let mut runner = DiagnosticRunner::default();
        runner.register_test(DiagnosticCheck::from_fn("dup", "first", || Ok(true)));
        runner.register_test(DiagnosticCheck::from_fn("dup", "second", || Ok(false)));

        let results = runner.run_all().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, DiagnosticStatus::Pass);
        assert_eq!(results[1].status, DiagnosticStatus::Fail);
    }

    #[tokio::test]
    async fn test_runner_logs_summary() {
        let recorder = Arc::new(RecordingLogger::new());
        let mut runner = DiagnosticRunner::with_logger("logged", recorder.clone());
        runner.register_test(DiagnosticCheck::from_fn("one", "true", || Ok(true)));

        runner.run_all().await;

        let messages = recorder.messages();
        assert!(messages.iter().any(|m| m.message == "Registered diagnostic test: one"));
        assert!(messages.iter().any(|m| m.message == "Running 1 diagnostic tests"));
        let done = messages
            .iter()
            .find(|m| m.message == "Diagnostic tests completed")
            .unwrap();
        assert_eq!(done.metadata.as_ref().unwrap()["passed"], 1);
    }

    #[tokio::test]
    async fn test_run_diagnostics_helper() {
        let results = run_diagnostics(vec![DiagnosticCheck::from_fn(
            "diagnostic-1",
            "Test diagnostic",
            || Ok(true),
        )])
        .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, DiagnosticStatus::Pass);
    }
}
