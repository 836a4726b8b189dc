//! Diagnostic check registrations and classified outcomes

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Boxed check body
pub type CheckFn = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<bool>> + Send + Sync>;

/// A named pass/fail check
pub struct DiagnosticCheck {
    /// Check name, reported on the outcome (not required to be unique)
    pub name: String,

    /// What the check verifies
    pub description: String,

    /// Skipped checks are reported without running
    pub skip: bool,

    run: CheckFn,
}

impl DiagnosticCheck {
    /// Create a check from an async body
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            skip: false,
            run: Box::new(move || Box::pin(run())),
        }
    }

    /// Create a check from a synchronous body
    ///
    /// The body is invoked inside the sandbox, not at registration.
    pub fn from_fn<F>(name: impl Into<String>, description: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        let run = Arc::new(run);
        Self::new(name, description, move || {
            let run = Arc::clone(&run);
            async move { run() }
        })
    }

    /// Mark the check as skipped
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub(crate) fn invoke(&self) -> BoxFuture<'static, anyhow::Result<bool>> {
        (self.run)()
    }
}

impl fmt::Debug for DiagnosticCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticCheck")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

/// Classification of a diagnostic check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStatus {
    Pass,
    Fail,
    Skip,
}

impl DiagnosticStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticStatus::Pass => "pass",
            DiagnosticStatus::Fail => "fail",
            DiagnosticStatus::Skip => "skip",
        }
    }
}

impl fmt::Display for DiagnosticStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result of one check in one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticOutcome {
    pub name: String,
    pub status: DiagnosticStatus,
    pub message: String,
    pub elapsed_ms: u64,

    /// Extra details, attached when the check could not complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, Value>>,
}

impl DiagnosticOutcome {
    pub fn passed(&self) -> bool {
        self.status == DiagnosticStatus::Pass
    }
}

/// Pass/fail/skip totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DiagnosticSummary {
    pub fn from_outcomes(outcomes: &[DiagnosticOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.status {
                DiagnosticStatus::Pass => summary.passed += 1,
                DiagnosticStatus::Fail => summary.failed += 1,
                DiagnosticStatus::Skip => summary.skipped += 1,
            }
        }
        summary
    }

    /// True when nothing failed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Share of executed (non-skipped) checks that passed
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            0.0
        } else {
            self.passed as f64 / executed as f64
        }
    }
}
