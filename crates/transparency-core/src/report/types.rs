//! Report data collected from one runner invocation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::diagnostics::{DiagnosticOutcome, DiagnosticSummary};
use crate::sandbox::ExecutionOutcome;
use crate::simulation::{SimulationOutcome, SimulationSummary};

/// Report for a diagnostic run
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub runner: String,
    pub timestamp: DateTime<Utc>,
    pub summary: DiagnosticSummary,
    pub outcomes: Vec<DiagnosticOutcome>,
}

impl DiagnosticReport {
    pub fn new(runner: impl Into<String>, outcomes: Vec<DiagnosticOutcome>) -> Self {
        Self {
            runner: runner.into(),
            timestamp: Utc::now(),
            summary: DiagnosticSummary::from_outcomes(&outcomes),
            outcomes,
        }
    }

    pub fn is_success(&self) -> bool {
        self.summary.all_passed()
    }
}

/// Report for a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport<O> {
    pub runner: String,
    pub timestamp: DateTime<Utc>,
    pub summary: SimulationSummary,
    pub outcomes: Vec<SimulationOutcome<O>>,
}

impl<O> SimulationReport<O> {
    pub fn new(runner: impl Into<String>, outcomes: Vec<SimulationOutcome<O>>) -> Self {
        Self {
            runner: runner.into(),
            timestamp: Utc::now(),
            summary: SimulationSummary::from_outcomes(&outcomes),
            outcomes,
        }
    }

    pub fn is_success(&self) -> bool {
        self.summary.all_succeeded()
    }
}

/// Report for a single sandbox execution
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport<T> {
    pub sandbox: String,
    pub timestamp: DateTime<Utc>,
    pub outcome: ExecutionOutcome<T>,
}

impl<T> ExecutionReport<T> {
    pub fn new(sandbox: impl Into<String>, outcome: ExecutionOutcome<T>) -> Self {
        Self {
            sandbox: sandbox.into(),
            timestamp: Utc::now(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.succeeded()
    }
}
