//! Report generation for runner results
//!
//! Renders diagnostic, simulation and single-execution results as a terminal
//! table, Markdown or JSON.

mod json;
mod markdown;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use types::{DiagnosticReport, ExecutionReport, SimulationReport};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::diagnostics::DiagnosticStatus;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Table,
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(ReportFormat::Table),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{}' (expected table, markdown or json)",
                other
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Table => "table",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Render a diagnostic report in the given format
pub fn render_diagnostics(report: &DiagnosticReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => MarkdownReporter::diagnostics(report),
        ReportFormat::Table => Ok(diagnostics_table(report)),
    }
}

/// Render a simulation report in the given format
pub fn render_simulations<O: Serialize>(
    report: &SimulationReport<O>,
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => MarkdownReporter::simulations(report),
        ReportFormat::Table => simulations_table(report),
    }
}

/// Render a single execution report in the given format
pub fn render_execution<T: Serialize>(
    report: &ExecutionReport<T>,
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => MarkdownReporter::execution(report),
        ReportFormat::Table => execution_table(report),
    }
}

pub(crate) fn status_label(status: DiagnosticStatus) -> &'static str {
    match status {
        DiagnosticStatus::Pass => "PASS",
        DiagnosticStatus::Fail => "FAIL",
        DiagnosticStatus::Skip => "SKIP",
    }
}

pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn header(output: &mut String, title: &str, name: &str, timestamp: &DateTime<Utc>) {
    output.push_str(&format!("\n{:=<70}\n", format!("= {} ", title)));
    output.push_str(&format!("Runner: {}\n", name));
    output.push_str(&format!("Timestamp: {}\n", timestamp.format(TIMESTAMP_FORMAT)));
    output.push_str(&format!("{:=<70}\n\n", ""));
}

/// Simple table report for terminal output
fn diagnostics_table(report: &DiagnosticReport) -> String {
    let mut output = String::new();
    header(&mut output, "Diagnostic Results", &report.runner, &report.timestamp);

    output.push_str("SUMMARY\n");
    output.push_str(&format!("{:-<70}\n", ""));
    let summary = &report.summary;
    output.push_str(&format!(
        "Total: {} | Passed: {} | Failed: {} | Skipped: {}\n",
        summary.total, summary.passed, summary.failed, summary.skipped
    ));
    output.push_str(&format!("Pass Rate: {:.1}%\n\n", summary.pass_rate() * 100.0));

    output.push_str("CHECKS\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<28} {:>6} {:>9}  {}\n",
        "Check", "Status", "Time", "Message"
    ));
    output.push_str(&format!("{:-<70}\n", ""));

    for outcome in &report.outcomes {
        output.push_str(&format!(
            "{:<28} {:>6} {:>7}ms  {}\n",
            truncate(&outcome.name, 28),
            status_label(outcome.status),
            outcome.elapsed_ms,
            outcome.message
        ));
        if let Some(error) = outcome.metadata.as_ref().and_then(|m| m.get("error")) {
            output.push_str(&format!("{:<28} error: {}\n", "", error));
        }
    }

    output.push_str(&format!("{:=<70}\n", ""));
    output
}

fn simulations_table<O: Serialize>(report: &SimulationReport<O>) -> Result<String> {
    let mut output = String::new();
    header(&mut output, "Simulation Results", &report.runner, &report.timestamp);

    output.push_str("SUMMARY\n");
    output.push_str(&format!("{:-<70}\n", ""));
    let summary = &report.summary;
    output.push_str(&format!(
        "Total: {} | Successful: {} | Failed: {}\n\n",
        summary.total, summary.successful, summary.failed
    ));

    output.push_str("SCENARIOS\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<24} {:>6} {:>9} {:>9}  {}\n",
        "Scenario", "Status", "Valid", "Time", "Output"
    ));
    output.push_str(&format!("{:-<70}\n", ""));

    for outcome in &report.outcomes {
        let status = if outcome.succeeded { "OK" } else { "FAIL" };
        let validated = match outcome.validated {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };
        let detail = match &outcome.result {
            Ok(output) => serde_json::to_string(output)?,
            Err(failure) => format!("error: {}", failure.message),
        };
        output.push_str(&format!(
            "{:<24} {:>6} {:>9} {:>7}ms  {}\n",
            truncate(&outcome.scenario_name, 24),
            status,
            validated,
            outcome.elapsed_ms,
            detail
        ));
    }

    output.push_str(&format!("{:=<70}\n", ""));
    Ok(output)
}

fn execution_table<T: Serialize>(report: &ExecutionReport<T>) -> Result<String> {
    let mut output = String::new();
    header(&mut output, "Sandbox Execution", &report.sandbox, &report.timestamp);

    let outcome = &report.outcome;
    match &outcome.result {
        Ok(value) => {
            output.push_str(&format!("Status: OK ({}ms)\n", outcome.elapsed_ms));
            output.push_str(&format!("Value: {}\n", serde_json::to_string(value)?));
        }
        Err(failure) => {
            output.push_str(&format!(
                "Status: FAIL ({}ms, {})\n",
                outcome.elapsed_ms, failure.kind
            ));
            output.push_str(&format!("Error: {}\n", failure.message));
        }
    }

    output.push_str("\nLOGS\n");
    output.push_str(&format!("{:-<70}\n", ""));
    for line in &outcome.logs {
        output.push_str(line);
        output.push('\n');
    }

    output.push_str(&format!("{:=<70}\n", ""));
    Ok(output)
}
