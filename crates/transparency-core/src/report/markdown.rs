//! Markdown report generation

use anyhow::Result;
use serde::Serialize;

use super::types::{DiagnosticReport, ExecutionReport, SimulationReport};
use super::{TIMESTAMP_FORMAT, status_label};

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report for a diagnostic run
    pub fn diagnostics(report: &DiagnosticReport) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Diagnostic Report\n\n");
        md.push_str(&format!("- **Runner**: {}\n", report.runner));
        md.push_str(&format!(
            "- **Timestamp**: {}\n\n",
            report.timestamp.format(TIMESTAMP_FORMAT)
        ));

        let summary = &report.summary;
        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        md.push_str(&format!("| Total | {} |\n", summary.total));
        md.push_str(&format!("| Passed | {} |\n", summary.passed));
        md.push_str(&format!("| Failed | {} |\n", summary.failed));
        md.push_str(&format!("| Skipped | {} |\n", summary.skipped));
        md.push_str(&format!(
            "| Pass Rate | {:.1}% |\n\n",
            summary.pass_rate() * 100.0
        ));

        md.push_str("## Checks\n\n");
        md.push_str("| Check | Status | Time | Message |\n");
        md.push_str("|-------|--------|------|---------|\n");
        for outcome in &report.outcomes {
            md.push_str(&format!(
                "| {} | {} | {}ms | {} |\n",
                outcome.name,
                status_label(outcome.status),
                outcome.elapsed_ms,
                escape_cell(&outcome.message)
            ));
        }

        let failures: Vec<_> = report
            .outcomes
            .iter()
            .filter_map(|o| {
                o.metadata
                    .as_ref()
                    .and_then(|m| m.get("error"))
                    .map(|e| (&o.name, e))
            })
            .collect();
        if !failures.is_empty() {
            md.push_str("\n## Errors\n\n");
            for (name, error) in failures {
                md.push_str(&format!("- **{}**: `{}`\n", name, error));
            }
        }

        Ok(md)
    }

    /// Generate a Markdown report for a simulation run
    pub fn simulations<O: Serialize>(report: &SimulationReport<O>) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Simulation Report\n\n");
        md.push_str(&format!("- **Runner**: {}\n", report.runner));
        md.push_str(&format!(
            "- **Timestamp**: {}\n\n",
            report.timestamp.format(TIMESTAMP_FORMAT)
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        md.push_str(&format!("| Total | {} |\n", report.summary.total));
        md.push_str(&format!("| Successful | {} |\n", report.summary.successful));
        md.push_str(&format!("| Failed | {} |\n\n", report.summary.failed));

        md.push_str("## Scenarios\n\n");
        md.push_str("| Scenario | Status | Validated | Time | Result |\n");
        md.push_str("|----------|--------|-----------|------|--------|\n");
        for outcome in &report.outcomes {
            let result = match &outcome.result {
                Ok(output) => format!("`{}`", serde_json::to_string(output)?),
                Err(failure) => escape_cell(&failure.message),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {}ms | {} |\n",
                outcome.scenario_name,
                if outcome.succeeded { "✅" } else { "❌" },
                outcome
                    .validated
                    .map_or_else(|| "-".to_string(), |v| v.to_string()),
                outcome.elapsed_ms,
                result
            ));
        }

        Ok(md)
    }

    /// Generate a Markdown report for one sandbox execution
    pub fn execution<T: Serialize>(report: &ExecutionReport<T>) -> Result<String> {
        let mut md = String::new();
        let outcome = &report.outcome;

        md.push_str(&format!("# Sandbox Execution: {}\n\n", report.sandbox));
        md.push_str(&format!(
            "- **Timestamp**: {}\n",
            report.timestamp.format(TIMESTAMP_FORMAT)
        ));
        md.push_str(&format!("- **Elapsed**: {}ms\n", outcome.elapsed_ms));
        match &outcome.result {
            Ok(value) => {
                md.push_str("- **Status**: ✅ succeeded\n\n");
                md.push_str("## Value\n\n```json\n");
                md.push_str(&serde_json::to_string_pretty(value)?);
                md.push_str("\n```\n");
            }
            Err(failure) => {
                md.push_str(&format!("- **Status**: ❌ {}\n\n", failure.kind));
                md.push_str(&format!("## Error\n\n{}\n", failure.message));
            }
        }

        md.push_str("\n## Logs\n\n```text\n");
        for line in &outcome.logs {
            md.push_str(line);
            md.push('\n');
        }
        md.push_str("```\n");

        Ok(md)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorInfo, ErrorKind};
    use crate::sandbox::ExecutionOutcome;
    use crate::simulation::SimulationOutcome;

    #[test]
    fn test_simulation_markdown() {
        let report = SimulationReport::new(
            "sim",
            vec![SimulationOutcome {
                scenario_name: "high-load".to_string(),
                succeeded: true,
                result: Ok(1000_u32),
                elapsed_ms: 100,
                validated: Some(true),
                logs: Vec::new(),
            }],
        );

        let md = MarkdownReporter::simulations(&report).unwrap();
        assert!(md.starts_with("# Simulation Report"));
        assert!(md.contains("| high-load | ✅ | true | 100ms | `1000` |"));
    }

    #[test]
    fn test_execution_markdown_failure() {
        let report = ExecutionReport::new(
            "basic",
            ExecutionOutcome::<()> {
                result: Err(ErrorInfo::new(ErrorKind::Timeout, "Sandbox execution timeout after 5ms")),
                elapsed_ms: 5,
                logs: vec!["[ERROR] Sandbox execution failed".to_string()],
            },
        );

        let md = MarkdownReporter::execution(&report).unwrap();
        assert!(md.contains("❌ timeout"));
        assert!(md.contains("Sandbox execution timeout after 5ms"));
        assert!(md.contains("[ERROR] Sandbox execution failed"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b c");
    }
}
