//! Transparency diagnostic suite

use anyhow::Result;
use transparency_core::demos::run_transparency_diagnostics;
use transparency_core::{ReportFormat, render_diagnostics};

use crate::console::CliConsole;

pub async fn execute(console: &CliConsole, format: ReportFormat) -> Result<bool> {
    let report = run_transparency_diagnostics().await;
    console.print_report(&render_diagnostics(&report, format)?);

    if format == ReportFormat::Table {
        let summary = &report.summary;
        let line = format!(
            "Diagnostics completed: {}/{} passed",
            summary.passed, summary.total
        );
        if report.is_success() {
            console.success(&line);
        } else {
            console.error(&line);
        }
    }

    Ok(report.is_success())
}
