//! Load simulation suite

use anyhow::Result;
use transparency_core::demos::run_load_simulations;
use transparency_core::{ReportFormat, render_simulations};

use crate::console::CliConsole;

pub async fn execute(console: &CliConsole, format: ReportFormat) -> Result<bool> {
    let report = run_load_simulations().await;
    console.print_report(&render_simulations(&report, format)?);

    if format == ReportFormat::Table {
        for outcome in &report.outcomes {
            console.print_logs(&outcome.scenario_name, &outcome.logs);
        }

        let summary = &report.summary;
        let line = format!(
            "Simulations completed: {}/{} successful",
            summary.successful, summary.total
        );
        if report.is_success() {
            console.success(&line);
        } else {
            console.error(&line);
        }
    }

    Ok(report.is_success())
}
