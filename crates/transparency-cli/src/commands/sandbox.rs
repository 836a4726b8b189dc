//! Basic sandboxed transparency check

use anyhow::Result;
use transparency_core::demos::basic_transparency_check;
use transparency_core::{ReportFormat, render_execution};

use crate::console::CliConsole;

pub async fn execute(console: &CliConsole, format: ReportFormat) -> Result<bool> {
    let report = basic_transparency_check().await;
    console.print_report(&render_execution(&report, format)?);

    if format == ReportFormat::Table {
        match &report.outcome.result {
            Ok(check) if check.transparent => {
                console.success(&format!("Transparent (score {:.3})", check.score))
            }
            Ok(check) => console.warn(&format!("Not transparent (score {:.3})", check.score)),
            Err(failure) => console.error(&format!("Transparency check failed: {}", failure)),
        }
    }

    Ok(report.is_success())
}
