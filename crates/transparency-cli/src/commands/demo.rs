//! All three transparency suites in order

use anyhow::Result;
use serde_json::json;
use transparency_core::demos::{
    basic_transparency_check, run_load_simulations, run_transparency_diagnostics,
};
use transparency_core::{ReportFormat, render_diagnostics, render_execution, render_simulations};

use crate::console::CliConsole;

pub async fn execute(console: &CliConsole, format: ReportFormat) -> Result<bool> {
    tracing::info!("=== Running all transparency suites ===");

    let basic = basic_transparency_check().await;
    let diagnostics = run_transparency_diagnostics().await;
    let simulations = run_load_simulations().await;

    let success = basic.is_success() && diagnostics.is_success() && simulations.is_success();

    match format {
        // One document so the output stays parseable
        ReportFormat::Json => {
            let combined = json!({
                "success": success,
                "sandbox": basic,
                "diagnostics": diagnostics,
                "simulations": simulations,
            });
            console.print_report(&serde_json::to_string_pretty(&combined)?);
        }
        ReportFormat::Markdown | ReportFormat::Table => {
            console.print_report(&render_execution(&basic, format)?);
            console.print_report(&render_diagnostics(&diagnostics, format)?);
            console.print_report(&render_simulations(&simulations, format)?);
            if format == ReportFormat::Table {
                for outcome in &simulations.outcomes {
                    console.print_logs(&outcome.scenario_name, &outcome.logs);
                }
            }
        }
    }

    if format == ReportFormat::Table {
        if success {
            console.success("All suites completed successfully");
        } else {
            console.error("One or more suites failed");
        }
    }

    tracing::info!(success, "=== Transparency suites completed ===");
    Ok(success)
}
