//! Configuration check command

use anyhow::Result;
use colored::*;
use serde_json::json;
use transparency_core::{AppConfig, ConfigError, ReportFormat};

use crate::console::CliConsole;

pub fn execute(
    console: &CliConsole,
    format: ReportFormat,
    config: Result<AppConfig, ConfigError>,
) -> Result<bool> {
    match config {
        Ok(config) => {
            print_config(console, format, &config)?;
            Ok(true)
        }
        Err(ConfigError::Invalid { issues }) => {
            match format {
                ReportFormat::Json => {
                    let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
                    let report = json!({ "valid": false, "issues": issues });
                    console.print_report(&serde_json::to_string_pretty(&report)?);
                }
                ReportFormat::Markdown => {
                    let mut md = String::from("# Configuration\n\n**Invalid**\n\n");
                    for issue in &issues {
                        md.push_str(&format!("- `{}`: {}\n", issue.key, issue.message));
                    }
                    console.print_report(&md);
                }
                ReportFormat::Table => {
                    console.error("Configuration is invalid");
                    for issue in &issues {
                        eprintln!("  {} {}", issue.key.bold(), issue.message);
                    }
                }
            }
            Ok(false)
        }
    }
}

fn print_config(console: &CliConsole, format: ReportFormat, config: &AppConfig) -> Result<()> {
    let rows = [
        ("APP_NAME", config.app.name.clone()),
        ("APP_ENV", config.app.environment.to_string()),
        ("PORT", config.app.port.to_string()),
        ("LOG_LEVEL", config.app.log_level.to_string()),
        ("TELEMETRY_ENABLED", config.telemetry.enabled.to_string()),
        ("TELEMETRY_SERVICE_NAME", config.service_name().to_string()),
        (
            "TELEMETRY_ENDPOINT",
            config.telemetry.endpoint.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "TELEMETRY_SAMPLE_RATE",
            config.telemetry.sample_rate.to_string(),
        ),
    ];

    match format {
        ReportFormat::Json => {
            let report = json!({ "valid": true, "config": config });
            console.print_report(&serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Markdown => {
            let mut md = String::from("# Configuration\n\n| Variable | Value |\n|----------|-------|\n");
            for (key, value) in &rows {
                md.push_str(&format!("| {} | {} |\n", key, value));
            }
            console.print_report(&md);
        }
        ReportFormat::Table => {
            console.print_header("Configuration");
            for (key, value) in &rows {
                println!("{:<24} {}", key.bold(), value);
            }
            println!();
            console.success("Configuration is valid");
        }
    }

    Ok(())
}
