//! JSON report generation

use anyhow::Result;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a pretty-printed JSON report
    pub fn generate<R: Serialize>(report: &R) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticOutcome, DiagnosticStatus};
    use crate::report::DiagnosticReport;

    #[test]
    fn test_json_report_roundtrips_summary() {
        let report = DiagnosticReport::new(
            "diag",
            vec![DiagnosticOutcome {
                name: "data-integrity".to_string(),
                status: DiagnosticStatus::Pass,
                message: "Test passed".to_string(),
                elapsed_ms: 0,
                metadata: None,
            }],
        );

        let json = JsonReporter::generate(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["runner"], "diag");
        assert_eq!(value["summary"]["passed"], 1);
        assert_eq!(value["outcomes"][0]["status"], "pass");
        assert!(value["outcomes"][0].get("metadata").is_none());
        assert!(value["timestamp"].is_string());
    }
}
