//! Configuration validation

use std::fmt;
use thiserror::Error;
use url::Url;

use super::env_loader::{
    ENV_APP_NAME, ENV_PORT, ENV_TELEMETRY_ENDPOINT, ENV_TELEMETRY_SAMPLE_RATE,
};
use super::types::AppConfig;

/// One problem with one configuration key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub key: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {}", join_issues(.issues))]
    Invalid { issues: Vec<ConfigIssue> },
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppConfig {
    /// Re-check an already-built configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = validate_config(self);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { issues })
        }
    }
}

pub(crate) fn validate_config(config: &AppConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if config.app.name.trim().is_empty() {
        issues.push(ConfigIssue::new(ENV_APP_NAME, "must not be empty"));
    }

    if config.app.port == 0 {
        issues.push(ConfigIssue::new(ENV_PORT, "must be a positive integer"));
    }

    if let Some(endpoint) = &config.telemetry.endpoint {
        if let Err(msg) = check_endpoint(endpoint) {
            issues.push(ConfigIssue::new(ENV_TELEMETRY_ENDPOINT, msg));
        }
    }

    let rate = config.telemetry.sample_rate;
    if !(0.0..=1.0).contains(&rate) {
        issues.push(ConfigIssue::new(
            ENV_TELEMETRY_SAMPLE_RATE,
            format!("{} is outside 0.0..=1.0", rate),
        ));
    }

    issues
}

fn check_endpoint(endpoint: &str) -> Result<(), String> {
    let url = Url::parse(endpoint).map_err(|e| format!("'{}' is not a URL: {}", endpoint, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}' (expected http or https)", other)),
    }
}
