//! Configuration model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::logging::LogLevel;

pub const DEFAULT_APP_NAME: &str = "transparency-logic-time-machine-bots";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SAMPLE_RATE: f64 = 0.1;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!(
                "unknown environment '{}' (expected development, staging or production)",
                other
            )),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: Environment::default(),
            port: default_port(),
            log_level: LogLevel::default(),
        }
    }
}

/// Telemetry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Collector endpoint; must be an http(s) URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
}

fn default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: None,
            endpoint: None,
            sample_rate: default_sample_rate(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,

    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl AppConfig {
    /// Service name reported by telemetry, falling back to the app name
    pub fn service_name(&self) -> &str {
        self.telemetry
            .service_name
            .as_deref()
            .unwrap_or(&self.app.name)
    }
}
