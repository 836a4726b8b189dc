//! Sandbox options

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::logging::LogLevel;

/// Default deadline for a sandbox execution
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Deadline used by diagnostic runners
pub const DIAGNOSTIC_TIMEOUT_MS: u64 = 60_000;

/// Deadline used by simulation runners
pub const SIMULATION_TIMEOUT_MS: u64 = 120_000;

/// Options for constructing a [`Sandbox`](super::Sandbox)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxOptions {
    /// Name used in log lines
    pub name: String,

    /// Deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum level forwarded to the logger
    #[serde(default)]
    pub log_level: LogLevel,

    /// Whether the run is logically isolated from other runs.
    /// Informational only; work always runs in-process.
    #[serde(default = "default_isolated")]
    pub isolated: bool,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_isolated() -> bool {
    true
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            name: "sandbox".to_string(),
            timeout_ms: default_timeout_ms(),
            log_level: LogLevel::default(),
            isolated: default_isolated(),
        }
    }
}

impl SandboxOptions {
    /// Create options with the given name and defaults for everything else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the deadline. Zero falls back to the default deadline.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }

    /// Deadline actually applied to executions
    pub fn effective_timeout_ms(&self) -> u64 {
        if self.timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            self.timeout_ms
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.effective_timeout_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SandboxOptions::default();
        assert_eq!(options.timeout_ms, 30_000);
        assert_eq!(options.log_level, LogLevel::Info);
        assert!(options.isolated);
    }

    #[test]
    fn test_options_builder() {
        let options = SandboxOptions::new("probe")
            .with_timeout_ms(50)
            .with_log_level(LogLevel::Warn)
            .with_isolated(false);

        assert_eq!(options.name, "probe");
        assert_eq!(options.timeout(), Duration::from_millis(50));
        assert_eq!(options.log_level, LogLevel::Warn);
        assert!(!options.isolated);
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let options = SandboxOptions::new("zero").with_timeout_ms(0);
        assert_eq!(options.effective_timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SandboxOptions = serde_json::from_str(r#"{"name":"from-json"}"#).unwrap();
        assert_eq!(options.name, "from-json");
        assert_eq!(options.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(options.isolated);
    }
}
