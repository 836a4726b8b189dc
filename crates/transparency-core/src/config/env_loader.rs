//! Environment variable-based configuration loading

use std::collections::HashMap;
use std::str::FromStr;

use super::types::{AppConfig, Environment};
use super::validation::{ConfigError, ConfigIssue, validate_config};
use crate::logging::LogLevel;

pub const ENV_APP_NAME: &str = "APP_NAME";
pub const ENV_NODE_ENV: &str = "NODE_ENV";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_PORT: &str = "PORT";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_TELEMETRY_ENABLED: &str = "TELEMETRY_ENABLED";
pub const ENV_TELEMETRY_SERVICE_NAME: &str = "TELEMETRY_SERVICE_NAME";
pub const ENV_TELEMETRY_ENDPOINT: &str = "TELEMETRY_ENDPOINT";
pub const ENV_TELEMETRY_SAMPLE_RATE: &str = "TELEMETRY_SAMPLE_RATE";

/// Load configuration from the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_vars(std::env::vars())
}

impl AppConfig {
    /// Build and validate a configuration from key/value pairs
    ///
    /// Unknown keys are ignored and empty values count as unset. Every
    /// problem found is reported, not just the first.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        let mut config = AppConfig::default();
        let mut issues = Vec::new();

        if let Some(name) = vars.get(ENV_APP_NAME) {
            config.app.name = name.trim().to_string();
        }

        // NODE_ENV takes precedence over APP_ENV
        let environment = [ENV_NODE_ENV, ENV_APP_ENV]
            .into_iter()
            .find_map(|key| vars.get(key).map(|value| (key, value)));
        if let Some((key, env)) = environment {
            match Environment::from_str(env) {
                Ok(environment) => config.app.environment = environment,
                Err(msg) => issues.push(ConfigIssue::new(key, msg)),
            }
        }

        if let Some(port) = vars.get(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => config.app.port = port,
                Err(_) => issues.push(ConfigIssue::new(
                    ENV_PORT,
                    format!("'{}' is not a port number (1-65535)", port),
                )),
            }
        }

        if let Some(level) = vars.get(ENV_LOG_LEVEL) {
            match LogLevel::from_str(level) {
                Ok(level) => config.app.log_level = level,
                Err(err) => issues.push(ConfigIssue::new(ENV_LOG_LEVEL, err.to_string())),
            }
        }

        if let Some(enabled) = vars.get(ENV_TELEMETRY_ENABLED) {
            match parse_bool(enabled) {
                Some(enabled) => config.telemetry.enabled = enabled,
                None => issues.push(ConfigIssue::new(
                    ENV_TELEMETRY_ENABLED,
                    format!("'{}' is not a boolean (true/false/1/0/yes/no)", enabled),
                )),
            }
        }

        if let Some(service) = vars.get(ENV_TELEMETRY_SERVICE_NAME) {
            config.telemetry.service_name = Some(service.trim().to_string());
        }

        if let Some(endpoint) = vars.get(ENV_TELEMETRY_ENDPOINT) {
            config.telemetry.endpoint = Some(endpoint.trim().to_string());
        }

        if let Some(rate) = vars.get(ENV_TELEMETRY_SAMPLE_RATE) {
            match rate.trim().parse::<f64>() {
                Ok(rate) => config.telemetry.sample_rate = rate,
                Err(_) => issues.push(ConfigIssue::new(
                    ENV_TELEMETRY_SAMPLE_RATE,
                    format!("'{}' is not a number", rate),
                )),
            }
        }

        issues.extend(validate_config(&config));

        if issues.is_empty() {
            tracing::debug!(
                app = %config.app.name,
                environment = %config.app.environment,
                "configuration loaded"
            );
            Ok(config)
        } else {
            Err(ConfigError::Invalid { issues })
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_APP_NAME, DEFAULT_PORT, DEFAULT_SAMPLE_RATE};

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_from_empty_environment() {
        let config = AppConfig::from_vars(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.app.name, DEFAULT_APP_NAME);
        assert_eq!(config.app.environment, Environment::Development);
        assert_eq!(config.app.port, DEFAULT_PORT);
        assert_eq!(config.app.log_level, LogLevel::Info);
        assert!(!config.telemetry.enabled);
        assert_eq!(config.telemetry.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.service_name(), DEFAULT_APP_NAME);
    }

    #[test]
    fn test_full_environment() {
        let config = AppConfig::from_vars(vars(&[
            ("APP_NAME", "bots"),
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("TELEMETRY_ENABLED", "yes"),
            ("TELEMETRY_SERVICE_NAME", "bots-telemetry"),
            ("TELEMETRY_ENDPOINT", "https://collector.local:4318"),
            ("TELEMETRY_SAMPLE_RATE", "0.5"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.app.name, "bots");
        assert_eq!(config.app.environment, Environment::Production);
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert!(config.telemetry.enabled);
        assert_eq!(config.service_name(), "bots-telemetry");
        assert_eq!(
            config.telemetry.endpoint.as_deref(),
            Some("https://collector.local:4318")
        );
        assert_eq!(config.telemetry.sample_rate, 0.5);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = AppConfig::from_vars(vars(&[("PORT", ""), ("APP_NAME", "  ")])).unwrap();
        assert_eq!(config.app.port, DEFAULT_PORT);
        assert_eq!(config.app.name, DEFAULT_APP_NAME);
    }

    #[test]
    fn test_all_issues_are_collected() {
        let err = AppConfig::from_vars(vars(&[
            ("APP_ENV", "qa"),
            ("PORT", "not-a-port"),
            ("LOG_LEVEL", "verbose"),
            ("TELEMETRY_ENABLED", "maybe"),
            ("TELEMETRY_ENDPOINT", "collector"),
            ("TELEMETRY_SAMPLE_RATE", "1.5"),
        ]))
        .unwrap_err();

        let ConfigError::Invalid { issues } = &err;
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "APP_ENV",
                "PORT",
                "LOG_LEVEL",
                "TELEMETRY_ENABLED",
                "TELEMETRY_ENDPOINT",
                "TELEMETRY_SAMPLE_RATE",
            ]
        );
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_node_env_overrides_app_env() {
        let config = AppConfig::from_vars(vars(&[
            ("NODE_ENV", "production"),
            ("APP_ENV", "staging"),
        ]))
        .unwrap();
        assert_eq!(config.app.environment, Environment::Production);

        let config = AppConfig::from_vars(vars(&[("NODE_ENV", ""), ("APP_ENV", "staging")])).unwrap();
        assert_eq!(config.app.environment, Environment::Staging);

        let err = AppConfig::from_vars(vars(&[("NODE_ENV", "test"), ("APP_ENV", "staging")]))
            .unwrap_err();
        let ConfigError::Invalid { issues } = err;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "NODE_ENV");
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = AppConfig::from_vars(vars(&[("PORT", "0")])).unwrap_err();
        let ConfigError::Invalid { issues } = err;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "PORT");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("sure"), None);
    }
}
