//! Application configuration loaded from environment variables

mod env_loader;
mod types;
mod validation;

pub use env_loader::{
    ENV_APP_ENV, ENV_APP_NAME, ENV_LOG_LEVEL, ENV_NODE_ENV, ENV_PORT, ENV_TELEMETRY_ENABLED,
    ENV_TELEMETRY_ENDPOINT, ENV_TELEMETRY_SAMPLE_RATE, ENV_TELEMETRY_SERVICE_NAME, load_config,
};
pub use types::{
    AppConfig, AppSettings, DEFAULT_APP_NAME, DEFAULT_PORT, DEFAULT_SAMPLE_RATE, Environment,
    TelemetrySettings,
};
pub use validation::{ConfigError, ConfigIssue};
