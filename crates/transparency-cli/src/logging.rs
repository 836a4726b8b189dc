//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use transparency_core::AppConfig;

/// Install the global subscriber
///
/// `RUST_LOG` wins over `LOG_LEVEL`. Output goes to stderr so reports on
/// stdout stay machine-readable.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.app.log_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.telemetry.enabled {
        builder.json().with_current_span(false).init();
    } else {
        builder.compact().with_target(false).init();
    }

    tracing::info!(
        service = config.service_name(),
        environment = %config.app.environment,
        telemetry = config.telemetry.enabled,
        sample_rate = config.telemetry.sample_rate,
        "transparency starting"
    );
}
