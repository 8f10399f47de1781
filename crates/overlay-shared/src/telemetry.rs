//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetrySettings;
use crate::constants::{DEFAULT_LOG_FILTER, SERVICE_NAME};

/// Install the global subscriber. The returned guard must be kept alive for
/// as long as file logging should flush.
pub fn init_telemetry(settings: &TelemetrySettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match &settings.log_directory {
        Some(directory) => {
            let prefix = settings
                .log_file_prefix
                .clone()
                .unwrap_or_else(|| SERVICE_NAME.to_string());
            let appender = tracing_appender::rolling::daily(directory, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_target(true))
                .with(fmt::layer().json().with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_target(true))
                .init();
            None
        }
    }
}
