/// Tracing setup for the API server
///
/// Events go to two places:
/// - the console, human readable
/// - `LOG_DIR/LOG_FILE`, one JSON object per line
///
/// The filter comes from `RUST_LOG` and defaults to info for this service,
/// the shared library and tower-http.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "usermgmt_api=info,usermgmt_shared=info,tower_http=info";

/// Installs the global subscriber
///
/// The returned guard flushes the file writer when dropped, so it must be
/// held until the process exits.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(&config.directory, &config.file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()?;

    Ok(guard)
}
