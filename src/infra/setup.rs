use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::infra::config::LoggerConfig;

const DEFAULT_CONSOLE_FILTER: &str = "info,biscoff_storefront=debug,tower_http=debug";

fn create_file_appender(log_path: &str, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("jsonl")
        .build(log_path)?;
    Ok(appender)
}

fn create_non_blocking_writer(appender: RollingFileAppender) -> (NonBlocking, WorkerGuard) {
    NonBlockingBuilder::default()
        .lossy(false)
        .finish(appender)
}

fn create_error_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(writer)
        .with_filter(filter_fn(|metadata| metadata.level() == &tracing::Level::ERROR))
}

fn create_log_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(writer)
        .with_filter(filter_fn(|metadata| {
            let level = metadata.level();
            level == &tracing::Level::INFO || level == &tracing::Level::WARN
        }))
}

fn create_console_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    fmt::layer().with_filter(filter)
}

/// Installs the global subscriber. Keep the returned guards alive for the
/// lifetime of the process or buffered file logs are lost.
pub fn init_tracing(config: &LoggerConfig) -> anyhow::Result<(WorkerGuard, WorkerGuard)> {
    let error_appender = create_file_appender(&config.log_path, "err_logs")?;
    let log_appender = create_file_appender(&config.log_path, "app_logs")?;

    let (error_writer, error_guard) = create_non_blocking_writer(error_appender);
    let (log_writer, log_guard) = create_non_blocking_writer(log_appender);

    tracing_subscriber::registry()
        .with(create_error_layer(error_writer))
        .with(create_log_layer(log_writer))
        .with(create_console_layer())
        .try_init()?;

    Ok((error_guard, log_guard))
}
