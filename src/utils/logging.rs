//! Logging configuration and setup
//!
//! This module provides logging initialization and the structured log lines
//! every repository operation emits.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, KahootStoreError, Result, StoreError, StoreResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped, so the caller
/// must keep it alive for as long as it wants file output.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| KahootStoreError::Logging(e.to_string()))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .boxed()
    });

    let guard = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "kahoot-store.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| KahootStoreError::Logging(e.to_string()))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log the outcome of one repository operation
pub fn log_database_operation(
    operation: &str,
    table: &str,
    elapsed: Duration,
    outcome: std::result::Result<(), &StoreError>,
) {
    let duration_ms = elapsed.as_millis() as u64;
    let error = match outcome {
        Ok(()) => {
            debug!(
                operation = operation,
                table = table,
                duration_ms = duration_ms,
                "Database operation completed"
            );
            return;
        }
        Err(error) => error,
    };

    let kind = error.kind().as_str();
    match error.severity() {
        ErrorSeverity::Info => debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            kind = kind,
            error = %error,
            "Database operation matched no rows"
        ),
        ErrorSeverity::Warning => warn!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            kind = kind,
            constraint = error.constraint(),
            error = %error,
            "Database operation rejected by constraint"
        ),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            kind = kind,
            error = %error,
            "Database operation failed"
        ),
    }
}

/// Run one repository operation and log its duration and outcome
pub async fn timed_operation<T, F>(operation: &str, table: &str, work: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    let started = Instant::now();
    let result = work.await;
    log_database_operation(operation, table, started.elapsed(), result.as_ref().map(|_| ()));
    result
}

/// Log schema setup steps
pub fn log_schema_event(event: &str, tables: usize) {
    info!(event = event, tables = tables, "Schema event");
}

/// Log pool state snapshots
pub fn log_pool_status(size: u32, idle: usize, max_connections: u32) {
    debug!(
        size = size,
        idle = idle,
        max_connections = max_connections,
        "Connection pool status"
    );
}
