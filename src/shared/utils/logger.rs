use log::{debug, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at service startup; later calls are ignored
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("log_viewer_db", log::LevelFilter::Debug)
            .filter_module("sqlx", log::LevelFilter::Warn) // Every statement is logged at Info
            .filter_module("mongodb", log::LevelFilter::Warn)
            .filter_module("rustls", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .try_init();

        info!("Logging system initialized");
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log database operations
    pub fn db_operation(operation: &str, target: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => debug!("DB: {} on {} completed in {}ms", operation, target, duration),
            None => debug!("DB: Starting {} on {}", operation, target),
        }
    }

    /// Log connection attempts; never pass a URL that still carries credentials
    pub fn connection_attempt(store: &str, address: &str) {
        info!("Connecting to {} at {}", store, address);
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Store calls slower than this are reported as performance metrics
const SLOW_OPERATION_MS: u64 = 500;

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
    target: String,
}

impl TimedOperation {
    pub fn new(operation: &str, target: &str) -> Self {
        LogContext::db_operation(operation, target, None);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
            target: target.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::db_operation(&self.operation, &self.target, Some(duration));
        if duration > SLOW_OPERATION_MS {
            LogContext::performance_metric(&self.operation, duration, Some("slow"));
        }
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::db_operation(&self.operation, &self.target, Some(duration));
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logger_is_idempotent() {
        init_logger();
        init_logger();
    }

    #[test]
    fn timed_operation_reports_elapsed_millis() {
        let timer = TimedOperation::new("select", "query_jobs");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.finish() >= 5);
    }
}
