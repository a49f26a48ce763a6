//! `tracing` backed logger.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards records to the `tracing` macros under the `geowriter` target.
///
/// Output depends on the installed subscriber, see
/// [`crate::logging::init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "geowriter", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "geowriter", "{}", args),
            LogLevel::Info => tracing::info!(target: "geowriter", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "geowriter", "{}", args),
            LogLevel::Error => tracing::error!(target: "geowriter", "{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingLogger>();
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: records are dropped, nothing panics.
        let logger: Box<dyn Logger> = Box::new(TracingLogger::new());
        logger.info(format_args!("info {}", 1));
        logger.warn(format_args!("warn {}", 2));
    }
}
