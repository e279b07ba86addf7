//! Logger that forwards to `tracing`

use super::traits::{LogLevel, Logger};

/// Forwards messages to the `tracing` ecosystem under the `snowsession`
/// target; install any subscriber to see them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "snowsession", "{message}"),
            LogLevel::Info => tracing::info!(target: "snowsession", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "snowsession", "{message}"),
            LogLevel::Error => tracing::error!(target: "snowsession", "{message}"),
        }
    }
}
