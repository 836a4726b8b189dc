//! Logger collaborator used by the sandbox and the runners
//!
//! The sandbox does not own a sink. It forwards level-filtered messages to
//! whatever [`Logger`] it was handed; [`TracingLogger`] is the default and
//! routes everything into `tracing`.

mod level;

pub use level::{LogLevel, ParseLogLevelError};

use parking_lot::Mutex;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Error raised by a logger sink
#[derive(Debug, Clone, thiserror::Error)]
#[error("logger sink failed: {0}")]
pub struct LoggerError(pub String);

/// Structured sink accepting leveled messages with optional metadata
///
/// Implementations may fail; callers in this crate treat failures as
/// non-fatal and drop them.
pub trait Logger: Send + Sync {
    /// Emit one message
    fn log(&self, level: LogLevel, message: &str, metadata: Option<&Value>)
    -> Result<(), LoggerError>;

    fn debug(&self, message: &str, metadata: Option<&Value>) -> Result<(), LoggerError> {
        self.log(LogLevel::Debug, message, metadata)
    }

    fn info(&self, message: &str, metadata: Option<&Value>) -> Result<(), LoggerError> {
        self.log(LogLevel::Info, message, metadata)
    }

    fn warn(&self, message: &str, metadata: Option<&Value>) -> Result<(), LoggerError> {
        self.log(LogLevel::Warn, message, metadata)
    }

    fn error(&self, message: &str, metadata: Option<&Value>) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, message, metadata)
    }
}

/// Shared logger handle
pub type SharedLogger = Arc<dyn Logger>;

/// Send one message to `logger`, dropping sink errors and panics
pub(crate) fn emit(logger: &dyn Logger, level: LogLevel, message: &str, metadata: Option<&Value>) {
    let _ = std::panic::catch_unwind(AssertUnwindSafe(|| logger.log(level, message, metadata)));
}

/// Logger that forwards into `tracing` with a `context` field
#[derive(Debug, Clone)]
pub struct TracingLogger {
    context: String,
}

impl TracingLogger {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// Create a shared handle
    pub fn shared(context: impl Into<String>) -> SharedLogger {
        Arc::new(Self::new(context))
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl Logger for TracingLogger {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
        metadata: Option<&Value>,
    ) -> Result<(), LoggerError> {
        let context = self.context.as_str();
        match (level, metadata) {
            (LogLevel::Debug, Some(meta)) => tracing::debug!(context, %meta, "{}", message),
            (LogLevel::Debug, None) => tracing::debug!(context, "{}", message),
            (LogLevel::Info, Some(meta)) => tracing::info!(context, %meta, "{}", message),
            (LogLevel::Info, None) => tracing::info!(context, "{}", message),
            (LogLevel::Warn, Some(meta)) => tracing::warn!(context, %meta, "{}", message),
            (LogLevel::Warn, None) => tracing::warn!(context, "{}", message),
            (LogLevel::Error, Some(meta)) => tracing::error!(context, %meta, "{}", message),
            (LogLevel::Error, None) => tracing::error!(context, "{}", message),
        }
        Ok(())
    }
}

/// Logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _: LogLevel, _: &str, _: Option<&Value>) -> Result<(), LoggerError> {
        Ok(())
    }
}

/// A message captured by [`RecordingLogger`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMessage {
    pub level: LogLevel,
    pub message: String,
    pub metadata: Option<Value>,
}

/// Logger that keeps every forwarded message in memory
///
/// Useful for asserting what a sandbox forwarded to its sink.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<RecordedMessage>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.messages.lock().clone()
    }

    /// Recorded messages at exactly `level`
    pub fn at_level(&self, level: LogLevel) -> Vec<RecordedMessage> {
        self.messages
            .lock()
            .iter()
            .filter(|m| m.level == level)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl Logger for RecordingLogger {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
        metadata: Option<&Value>,
    ) -> Result<(), LoggerError> {
        self.messages.lock().push(RecordedMessage {
            level,
            message: message.to_string(),
            metadata: metadata.cloned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_logger_keeps_order() {
        let logger = RecordingLogger::new();
        logger.info("first", None).unwrap();
        logger.warn("second", Some(&json!({"k": 1}))).unwrap();

        let messages = logger.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, "first");
        assert_eq!(messages[1].level, LogLevel::Warn);
        assert_eq!(messages[1].metadata, Some(json!({"k": 1})));
        assert_eq!(logger.at_level(LogLevel::Info).len(), 1);

        logger.clear();
        assert!(logger.messages().is_empty());
    }

    #[test]
    fn test_tracing_logger_never_fails() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingLogger::new("sandbox");
            assert_eq!(logger.context(), "sandbox");
            assert!(logger.debug("d", None).is_ok());
            assert!(logger.error("e", Some(&json!({"error": "x"}))).is_ok());
        });
    }
}
