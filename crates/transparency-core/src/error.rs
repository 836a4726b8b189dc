//! Error types for sandboxed execution
//!
//! Failures never cross the sandbox boundary as `Err` values. They are
//! converted into [`ErrorInfo`] and stored on the outcome records instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while running a unit of work
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    /// The deadline fired before the work settled
    #[error("Sandbox execution timeout after {0}ms")]
    Timeout(u64),

    /// The work returned an error or panicked
    #[error("{0}")]
    Execution(String),

    /// A simulation validator returned an error or panicked
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl SandboxError {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SandboxError::Timeout(_) => ErrorKind::Timeout,
            SandboxError::Execution(_) => ErrorKind::Execution,
            SandboxError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Check if this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, SandboxError::Timeout(_))
    }
}

/// Classification of a captured failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    Execution,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Execution => "execution",
            ErrorKind::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// Failure captured on an outcome record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// What kind of failure this was
    pub kind: ErrorKind,

    /// Human-readable failure message
    pub message: String,
}

impl ErrorInfo {
    /// Create a new error record
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}

impl From<SandboxError> for ErrorInfo {
    fn from(err: SandboxError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorInfo {}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_carries_deadline() {
        let err = SandboxError::Timeout(50);
        assert_eq!(err.to_string(), "Sandbox execution timeout after 50ms");
        assert!(err.is_timeout());

        let info = ErrorInfo::from(err);
        assert_eq!(info.kind, ErrorKind::Timeout);
        assert!(info.message.contains("50ms"));
    }

    #[test]
    fn test_execution_message_is_passed_through() {
        let info = ErrorInfo::from(SandboxError::Execution("Test error".to_string()));
        assert_eq!(info.kind, ErrorKind::Execution);
        assert_eq!(info.message, "Test error");
        assert!(!info.is_timeout());
    }

    #[test]
    fn test_error_info_serializes_kind_snake_case() {
        let info = ErrorInfo::new(ErrorKind::Validation, "bad output");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["kind"], "validation");
        assert_eq!(json["message"], "bad output");
    }

    #[test]
    fn test_panic_message_downcasts() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(boxed.as_ref()), "owned boom");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(boxed.as_ref()), "Unknown panic");
    }
}
