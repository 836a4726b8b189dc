//! Types for sandboxed execution

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::error::ErrorInfo;

/// Result of running one unit of work in the sandbox
///
/// Exactly one of value or failure is present; `result` holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome<T> {
    /// Value produced by the work, or the captured failure
    pub result: Result<T, ErrorInfo>,

    /// Wall-clock time from just before the work started to the decision
    pub elapsed_ms: u64,

    /// Log lines captured during this execution only
    pub logs: Vec<String>,
}

impl<T> ExecutionOutcome<T> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Value produced by the work, if it succeeded
    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    /// Captured failure, if the work did not succeed
    pub fn failure(&self) -> Option<&ErrorInfo> {
        self.result.as_ref().err()
    }

    /// Whether the deadline fired before the work settled
    pub fn timed_out(&self) -> bool {
        self.failure().is_some_and(ErrorInfo::is_timeout)
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        self.result
    }

    /// Map the value, keeping timing and logs
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExecutionOutcome<U> {
        ExecutionOutcome {
            result: self.result.map(f),
            elapsed_ms: self.elapsed_ms,
            logs: self.logs,
        }
    }
}

impl<T: Serialize> Serialize for ExecutionOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExecutionOutcome", 4)?;
        state.serialize_field("succeeded", &self.succeeded())?;
        match &self.result {
            Ok(value) => state.serialize_field("value", value)?,
            Err(failure) => state.serialize_field("error", failure)?,
        }
        state.serialize_field("elapsed_ms", &self.elapsed_ms)?;
        state.serialize_field("logs", &self.logs)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_accessors_on_success() {
        let outcome = ExecutionOutcome {
            result: Ok(42),
            elapsed_ms: 3,
            logs: vec!["[INFO] done".to_string()],
        };
        assert!(outcome.succeeded());
        assert_eq!(outcome.value(), Some(&42));
        assert!(outcome.failure().is_none());
        assert!(!outcome.timed_out());

        let mapped = outcome.map(|v| v * 2);
        assert_eq!(mapped.value(), Some(&84));
        assert_eq!(mapped.elapsed_ms, 3);
        assert_eq!(mapped.logs.len(), 1);
    }

    #[test]
    fn test_accessors_on_timeout() {
        let outcome: ExecutionOutcome<()> = ExecutionOutcome {
            result: Err(ErrorInfo::new(ErrorKind::Timeout, "too slow")),
            elapsed_ms: 50,
            logs: Vec::new(),
        };
        assert!(!outcome.succeeded());
        assert!(outcome.value().is_none());
        assert!(outcome.timed_out());
        assert_eq!(outcome.into_result().unwrap_err().message, "too slow");
    }

    #[test]
    fn test_serialize_writes_value_or_error() {
        let ok = ExecutionOutcome {
            result: Ok::<_, ErrorInfo>(serde_json::json!({ "score": 0.7 })),
            elapsed_ms: 1,
            logs: Vec::new(),
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["succeeded"], true);
        assert_eq!(json["value"]["score"], 0.7);
        assert!(json.get("error").is_none());

        let failed: ExecutionOutcome<i32> = ExecutionOutcome {
            result: Err(ErrorInfo::new(ErrorKind::Execution, "boom")),
            elapsed_ms: 1,
            logs: Vec::new(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["succeeded"], false);
        assert_eq!(json["error"]["kind"], "execution");
        assert!(json.get("value").is_none());
    }
}
