use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;

use crate::error::DispatchError;

/// Text shown for a successful lookup that found no mapping.
pub const NOT_FOUND: &str = "not found";

/// Uniform envelope delivered to callers regardless of protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ResolutionOutcome {
    /// `value == None` means the resolver found no mapping.
    #[serde(rename_all = "camelCase")]
    Success { value: Option<Value>, elapsed_ms: u64 },
    #[serde(rename_all = "camelCase")]
    Failure { message: String, elapsed_ms: u64 },
}

impl ResolutionOutcome {
    /// Builds the envelope for a finished call.
    #[must_use]
    pub fn from_result(result: Result<Option<Value>, DispatchError>, elapsed_ms: u64) -> Self {
        match result {
            Ok(value) => Self::Success {
                value: normalize(value),
                elapsed_ms,
            },
            Err(e) => Self::Failure {
                message: e.user_message(),
                elapsed_ms,
            },
        }
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        match self {
            Self::Success { elapsed_ms, .. } | Self::Failure { elapsed_ms, .. } => *elapsed_ms,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Success { value: None, .. })
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value, .. } => value.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }

    /// Pretty JSON for a found value, `not_found` for an empty success and the
    /// error message for a failure.
    #[must_use]
    pub fn render(&self, not_found: &str) -> String {
        match self {
            Self::Success {
                value: Some(value), ..
            } => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            Self::Success { value: None, .. } => not_found.to_owned(),
            Self::Failure { message, .. } => message.clone(),
        }
    }
}

impl Display for ResolutionOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { .. } => write!(
                f,
                "Success: {} ({}ms)",
                self.render(NOT_FOUND),
                self.elapsed_ms()
            ),
            Self::Failure {
                message,
                elapsed_ms,
            } => write!(f, "Error: {message} ({elapsed_ms}ms)"),
        }
    }
}

/// Null and empty strings count as "no mapping".
fn normalize(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::{ResolverError, UNKNOWN_ERROR, ValidationError};

    #[test]
    fn test_success_with_value() {
        let outcome = ResolutionOutcome::from_result(Ok(Some(json!("0xabc"))), 12);
        assert!(outcome.is_success());
        assert!(!outcome.is_not_found());
        assert_eq!(outcome.value(), Some(&json!("0xabc")));
        assert_eq!(outcome.elapsed_ms(), 12);
        assert_eq!(outcome.render(NOT_FOUND), "\"0xabc\"");
        assert_eq!(outcome.to_string(), "Success: \"0xabc\" (12ms)");
    }

    #[test]
    fn test_null_is_not_found() {
        for value in [None, Some(Value::Null), Some(json!(""))] {
            let outcome = ResolutionOutcome::from_result(Ok(value), 3);
            assert!(outcome.is_success());
            assert!(outcome.is_not_found());
            assert_eq!(outcome.render(NOT_FOUND), NOT_FOUND);
        }
    }

    #[test]
    fn test_failure_messages() {
        let outcome = ResolutionOutcome::from_result(
            Err(ResolverError::Rejected("network down".to_owned()).into()),
            7,
        );
        assert_eq!(outcome.message(), Some("network down"));
        assert_eq!(outcome.elapsed_ms(), 7);
        assert!(outcome.value().is_none());

        let outcome =
            ResolutionOutcome::from_result(Err(ResolverError::Rejected(String::new()).into()), 0);
        assert_eq!(outcome.message(), Some(UNKNOWN_ERROR));

        let outcome =
            ResolutionOutcome::from_result(Err(ValidationError::MissingChainId.into()), 0);
        assert_eq!(outcome.to_string(), format!("Error: {} (0ms)", ValidationError::MissingChainId));
    }

    #[test]
    fn test_serialized_shape() {
        let outcome = ResolutionOutcome::from_result(Ok(Some(json!({"avatar": "x"}))), 5);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "success", "value": {"avatar": "x"}, "elapsedMs": 5})
        );

        let outcome = ResolutionOutcome::Failure {
            message: "boom".to_owned(),
            elapsed_ms: 1,
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "failure", "message": "boom", "elapsedMs": 1})
        );
    }
}
