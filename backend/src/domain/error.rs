//! Transport-agnostic error payload shared by every layer.
//!
//! The domain resolves failures into a stable machine-readable code plus a
//! human-readable message. Inbound adapters map the code to an HTTP status;
//! the payload itself never references HTTP.
//!
//! `Unauthorized` and `Forbidden` messages are deliberately terse so the
//! response does not confirm whether a credential, role, or resource exists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trace_id::TraceId;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed, fails validation, or names an unknown
    /// enum/status value.
    InvalidRequest,
    /// No credential was presented, or the credential failed verification.
    Unauthorized,
    /// Authenticated but not permitted: missing role, brand mismatch, or a
    /// brand change attempted by a non-super-administrator.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The status machine rejected the requested lifecycle transition.
    IllegalTransition,
    /// The external data store failed; the failure is surfaced unmodified
    /// and never retried at this layer.
    StorageError,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// API error response payload.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("booking not found");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details (field errors, rejected values).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the in-scope trace identifier when one
    /// exists so the payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::IllegalTransition`].
    pub fn illegal_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IllegalTransition, message)
    }

    /// Convenience constructor for [`ErrorCode::StorageError`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(Error::unauthorized("no"), ErrorCode::Unauthorized)]
    #[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
    #[case(Error::not_found("gone"), ErrorCode::NotFound)]
    #[case(Error::illegal_transition("stuck"), ErrorCode::IllegalTransition)]
    #[case(Error::storage("down"), ErrorCode::StorageError)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_codes(#[case] err: Error, #[case] expected: ErrorCode) {
        assert_eq!(err.code, expected);
    }

    #[test]
    fn serializes_snake_case_codes() {
        let err = Error::illegal_transition("no way");
        let value = serde_json::to_value(&err).expect("serialize error");
        assert_eq!(value["code"], json!("illegal_transition"));
        assert_eq!(value["message"], json!("no way"));
    }

    #[test]
    fn details_round_trip() {
        let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
        let value = serde_json::to_value(&err).expect("serialize error");
        assert_eq!(value["details"]["field"], json!("name"));
    }
}
