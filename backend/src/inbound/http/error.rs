//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::IllegalTransition => StatusCode::CONFLICT,
        ErrorCode::StorageError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code, ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = &error.trace_id {
            redacted = redacted.with_trace_id(id.clone());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("no"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::illegal_transition("stuck"), StatusCode::CONFLICT)]
    #[case(Error::storage("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] err: Error, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let err = Error::internal("database password is hunter2");
        let res = err.error_response();
        let body = to_bytes(res.into_body()).await.expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(payload["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn non_internal_messages_pass_through() {
        let err = Error::illegal_transition("no direct skip to ready");
        let res = err.error_response();
        let body = to_bytes(res.into_body()).await.expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(payload["code"], "illegal_transition");
        assert_eq!(payload["message"], "no direct skip to ready");
    }

    #[actix_web::test]
    async fn trace_id_is_echoed_as_a_header() {
        let err = Error::not_found("gone").with_trace_id("abc-123");
        let res = err.error_response();
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii");
        assert_eq!(header, "abc-123");
    }
}
