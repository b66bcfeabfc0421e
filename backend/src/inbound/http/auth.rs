//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by
//! concentrating bearer extraction and the admin gate call here. The token
//! is extracted before any port is touched, so a request with no credential
//! fails without a single identity or profile lookup.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;

use crate::domain::{AdminContext, Error};

use super::ApiResult;
use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the bearer token out of the `Authorization` header.
pub fn extract_bearer(req: &HttpRequest) -> ApiResult<&str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authentication required"))?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("authentication required"));
    }
    Ok(token)
}

/// Authenticate the request against the admin gate.
pub async fn require_admin(req: &HttpRequest, state: &HttpState) -> ApiResult<AdminContext> {
    let token = extract_bearer(req)?;
    state.admin_gate.authenticate(token).await
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn well_formed_bearer_header_yields_the_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        let token = extract_bearer(&req).expect("token extracted");
        assert_eq!(token, "abc.def.ghi");
    }

    #[rstest]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = extract_bearer(&req).expect_err("missing header rejected");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case("abc.def.ghi")]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Bearer ")]
    fn malformed_headers_are_unauthorized(#[case] value: &str) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, value))
            .to_http_request();
        let err = extract_bearer(&req).expect_err("malformed header rejected");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_credential_never_reaches_the_gate() {
        use std::sync::Arc;

        use crate::domain::ports::MockAdminGate;

        let mut gate = MockAdminGate::new();
        gate.expect_authenticate().never();
        let state = HttpState::for_tests(Arc::new(gate));

        let req = TestRequest::default().to_http_request();
        let err = require_admin(&req, &state)
            .await
            .expect_err("unauthenticated request rejected");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
