//! Reqwest-backed identity verifier adapter.
//!
//! This adapter owns transport details only: bearer forwarding, timeout and
//! HTTP error mapping, and JSON decoding into the verified identity.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::VerifiedIdentity;
use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};

const DEFAULT_USER_AGENT: &str = "brand-admin-backend/0.1";

/// Wire shape of the provider's introspection response.
#[derive(Debug, Deserialize)]
struct IdentityDto {
    id: Uuid,
    email: String,
}

/// Identity verifier that introspects tokens against the provider's
/// `GET /user` endpoint.
pub struct HttpIdentityVerifier {
    client: Client,
    endpoint: Url,
}

impl HttpIdentityVerifier {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// introspection URL cannot be derived from the base URL.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, IdentityVerifierError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| IdentityVerifierError::transport(err.to_string()))?;
        let endpoint = base_url
            .join("user")
            .map_err(|err| IdentityVerifierError::transport(err.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerifierError {
    IdentityVerifierError::transport(error.to_string())
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityVerifierError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(IdentityVerifierError::rejected(format!(
                "provider answered {status}"
            )));
        }
        if !status.is_success() {
            return Err(IdentityVerifierError::transport(format!(
                "provider answered {status}"
            )));
        }

        let identity: IdentityDto = response.json().await.map_err(map_transport_error)?;
        Ok(VerifiedIdentity {
            id: identity.id,
            email: identity.email,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Decode and construction coverage; transport paths are exercised
    //! against mock ports elsewhere.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn the_introspection_endpoint_is_derived_from_the_base_url() {
        let base: Url = "https://id.example.com/api/".parse().expect("valid url");
        let verifier = HttpIdentityVerifier::new(base, Duration::from_secs(5))
            .expect("verifier constructed");
        assert_eq!(verifier.endpoint.as_str(), "https://id.example.com/api/user");
    }

    #[rstest]
    fn the_identity_payload_decodes() {
        let dto: IdentityDto = serde_json::from_str(
            r#"{"id":"5cfe6d52-4f8b-4c7e-9d3a-2b1a6f9e8c70","email":"ops@example.com"}"#,
        )
        .expect("payload decodes");
        assert_eq!(dto.email, "ops@example.com");
    }
}
