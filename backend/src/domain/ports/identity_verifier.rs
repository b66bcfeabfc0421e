//! Port for resolving bearer tokens against the external identity provider.

use async_trait::async_trait;

use crate::domain::VerifiedIdentity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity verifier adapters.
    pub enum IdentityVerifierError {
        /// The provider examined the token and refused it.
        Rejected { message: String } =>
            "identity provider rejected the token: {message}",
        /// The provider could not be reached or answered out of protocol.
        Transport { message: String } =>
            "identity provider request failed: {message}",
    }
}

/// Port for exchanging a bearer token for a verified identity.
///
/// Both error variants are treated identically by callers: a token that
/// cannot be positively verified is unauthorised, whatever the cause.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify a bearer token and return the identity it belongs to.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityVerifierError>;
}

/// Fixture implementation that accepts any non-empty token. Used when no
/// identity provider is configured, in development and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityVerifier;

impl FixtureIdentityVerifier {
    /// Identity returned for every accepted token.
    #[must_use]
    pub fn identity() -> VerifiedIdentity {
        VerifiedIdentity {
            id: uuid::Uuid::nil(),
            email: "fixture-admin@example.com".to_owned(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityVerifierError> {
        if token.is_empty() {
            return Err(IdentityVerifierError::rejected("empty token"));
        }
        Ok(Self::identity())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_non_empty_tokens() {
        let verifier = FixtureIdentityVerifier;
        let identity = verifier
            .verify("any-token")
            .await
            .expect("fixture verification succeeds");
        assert_eq!(identity, FixtureIdentityVerifier::identity());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_rejects_empty_tokens() {
        let verifier = FixtureIdentityVerifier;
        let err = verifier
            .verify("")
            .await
            .expect_err("empty token is rejected");
        assert!(matches!(err, IdentityVerifierError::Rejected { .. }));
    }

    #[rstest]
    fn transport_error_formats_message() {
        let err = IdentityVerifierError::transport("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
