//! Access service: bearer verification and admin profile loading.
//!
//! Implements the [`AdminGate`] driving port. Verification failures of any
//! kind collapse to `unauthorized`; identities without an admin profile
//! collapse to a single `forbidden` message so the response does not reveal
//! whether the identity exists.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    AdminGate, AdminProfileRepository, AdminProfileRepositoryError, IdentityVerifier,
    IdentityVerifierError,
};
use crate::domain::{AdminContext, Error};

const NOT_AN_ADMIN: &str = "administrator access required";

/// Service that authenticates callers against the identity provider and the
/// admin profile store.
#[derive(Clone)]
pub struct AccessService<V, P> {
    verifier: Arc<V>,
    profiles: Arc<P>,
}

impl<V, P> AccessService<V, P> {
    /// Create a new access service over an identity verifier and a profile
    /// repository.
    pub fn new(verifier: Arc<V>, profiles: Arc<P>) -> Self {
        Self { verifier, profiles }
    }
}

#[async_trait]
impl<V, P> AdminGate for AccessService<V, P>
where
    V: IdentityVerifier,
    P: AdminProfileRepository,
{
    async fn authenticate(&self, token: &str) -> Result<AdminContext, Error> {
        let identity = self.verifier.verify(token).await.map_err(|err| {
            match &err {
                IdentityVerifierError::Rejected { message } => {
                    warn!(reason = %message, "identity provider rejected token");
                }
                IdentityVerifierError::Transport { message } => {
                    warn!(reason = %message, "identity provider unreachable");
                }
            }
            Error::unauthorized("authentication required")
        })?;

        let profile = match self.profiles.find_by_identity(&identity.id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(identity = %identity.id, "identity has no admin profile");
                return Err(Error::forbidden(NOT_AN_ADMIN));
            }
            Err(err) => {
                let (AdminProfileRepositoryError::Connection { message }
                | AdminProfileRepositoryError::Query { message }) = &err;
                warn!(identity = %identity.id, reason = %message, "admin profile lookup failed");
                return Err(Error::forbidden(NOT_AN_ADMIN));
            }
        };

        Ok(AdminContext { identity, profile })
    }
}

#[cfg(test)]
#[path = "access_service_tests.rs"]
mod tests;
