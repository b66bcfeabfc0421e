//! Caller identity and administrator profile types.
//!
//! A [`VerifiedIdentity`] is produced by the identity-verifier port from a
//! bearer credential and is immutable for the request's lifetime. An
//! [`AdminProfile`] is the provisioned administrator record looked up by
//! identity id; this subsystem only reads it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::RoleCode;

/// Identity confirmed by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Opaque identity id assigned by the provider.
    pub id: Uuid,
    /// Email address on record with the provider.
    pub email: String,
}

/// Provisioned administrator record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Administrative id (distinct from the identity id).
    pub id: Uuid,
    /// Display name for audit logs and UI.
    pub display_name: String,
    /// Provisioned role code, carried verbatim.
    pub role: RoleCode,
}

/// Fully resolved caller for one request: verified identity plus the
/// administrator profile it mapped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    /// Verified identity from the provider.
    pub identity: VerifiedIdentity,
    /// Administrator profile found for that identity.
    pub profile: AdminProfile,
}

impl AdminContext {
    /// The caller's provisioned role code.
    #[must_use]
    pub fn role(&self) -> &RoleCode {
        &self.profile.role
    }
}
