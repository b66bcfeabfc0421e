//! Port for loading admin profiles keyed by verified identity.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AdminProfile, AdminRole, RoleCode};

use super::define_port_error;

define_port_error! {
    /// Errors raised by admin profile repository adapters.
    pub enum AdminProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "admin profile repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "admin profile repository query failed: {message}",
    }
}

/// Port for reading the admin profile bound to a verified identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminProfileRepository: Send + Sync {
    /// Find the admin profile for an identity, if one exists.
    async fn find_by_identity(
        &self,
        identity_id: &Uuid,
    ) -> Result<Option<AdminProfile>, AdminProfileRepositoryError>;
}

/// Fixture implementation that grants every identity a super-administrator
/// profile. Used when no database is configured, in development and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminProfileRepository;

#[async_trait]
impl AdminProfileRepository for FixtureAdminProfileRepository {
    async fn find_by_identity(
        &self,
        identity_id: &Uuid,
    ) -> Result<Option<AdminProfile>, AdminProfileRepositoryError> {
        Ok(Some(AdminProfile {
            id: *identity_id,
            display_name: "Fixture Administrator".to_owned(),
            role: RoleCode::from(AdminRole::SuperAdmin),
        }))
    }
}
