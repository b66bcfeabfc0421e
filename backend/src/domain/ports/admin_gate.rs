//! Driving port for authenticating admin callers.

use async_trait::async_trait;

use crate::domain::{AdminContext, AdminProfile, AdminRole, Error, RoleCode, VerifiedIdentity};

/// Driving port that turns a bearer token into an authenticated admin
/// context. Implemented by the access service; HTTP handlers call it before
/// touching any resource operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminGate: Send + Sync {
    /// Authenticate a bearer token and load the caller's admin profile.
    ///
    /// Fails with `unauthorized` when the token cannot be verified and
    /// with `forbidden` when the identity has no admin profile.
    async fn authenticate(&self, token: &str) -> Result<AdminContext, Error>;
}

/// Fixture implementation that admits every caller as a super-administrator.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminGate;

#[async_trait]
impl AdminGate for FixtureAdminGate {
    async fn authenticate(&self, _token: &str) -> Result<AdminContext, Error> {
        let identity = VerifiedIdentity {
            id: uuid::Uuid::nil(),
            email: "fixture-admin@example.com".to_owned(),
        };
        Ok(AdminContext {
            profile: AdminProfile {
                id: identity.id,
                display_name: "Fixture Administrator".to_owned(),
                role: RoleCode::from(AdminRole::SuperAdmin),
            },
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_admits_any_token_as_super_admin() {
        let gate = FixtureAdminGate;
        let context = gate
            .authenticate("anything")
            .await
            .expect("fixture gate admits every caller");
        assert_eq!(
            AdminRole::from_code(context.role()),
            Some(AdminRole::SuperAdmin)
        );
    }
}
