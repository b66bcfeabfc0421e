//! Regression coverage for the access service.

use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockAdminProfileRepository, MockIdentityVerifier};
use crate::domain::{AdminProfile, AdminRole, ErrorCode, RoleCode, VerifiedIdentity};

fn identity() -> VerifiedIdentity {
    VerifiedIdentity {
        id: Uuid::new_v4(),
        email: "pat@example.com".to_owned(),
    }
}

fn profile(id: Uuid, role: AdminRole) -> AdminProfile {
    AdminProfile {
        id,
        display_name: "Pat Okafor".to_owned(),
        role: RoleCode::from(role),
    }
}

#[rstest]
#[tokio::test]
async fn valid_token_with_profile_yields_a_context() {
    let caller = identity();
    let caller_id = caller.id;

    let mut verifier = MockIdentityVerifier::new();
    verifier
        .expect_verify()
        .withf(|token| token == "good-token")
        .return_once(move |_| Ok(caller));

    let mut profiles = MockAdminProfileRepository::new();
    profiles
        .expect_find_by_identity()
        .withf(move |id| *id == caller_id)
        .return_once(move |id| Ok(Some(profile(*id, AdminRole::ManagerEvolve))));

    let service = AccessService::new(Arc::new(verifier), Arc::new(profiles));
    let context = service
        .authenticate("good-token")
        .await
        .expect("authentication succeeds");

    assert_eq!(context.identity.id, caller_id);
    assert_eq!(
        AdminRole::from_code(context.role()),
        Some(AdminRole::ManagerEvolve)
    );
}

#[rstest]
#[case(IdentityVerifierError::rejected("bad signature"))]
#[case(IdentityVerifierError::transport("connection refused"))]
#[tokio::test]
async fn verification_failures_collapse_to_unauthorized(
    #[case] failure: IdentityVerifierError,
) {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify().return_once(move |_| Err(failure));

    let mut profiles = MockAdminProfileRepository::new();
    profiles.expect_find_by_identity().never();

    let service = AccessService::new(Arc::new(verifier), Arc::new(profiles));
    let err = service
        .authenticate("whatever")
        .await
        .expect_err("unverified token is rejected");

    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn missing_profile_is_forbidden() {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify().return_once(|_| Ok(identity()));

    let mut profiles = MockAdminProfileRepository::new();
    profiles.expect_find_by_identity().return_once(|_| Ok(None));

    let service = AccessService::new(Arc::new(verifier), Arc::new(profiles));
    let err = service
        .authenticate("good-token")
        .await
        .expect_err("non-admin is rejected");

    assert_eq!(err.code, ErrorCode::Forbidden);
    assert_eq!(err.message, NOT_AN_ADMIN);
}

#[rstest]
#[tokio::test]
async fn profile_lookup_failure_is_indistinguishable_from_missing_profile() {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify().return_once(|_| Ok(identity()));

    let mut profiles = MockAdminProfileRepository::new();
    profiles
        .expect_find_by_identity()
        .return_once(|_| Err(AdminProfileRepositoryError::query("relation missing")));

    let service = AccessService::new(Arc::new(verifier), Arc::new(profiles));
    let err = service
        .authenticate("good-token")
        .await
        .expect_err("lookup failure is rejected");

    assert_eq!(err.code, ErrorCode::Forbidden);
    assert_eq!(err.message, NOT_AN_ADMIN);
}
