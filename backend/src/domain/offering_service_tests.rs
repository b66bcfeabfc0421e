//! Regression coverage for the offering service.

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockOfferingRepository;
use crate::domain::test_support::{admin_context, super_admin_context, unknown_role_context};
use crate::domain::{AdminRole, Brand, BrandFilter, ErrorCode};

fn offering(brand: Brand) -> Offering {
    let now = Utc::now();
    Offering {
        id: Uuid::new_v4(),
        brand,
        name: "Beard trim".to_owned(),
        duration_minutes: 30,
        price_cents: 1800,
        active: true,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn list_forces_the_manager_brand() {
    let mut repo = MockOfferingRepository::new();
    repo.expect_list()
        .withf(|query| query.brand == BrandFilter::Only(Brand::Anais))
        .return_once(|_| Ok((Vec::new(), 0)));

    let service = OfferingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);
    let request = ListOfferingsRequest {
        brand: Some(Brand::Populo),
        ..ListOfferingsRequest::default()
    };

    service.list(&caller, request).await.expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn unrecognized_roles_fail_closed() {
    let mut repo = MockOfferingRepository::new();
    repo.expect_list().never();

    let service = OfferingService::new(Arc::new(repo));
    let caller = unknown_role_context();

    let err = service
        .list(&caller, ListOfferingsRequest::default())
        .await
        .expect_err("unknown role is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn create_rejects_out_of_range_duration() {
    let mut repo = MockOfferingRepository::new();
    repo.expect_insert().never();

    let service = OfferingService::new(Arc::new(repo));
    let caller = super_admin_context();
    let draft = OfferingDraft {
        brand: Brand::Evolve,
        name: "Marathon cut".to_owned(),
        duration_minutes: 9000,
        price_cents: 100,
    };

    let err = service
        .create(&caller, draft)
        .await
        .expect_err("absurd duration is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn manager_cannot_move_an_offering_between_brands() {
    let found = offering(Brand::Evolve);
    let mut repo = MockOfferingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update().never();

    let service = OfferingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerEvolve);
    let patch = OfferingPatch {
        brand: Some(Brand::Anais),
        ..OfferingPatch::default()
    };

    let err = service
        .update(&caller, Uuid::new_v4(), patch)
        .await
        .expect_err("brand change is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn remove_soft_deletes_by_clearing_the_active_flag() {
    let found = offering(Brand::Anais);
    let mut hidden = found.clone();
    hidden.active = false;

    let mut repo = MockOfferingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update()
        .withf(|_, patch| patch.active == Some(false) && patch.brand.is_none())
        .return_once(move |_, _| Ok(Some(hidden)));

    let service = OfferingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);

    service
        .remove(&caller, Uuid::new_v4())
        .await
        .expect("soft delete succeeds");
}

#[rstest]
#[tokio::test]
async fn repository_failures_surface_as_storage_errors() {
    let mut repo = MockOfferingRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(OfferingRepositoryError::query("bad cast")));

    let service = OfferingService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .get(&caller, Uuid::new_v4())
        .await
        .expect_err("storage failure is surfaced");
    assert_eq!(err.code, ErrorCode::StorageError);
}
