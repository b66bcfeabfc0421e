//! Regression coverage for the booking service.

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockBookingRepository;
use crate::domain::test_support::{admin_context, super_admin_context};
use crate::domain::{AdminRole, Brand, BrandFilter, ErrorCode};

fn booking(brand: Brand, status: BookingStatus) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        brand,
        customer_name: "Mara Voss".to_owned(),
        customer_email: "mara@example.com".to_owned(),
        offering_id: Uuid::new_v4(),
        scheduled_at: now,
        status,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn list_forces_the_manager_brand_and_passes_filters() {
    let mut repo = MockBookingRepository::new();
    repo.expect_list()
        .withf(|query| {
            query.brand == BrandFilter::Only(Brand::Anais)
                && query.status == Some(BookingStatus::Confirmed)
        })
        .return_once(|_| Ok((Vec::new(), 0)));

    let service = BookingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);
    let request = ListBookingsRequest {
        brand: Some(Brand::Evolve),
        status: Some(BookingStatus::Confirmed),
        ..ListBookingsRequest::default()
    };

    service.list(&caller, request).await.expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn restaurant_staff_may_not_touch_bookings() {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().never();
    repo.expect_update_status().never();

    let service = BookingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::StaffPopulo);

    let err = service
        .patch_status(&caller, Uuid::new_v4(), "CONFIRMED")
        .await
        .expect_err("staff role is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[case("CONFIRMED", BookingStatus::Confirmed)]
#[case("DONE", BookingStatus::Done)]
#[tokio::test]
async fn any_member_status_is_accepted(
    #[case] wire: &'static str,
    #[case] expected: BookingStatus,
) {
    let found = booking(Brand::Anais, BookingStatus::Pending);
    let mut moved = found.clone();
    moved.status = expected;

    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status()
        .withf(move |_, from, to| *from == BookingStatus::Pending && *to == expected)
        .return_once(move |_, _, _| Ok(moved));

    let service = BookingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);

    let updated = service
        .patch_status(&caller, Uuid::new_v4(), wire)
        .await
        .expect("membership transition succeeds");
    assert_eq!(updated.status, expected);
}

#[rstest]
#[tokio::test]
async fn unknown_status_is_invalid_request_with_no_write() {
    let found = booking(Brand::Anais, BookingStatus::Pending);
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status().never();

    let service = BookingService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .patch_status(&caller, Uuid::new_v4(), "TELEPORTED")
        .await
        .expect_err("unknown status is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn same_status_patch_is_an_idempotent_no_op() {
    let found = booking(Brand::Anais, BookingStatus::Confirmed);
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status().never();

    let service = BookingService::new(Arc::new(repo));
    let caller = super_admin_context();

    let unchanged = service
        .patch_status(&caller, Uuid::new_v4(), "CONFIRMED")
        .await
        .expect("idempotent patch succeeds");
    assert_eq!(unchanged.status, BookingStatus::Confirmed);
}

#[rstest]
#[tokio::test]
async fn concurrent_status_change_surfaces_as_storage_error() {
    let found = booking(Brand::Anais, BookingStatus::Pending);
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status()
        .return_once(|_, _, _| Err(BookingRepositoryError::concurrent_update()));

    let service = BookingService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .patch_status(&caller, Uuid::new_v4(), "CONFIRMED")
        .await
        .expect_err("conflict is surfaced");
    assert_eq!(err.code, ErrorCode::StorageError);
}

#[rstest]
#[tokio::test]
async fn cross_brand_patch_status_is_forbidden_with_no_write() {
    let found = booking(Brand::Evolve, BookingStatus::Pending);
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status().never();

    let service = BookingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);

    let err = service
        .patch_status(&caller, Uuid::new_v4(), "CONFIRMED")
        .await
        .expect_err("cross-brand write is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn remove_hard_deletes_the_booking() {
    let found = booking(Brand::Anais, BookingStatus::Cancelled);
    let mut repo = MockBookingRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_delete().return_once(|_| Ok(true));

    let service = BookingService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);

    service
        .remove(&caller, Uuid::new_v4())
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn create_rejects_malformed_email_before_any_policy_check() {
    let mut repo = MockBookingRepository::new();
    repo.expect_insert().never();

    let service = BookingService::new(Arc::new(repo));
    // Staff cannot create bookings either, but validation reports first.
    let caller = admin_context(AdminRole::StaffPopulo);
    let draft = BookingDraft {
        brand: Brand::Anais,
        customer_name: "Mara Voss".to_owned(),
        customer_email: "not-an-email".to_owned(),
        offering_id: Uuid::new_v4(),
        scheduled_at: Utc::now(),
    };

    let err = service
        .create(&caller, draft)
        .await
        .expect_err("malformed email is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}
