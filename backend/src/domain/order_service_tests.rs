//! Regression coverage for the retail order service.

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockOrderRepository;
use crate::domain::test_support::{admin_context, super_admin_context};
use crate::domain::{AdminRole, Brand, BrandFilter, ErrorCode, OrderLine};

fn order(brand: Brand, status: FulfilmentStatus) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4(),
        brand,
        customer_name: "Jonah Reyes".to_owned(),
        lines: vec![OrderLine {
            name: "Clay pomade".to_owned(),
            quantity: 1,
            unit_price_cents: 1600,
        }],
        status,
        placed_at: now,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn list_forces_the_manager_brand() {
    let mut repo = MockOrderRepository::new();
    repo.expect_list()
        .withf(|query| query.brand == BrandFilter::Only(Brand::Populo))
        .return_once(|_| Ok((Vec::new(), 0)));

    let service = OrderService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerPopulo);
    let request = ListOrdersRequest {
        brand: Some(Brand::Anais),
        ..ListOrdersRequest::default()
    };

    service.list(&caller, request).await.expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn retail_fulfilment_allows_any_member_transition() {
    // Unlike the restaurant workflow, retail fulfilment has no table:
    // pending straight to delivered is accepted.
    let found = order(Brand::Evolve, FulfilmentStatus::Pending);
    let mut moved = found.clone();
    moved.status = FulfilmentStatus::Delivered;

    let mut repo = MockOrderRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status()
        .withf(|_, from, to| {
            *from == FulfilmentStatus::Pending && *to == FulfilmentStatus::Delivered
        })
        .return_once(move |_, _, _| Ok(moved));

    let service = OrderService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerEvolve);

    let updated = service
        .patch_status(&caller, Uuid::new_v4(), "DELIVERED")
        .await
        .expect("membership transition succeeds");
    assert_eq!(updated.status, FulfilmentStatus::Delivered);
}

#[rstest]
#[tokio::test]
async fn unknown_status_is_invalid_request_with_no_write() {
    let found = order(Brand::Evolve, FulfilmentStatus::Pending);
    let mut repo = MockOrderRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status().never();

    let service = OrderService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .patch_status(&caller, Uuid::new_v4(), "SHIPPED")
        .await
        .expect_err("unknown status is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_rejects_an_empty_line_set() {
    let mut repo = MockOrderRepository::new();
    repo.expect_insert().never();

    let service = OrderService::new(Arc::new(repo));
    let caller = super_admin_context();
    let draft = OrderDraft {
        brand: Brand::Anais,
        customer_name: "Jonah Reyes".to_owned(),
        lines: Vec::new(),
        placed_at: Utc::now(),
    };

    let err = service
        .create(&caller, draft)
        .await
        .expect_err("empty order is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn manager_cannot_move_an_order_between_brands() {
    let found = order(Brand::Anais, FulfilmentStatus::Pending);
    let mut repo = MockOrderRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update().never();

    let service = OrderService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);
    let patch = OrderPatch {
        brand: Some(Brand::Populo),
        ..OrderPatch::default()
    };

    let err = service
        .update(&caller, Uuid::new_v4(), patch)
        .await
        .expect_err("brand change is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn remove_of_a_missing_order_is_not_found() {
    let found = order(Brand::Anais, FulfilmentStatus::Cancelled);
    let mut repo = MockOrderRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    // Deleted between the fetch and the delete.
    repo.expect_delete().return_once(|_| Ok(false));

    let service = OrderService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .remove(&caller, Uuid::new_v4())
        .await
        .expect_err("vanished row is reported");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn concurrent_status_change_surfaces_as_storage_error() {
    let found = order(Brand::Anais, FulfilmentStatus::Pending);
    let mut repo = MockOrderRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update_status()
        .return_once(|_, _, _| Err(OrderRepositoryError::concurrent_update()));

    let service = OrderService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .patch_status(&caller, Uuid::new_v4(), "IN_PROGRESS")
        .await
        .expect_err("conflict is surfaced");
    assert_eq!(err.code, ErrorCode::StorageError);
}
