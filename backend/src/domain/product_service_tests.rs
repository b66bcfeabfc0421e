//! Regression coverage for the product service.

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockProductRepository;
use crate::domain::test_support::{admin_context, super_admin_context};
use crate::domain::{AdminRole, Brand, BrandFilter, ErrorCode, PageRequest};

fn product(brand: Brand) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        brand,
        name: "Rose serum".to_owned(),
        description: Some("30ml".to_owned()),
        price_cents: 4200,
        available: true,
        created_at: now,
        updated_at: now,
    }
}

fn draft(brand: Brand) -> ProductDraft {
    ProductDraft {
        brand,
        name: "Rose serum".to_owned(),
        description: None,
        price_cents: 4200,
    }
}

#[rstest]
#[tokio::test]
async fn list_forces_the_manager_brand() {
    let mut repo = MockProductRepository::new();
    repo.expect_list()
        .withf(|query| query.brand == BrandFilter::Only(Brand::Evolve))
        .return_once(|_| Ok((Vec::new(), 0)));

    let service = ProductService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerEvolve);
    let request = ListProductsRequest {
        brand: Some(Brand::Anais),
        ..ListProductsRequest::default()
    };

    let page = service.list(&caller, request).await.expect("list succeeds");
    assert_eq!(page.total, 0);
}

#[rstest]
#[tokio::test]
async fn super_admin_list_honours_the_requested_brand() {
    let mut repo = MockProductRepository::new();
    repo.expect_list()
        .withf(|query| query.brand == BrandFilter::Only(Brand::Anais))
        .return_once(|_| Ok((Vec::new(), 0)));

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();
    let request = ListProductsRequest {
        brand: Some(Brand::Anais),
        ..ListProductsRequest::default()
    };

    service.list(&caller, request).await.expect("list succeeds");
}

#[rstest]
#[tokio::test]
async fn restaurant_staff_may_not_list_products() {
    let mut repo = MockProductRepository::new();
    repo.expect_list().never();

    let service = ProductService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::StaffPopulo);

    let err = service
        .list(&caller, ListProductsRequest::default())
        .await
        .expect_err("staff role is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn get_outside_the_caller_brand_is_forbidden() {
    let found = product(Brand::Anais);
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));

    let service = ProductService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerEvolve);

    let err = service
        .get(&caller, Uuid::new_v4())
        .await
        .expect_err("cross-brand read is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn get_missing_product_is_not_found() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .get(&caller, Uuid::new_v4())
        .await
        .expect_err("missing product is reported");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_payload_before_any_adapter_call() {
    let mut repo = MockProductRepository::new();
    repo.expect_insert().never();

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();
    let mut bad = draft(Brand::Anais);
    bad.price_cents = -1;

    let err = service
        .create(&caller, bad)
        .await
        .expect_err("negative price is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_outside_the_caller_brand_is_forbidden() {
    let mut repo = MockProductRepository::new();
    repo.expect_insert().never();

    let service = ProductService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerPopulo);

    let err = service
        .create(&caller, draft(Brand::Anais))
        .await
        .expect_err("cross-brand create is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn manager_cannot_move_a_product_between_brands() {
    let found = product(Brand::Anais);
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update().never();

    let service = ProductService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerAnais);
    let patch = ProductPatch {
        brand: Some(Brand::Evolve),
        ..ProductPatch::default()
    };

    let err = service
        .update(&caller, Uuid::new_v4(), patch)
        .await
        .expect_err("brand change is rejected");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn super_admin_can_move_a_product_between_brands() {
    let found = product(Brand::Anais);
    let mut moved = found.clone();
    moved.brand = Brand::Evolve;

    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update()
        .withf(|_, patch| patch.brand == Some(Brand::Evolve))
        .return_once(move |_, _| Ok(Some(moved)));

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();
    let patch = ProductPatch {
        brand: Some(Brand::Evolve),
        ..ProductPatch::default()
    };

    let updated = service
        .update(&caller, Uuid::new_v4(), patch)
        .await
        .expect("brand change succeeds for super admin");
    assert_eq!(updated.brand, Brand::Evolve);
}

#[rstest]
#[tokio::test]
async fn empty_patch_is_rejected() {
    let found = product(Brand::Anais);
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update().never();

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .update(&caller, Uuid::new_v4(), ProductPatch::default())
        .await
        .expect_err("empty patch is rejected");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn remove_soft_deletes_by_clearing_availability() {
    let found = product(Brand::Populo);
    let mut hidden = found.clone();
    hidden.available = false;

    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(found)));
    repo.expect_update()
        .withf(|_, patch| patch.available == Some(false) && patch.brand.is_none())
        .return_once(move |_, _| Ok(Some(hidden)));

    let service = ProductService::new(Arc::new(repo));
    let caller = admin_context(AdminRole::ManagerPopulo);

    service
        .remove(&caller, Uuid::new_v4())
        .await
        .expect("soft delete succeeds");
}

#[rstest]
#[tokio::test]
async fn repository_failures_surface_as_storage_errors() {
    let mut repo = MockProductRepository::new();
    repo.expect_list()
        .return_once(|_| Err(ProductRepositoryError::connection("pool exhausted")));

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();

    let err = service
        .list(&caller, ListProductsRequest::default())
        .await
        .expect_err("storage failure is surfaced");
    assert_eq!(err.code, ErrorCode::StorageError);
}

#[rstest]
#[tokio::test]
async fn list_envelope_reflects_the_requested_page() {
    let rows = vec![product(Brand::Anais), product(Brand::Anais)];
    let mut repo = MockProductRepository::new();
    repo.expect_list().return_once(move |_| Ok((rows, 42)));

    let service = ProductService::new(Arc::new(repo));
    let caller = super_admin_context();
    let request = ListProductsRequest {
        page: PageRequest::new(Some(3), Some(2)),
        ..ListProductsRequest::default()
    };

    let page = service.list(&caller, request).await.expect("list succeeds");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 42);
    assert_eq!(page.page, 3);
    assert_eq!(page.per_page, 2);
}
