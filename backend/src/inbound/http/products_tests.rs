use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
use actix_web::{App, web};
use chrono::Utc;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{FixtureAdminGate, MockAdminGate, MockProductOperations};
use crate::domain::{Brand, Error, ErrorCode};

fn sample_product(brand: Brand) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        brand,
        name: "Lavender candle".into(),
        description: None,
        price_cents: 1250,
        available: true,
        created_at: now,
        updated_at: now,
    }
}

fn state_with_products(products: MockProductOperations) -> HttpState {
    let mut state = HttpState::for_tests(Arc::new(FixtureAdminGate));
    state.products = Arc::new(products);
    state
}

#[actix_web::test]
async fn listing_without_credentials_is_rejected_before_the_gate() {
    let mut gate = MockAdminGate::new();
    gate.expect_authenticate().never();
    let state = HttpState::for_tests(Arc::new(gate));

    let app = init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(list_products),
    )
    .await;
    let response = call_service(&app, TestRequest::get().uri("/products").to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Error = read_body_json(response).await;
    assert_eq!(body.code, ErrorCode::Unauthorized);
}

#[actix_web::test]
async fn listing_returns_a_page_envelope() {
    let mut products = MockProductOperations::new();
    products
        .expect_list()
        .withf(|_, request| request.brand == Some(Brand::Anais) && request.available == Some(true))
        .returning(|_, _| {
            Ok(PageEnvelope {
                items: vec![sample_product(Brand::Anais)],
                total: 1,
                page: 1,
                per_page: 20,
            })
        });

    let app = init_service(
        App::new()
            .app_data(web::Data::new(state_with_products(products)))
            .service(list_products),
    )
    .await;
    let request = TestRequest::get()
        .uri("/products?brand=ANAIS&available=true")
        .insert_header((AUTHORIZATION, "Bearer token"))
        .to_request();
    let response = call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["brand"], "ANAIS");
    assert_eq!(body["items"][0]["priceCents"], 1250);
}

#[actix_web::test]
async fn an_unknown_brand_filter_is_a_bad_request() {
    let mut products = MockProductOperations::new();
    products.expect_list().never();

    let app = init_service(
        App::new()
            .app_data(web::Data::new(state_with_products(products)))
            .service(list_products),
    )
    .await;
    let request = TestRequest::get()
        .uri("/products?brand=ACME")
        .insert_header((AUTHORIZATION, "Bearer token"))
        .to_request();
    let response = call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Error = read_body_json(response).await;
    assert_eq!(body.code, ErrorCode::InvalidRequest);
    let details = body.details.expect("field details attached");
    assert_eq!(details["field"], "brand");
    assert_eq!(details["code"], "invalid_brand");
}

#[actix_web::test]
async fn a_missing_product_maps_to_not_found() {
    let mut products = MockProductOperations::new();
    products
        .expect_get()
        .returning(|_, _| Err(Error::not_found("product not found")));

    let app = init_service(
        App::new()
            .app_data(web::Data::new(state_with_products(products)))
            .service(get_product),
    )
    .await;
    let request = TestRequest::get()
        .uri(&format!("/products/{}", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, "Bearer token"))
        .to_request();
    let response = call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn creating_a_product_returns_created() {
    let mut products = MockProductOperations::new();
    products
        .expect_create()
        .withf(|_, draft| draft.brand == Brand::Evolve && draft.name == "Vitamin serum")
        .returning(|_, draft| {
            let now = Utc::now();
            Ok(Product {
                id: Uuid::new_v4(),
                brand: draft.brand,
                name: draft.name.clone(),
                description: draft.description.clone(),
                price_cents: draft.price_cents,
                available: true,
                created_at: now,
                updated_at: now,
            })
        });

    let app = init_service(
        App::new()
            .app_data(web::Data::new(state_with_products(products)))
            .service(create_product),
    )
    .await;
    let request = TestRequest::post()
        .uri("/products")
        .insert_header((AUTHORIZATION, "Bearer token"))
        .set_json(json!({
            "brand": "EVOLVE",
            "name": "Vitamin serum",
            "priceCents": 3400
        }))
        .to_request();
    let response = call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = read_body_json(response).await;
    assert_eq!(body["name"], "Vitamin serum");
    assert_eq!(body["available"], true);
}

#[actix_web::test]
async fn removing_a_product_returns_no_content() {
    let mut products = MockProductOperations::new();
    products.expect_remove().returning(|_, _| Ok(()));

    let app = init_service(
        App::new()
            .app_data(web::Data::new(state_with_products(products)))
            .service(remove_product),
    )
    .await;
    let request = TestRequest::delete()
        .uri(&format!("/products/{}", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, "Bearer token"))
        .to_request();
    let response = call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[rstest]
fn page_body_carries_the_envelope_metadata() {
    let envelope = PageEnvelope {
        items: vec![sample_product(Brand::Populo)],
        total: 41,
        page: 3,
        per_page: 20,
    };
    let body = ProductPageBody::from(envelope);
    assert_eq!(body.total, 41);
    assert_eq!(body.page, 3);
    assert_eq!(body.items.len(), 1);
}
