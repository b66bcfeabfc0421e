//! Product administration HTTP handlers.
//!
//! ```text
//! GET    /api/v1/products
//! GET    /api/v1/products/{id}
//! POST   /api/v1/products
//! PATCH  /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::ListProductsRequest;
use crate::domain::{PageEnvelope, PageRequest, Product, ProductDraft, ProductPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_brand, parse_optional_brand};

/// Product representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    /// Stable identifier.
    #[schema(format = "uuid")]
    pub id: Uuid,
    /// Owning brand.
    #[schema(example = "ANAIS")]
    pub brand: String,
    /// Display name.
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Whether the product is currently on sale.
    pub available: bool,
    /// Creation timestamp, RFC 3339.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Last modification timestamp, RFC 3339.
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Product> for ProductBody {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            brand: value.brand.to_string(),
            name: value.name,
            description: value.description,
            price_cents: value.price_cents,
            available: value.available,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One page of products.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageBody {
    /// Rows on this page.
    pub items: Vec<ProductBody>,
    /// Total rows matching the filter.
    pub total: i64,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
}

impl From<PageEnvelope<Product>> for ProductPageBody {
    fn from(value: PageEnvelope<Product>) -> Self {
        Self {
            items: value.items.into_iter().map(ProductBody::from).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
        }
    }
}

/// Query parameters accepted by the product listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Requested brand restriction; narrowed to the caller's scope.
    pub brand: Option<String>,
    /// Restrict to a single availability state.
    pub available: Option<bool>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Rows per page, capped at 100.
    pub per_page: Option<u32>,
}

/// Request payload for creating a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    /// Owning brand.
    #[schema(example = "ANAIS")]
    pub brand: String,
    /// Display name.
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
}

/// Request payload for partially updating a product.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New long-form description.
    pub description: Option<String>,
    /// New price in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// New availability state.
    pub available: Option<bool>,
}

/// List products visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Page of products", body = ProductPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security(("BearerAuth" = []))
)]
#[get("/products")]
pub async fn list_products(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<ProductListQuery>,
) -> ApiResult<web::Json<ProductPageBody>> {
    let caller = require_admin(&req, &state).await?;
    let query = query.into_inner();

    let request = ListProductsRequest {
        brand: parse_optional_brand(query.brand, FieldName::new("brand"))?,
        available: query.available,
        page: PageRequest::new(query.page, query.per_page),
    };
    let page = state.products.list(&caller, request).await?;
    Ok(web::Json(ProductPageBody::from(page)))
}

/// Fetch one product by id.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product found", body = ProductBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct",
    security(("BearerAuth" = []))
)]
#[get("/products/{id}")]
pub async fn get_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<ProductBody>> {
    let caller = require_admin(&req, &state).await?;
    let product = state.products.get(&caller, id.into_inner()).await?;
    Ok(web::Json(ProductBody::from(product)))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct",
    security(("BearerAuth" = []))
)]
#[post("/products")]
pub async fn create_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let draft = ProductDraft {
        brand: parse_brand(payload.brand, FieldName::new("brand"))?,
        name: payload.name,
        description: payload.description,
        price_cents: payload.price_cents,
    };
    let product = state.products.create(&caller, draft).await?;
    Ok(HttpResponse::Created().json(ProductBody::from(product)))
}

/// Partially update a product.
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated", body = ProductBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "updateProduct",
    security(("BearerAuth" = []))
)]
#[patch("/products/{id}")]
pub async fn update_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateProductBody>,
) -> ApiResult<web::Json<ProductBody>> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let patch = ProductPatch {
        brand: parse_optional_brand(payload.brand, FieldName::new("brand"))?,
        name: payload.name,
        description: payload.description,
        price_cents: payload.price_cents,
        available: payload.available,
    };
    let product = state
        .products
        .update(&caller, id.into_inner(), patch)
        .await?;
    Ok(web::Json(ProductBody::from(product)))
}

/// Soft-delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Product hidden from sale"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "removeProduct",
    security(("BearerAuth" = []))
)]
#[delete("/products/{id}")]
pub async fn remove_product(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    state.products.remove(&caller, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
