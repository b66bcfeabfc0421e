//! Restaurant order HTTP handlers. Populo's dine-in queue; the only
//! resource whose status changes run through a strict transition table.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::ListRestaurantOrdersRequest;
use crate::domain::{
    OrderLine, PageEnvelope, PageRequest, RestaurantOrder, RestaurantOrderDraft,
    RestaurantOrderPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::orders::OrderLineBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_brand, parse_optional_brand, parse_optional_status,
};

/// Restaurant order representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOrderBody {
    #[schema(format = "uuid")]
    pub id: Uuid,
    /// Always `POPULO`.
    #[schema(example = "POPULO")]
    pub brand: String,
    /// Table the order was taken at; one-based.
    pub table_number: i32,
    pub lines: Vec<OrderLineBody>,
    /// Sum of the line subtotals, derived server-side.
    pub total_cents: i64,
    /// Fulfilment status.
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<RestaurantOrder> for RestaurantOrderBody {
    fn from(value: RestaurantOrder) -> Self {
        let total_cents = value.total_cents();
        Self {
            id: value.id,
            brand: value.brand.to_string(),
            table_number: value.table_number,
            lines: value.lines.into_iter().map(OrderLineBody::from).collect(),
            total_cents,
            status: value.status.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One page of restaurant orders.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOrderPageBody {
    pub items: Vec<RestaurantOrderBody>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageEnvelope<RestaurantOrder>> for RestaurantOrderPageBody {
    fn from(value: PageEnvelope<RestaurantOrder>) -> Self {
        Self {
            items: value
                .items
                .into_iter()
                .map(RestaurantOrderBody::from)
                .collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
        }
    }
}

/// Query parameters accepted by the restaurant order listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RestaurantOrderListQuery {
    pub brand: Option<String>,
    /// Fulfilment status filter.
    pub status: Option<String>,
    /// Restrict to a single table.
    pub table_number: Option<i32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request payload for creating a restaurant order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantOrderBody {
    /// Must be `POPULO`; only Populo runs a restaurant.
    #[schema(example = "POPULO")]
    pub brand: String,
    /// Table the order was taken at; one-based.
    pub table_number: i32,
    pub lines: Vec<OrderLineBody>,
}

/// Request payload for partially updating a restaurant order. The brand is
/// not patchable and status changes go through the status endpoint.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantOrderBody {
    /// New table number; one-based.
    pub table_number: Option<i32>,
    /// Replacement line set; replaces all lines when present.
    pub lines: Option<Vec<OrderLineBody>>,
}

/// Request payload for a status change.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RestaurantOrderStatusBody {
    /// Target fulfilment status; must be a tabled transition from the
    /// current one.
    #[schema(example = "READY")]
    pub status: String,
}

/// List restaurant orders visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/restaurant-orders",
    params(RestaurantOrderListQuery),
    responses(
        (status = 200, description = "Page of restaurant orders", body = RestaurantOrderPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["restaurant-orders"],
    operation_id = "listRestaurantOrders",
    security(("BearerAuth" = []))
)]
#[get("/restaurant-orders")]
pub async fn list_restaurant_orders(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<RestaurantOrderListQuery>,
) -> ApiResult<web::Json<RestaurantOrderPageBody>> {
    let caller = require_admin(&req, &state).await?;
    let query = query.into_inner();

    let request = ListRestaurantOrdersRequest {
        brand: parse_optional_brand(query.brand, FieldName::new("brand"))?,
        status: parse_optional_status(query.status, FieldName::new("status"))?,
        table_number: query.table_number,
        page: PageRequest::new(query.page, query.per_page),
    };
    let page = state.restaurant_orders.list(&caller, request).await?;
    Ok(web::Json(RestaurantOrderPageBody::from(page)))
}

/// Fetch one restaurant order by id.
#[utoipa::path(
    get,
    path = "/api/v1/restaurant-orders/{id}",
    params(("id" = Uuid, Path, description = "Restaurant order identifier")),
    responses(
        (status = 200, description = "Restaurant order found", body = RestaurantOrderBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["restaurant-orders"],
    operation_id = "getRestaurantOrder",
    security(("BearerAuth" = []))
)]
#[get("/restaurant-orders/{id}")]
pub async fn get_restaurant_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<RestaurantOrderBody>> {
    let caller = require_admin(&req, &state).await?;
    let order = state
        .restaurant_orders
        .get(&caller, id.into_inner())
        .await?;
    Ok(web::Json(RestaurantOrderBody::from(order)))
}

/// Create a restaurant order in `PENDING`.
#[utoipa::path(
    post,
    path = "/api/v1/restaurant-orders",
    request_body = CreateRestaurantOrderBody,
    responses(
        (status = 201, description = "Restaurant order created", body = RestaurantOrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["restaurant-orders"],
    operation_id = "createRestaurantOrder",
    security(("BearerAuth" = []))
)]
#[post("/restaurant-orders")]
pub async fn create_restaurant_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CreateRestaurantOrderBody>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let draft = RestaurantOrderDraft {
        brand: parse_brand(payload.brand, FieldName::new("brand"))?,
        table_number: payload.table_number,
        lines: payload.lines.into_iter().map(OrderLine::from).collect(),
    };
    let order = state.restaurant_orders.create(&caller, draft).await?;
    Ok(HttpResponse::Created().json(RestaurantOrderBody::from(order)))
}

/// Partially update a restaurant order.
#[utoipa::path(
    patch,
    path = "/api/v1/restaurant-orders/{id}",
    params(("id" = Uuid, Path, description = "Restaurant order identifier")),
    request_body = UpdateRestaurantOrderBody,
    responses(
        (status = 200, description = "Restaurant order updated", body = RestaurantOrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["restaurant-orders"],
    operation_id = "updateRestaurantOrder",
    security(("BearerAuth" = []))
)]
#[patch("/restaurant-orders/{id}")]
pub async fn update_restaurant_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateRestaurantOrderBody>,
) -> ApiResult<web::Json<RestaurantOrderBody>> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let patch = RestaurantOrderPatch {
        table_number: payload.table_number,
        lines: payload
            .lines
            .map(|lines| lines.into_iter().map(OrderLine::from).collect()),
    };
    let order = state
        .restaurant_orders
        .update(&caller, id.into_inner(), patch)
        .await?;
    Ok(web::Json(RestaurantOrderBody::from(order)))
}

/// Move a restaurant order along the kitchen workflow.
#[utoipa::path(
    patch,
    path = "/api/v1/restaurant-orders/{id}/status",
    params(("id" = Uuid, Path, description = "Restaurant order identifier")),
    request_body = RestaurantOrderStatusBody,
    responses(
        (status = 200, description = "Restaurant order status updated", body = RestaurantOrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["restaurant-orders"],
    operation_id = "patchRestaurantOrderStatus",
    security(("BearerAuth" = []))
)]
#[patch("/restaurant-orders/{id}/status")]
pub async fn patch_restaurant_order_status(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<RestaurantOrderStatusBody>,
) -> ApiResult<web::Json<RestaurantOrderBody>> {
    let caller = require_admin(&req, &state).await?;
    let order = state
        .restaurant_orders
        .patch_status(&caller, id.into_inner(), &payload.status)
        .await?;
    Ok(web::Json(RestaurantOrderBody::from(order)))
}

/// Delete a restaurant order.
#[utoipa::path(
    delete,
    path = "/api/v1/restaurant-orders/{id}",
    params(("id" = Uuid, Path, description = "Restaurant order identifier")),
    responses(
        (status = 204, description = "Restaurant order deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["restaurant-orders"],
    operation_id = "removeRestaurantOrder",
    security(("BearerAuth" = []))
)]
#[delete("/restaurant-orders/{id}")]
pub async fn remove_restaurant_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    state
        .restaurant_orders
        .remove(&caller, id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "restaurant_orders_tests.rs"]
mod tests;
