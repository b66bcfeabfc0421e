//! Retail order HTTP handlers.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::ListOrdersRequest;
use crate::domain::{Order, OrderDraft, OrderLine, OrderPatch, PageEnvelope, PageRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_brand, parse_optional_brand, parse_optional_rfc3339_timestamp,
    parse_optional_status, parse_rfc3339_timestamp,
};

/// One order line as sent and returned over the wire.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineBody {
    /// Item description as captured at order time.
    pub name: String,
    /// Units ordered; at least one.
    pub quantity: u32,
    /// Per-unit price in the smallest currency unit.
    pub unit_price_cents: i64,
}

impl From<OrderLineBody> for OrderLine {
    fn from(value: OrderLineBody) -> Self {
        Self {
            name: value.name,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}

impl From<OrderLine> for OrderLineBody {
    fn from(value: OrderLine) -> Self {
        Self {
            name: value.name,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}

/// Order representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
    #[schema(format = "uuid")]
    pub id: Uuid,
    #[schema(example = "EVOLVE")]
    pub brand: String,
    pub customer_name: String,
    pub lines: Vec<OrderLineBody>,
    /// Sum of the line subtotals, derived server-side.
    pub total_cents: i64,
    /// Fulfilment status.
    #[schema(example = "PENDING")]
    pub status: String,
    #[schema(format = "date-time")]
    pub placed_at: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Order> for OrderBody {
    fn from(value: Order) -> Self {
        let total_cents = value.total_cents();
        Self {
            id: value.id,
            brand: value.brand.to_string(),
            customer_name: value.customer_name,
            lines: value.lines.into_iter().map(OrderLineBody::from).collect(),
            total_cents,
            status: value.status.to_string(),
            placed_at: value.placed_at.to_rfc3339(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One page of orders.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPageBody {
    pub items: Vec<OrderBody>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageEnvelope<Order>> for OrderPageBody {
    fn from(value: PageEnvelope<Order>) -> Self {
        Self {
            items: value.items.into_iter().map(OrderBody::from).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
        }
    }
}

/// Query parameters accepted by the order listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub brand: Option<String>,
    /// Fulfilment status filter.
    pub status: Option<String>,
    /// Inclusive lower bound on the placement time, RFC 3339.
    pub placed_from: Option<String>,
    /// Exclusive upper bound on the placement time, RFC 3339.
    pub placed_until: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request payload for creating an order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    #[schema(example = "EVOLVE")]
    pub brand: String,
    pub customer_name: String,
    pub lines: Vec<OrderLineBody>,
    /// When the customer placed the order, RFC 3339.
    #[schema(format = "date-time")]
    pub placed_at: String,
}

/// Request payload for partially updating an order. Status changes go
/// through the dedicated status endpoint instead.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderBody {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<String>,
    pub customer_name: Option<String>,
    /// Replacement line set; replaces all lines when present.
    pub lines: Option<Vec<OrderLineBody>>,
}

/// Request payload for a status change.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OrderStatusBody {
    /// Target fulfilment status.
    #[schema(example = "DELIVERED")]
    pub status: String,
}

/// List orders visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Page of orders", body = OrderPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders",
    security(("BearerAuth" = []))
)]
#[get("/orders")]
pub async fn list_orders(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<OrderListQuery>,
) -> ApiResult<web::Json<OrderPageBody>> {
    let caller = require_admin(&req, &state).await?;
    let query = query.into_inner();

    let request = ListOrdersRequest {
        brand: parse_optional_brand(query.brand, FieldName::new("brand"))?,
        status: parse_optional_status(query.status, FieldName::new("status"))?,
        placed_from: parse_optional_rfc3339_timestamp(
            query.placed_from,
            FieldName::new("placedFrom"),
        )?,
        placed_until: parse_optional_rfc3339_timestamp(
            query.placed_until,
            FieldName::new("placedUntil"),
        )?,
        page: PageRequest::new(query.page, query.per_page),
    };
    let page = state.orders.list(&caller, request).await?;
    Ok(web::Json(OrderPageBody::from(page)))
}

/// Fetch one order by id.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order found", body = OrderBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder",
    security(("BearerAuth" = []))
)]
#[get("/orders/{id}")]
pub async fn get_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<OrderBody>> {
    let caller = require_admin(&req, &state).await?;
    let order = state.orders.get(&caller, id.into_inner()).await?;
    Ok(web::Json(OrderBody::from(order)))
}

/// Create an order.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderBody,
    responses(
        (status = 201, description = "Order created", body = OrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder",
    security(("BearerAuth" = []))
)]
#[post("/orders")]
pub async fn create_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderBody>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let draft = OrderDraft {
        brand: parse_brand(payload.brand, FieldName::new("brand"))?,
        customer_name: payload.customer_name,
        lines: payload.lines.into_iter().map(OrderLine::from).collect(),
        placed_at: parse_rfc3339_timestamp(payload.placed_at, FieldName::new("placedAt"))?,
    };
    let order = state.orders.create(&caller, draft).await?;
    Ok(HttpResponse::Created().json(OrderBody::from(order)))
}

/// Partially update an order.
#[utoipa::path(
    patch,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    request_body = UpdateOrderBody,
    responses(
        (status = 200, description = "Order updated", body = OrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "updateOrder",
    security(("BearerAuth" = []))
)]
#[patch("/orders/{id}")]
pub async fn update_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateOrderBody>,
) -> ApiResult<web::Json<OrderBody>> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let patch = OrderPatch {
        brand: parse_optional_brand(payload.brand, FieldName::new("brand"))?,
        customer_name: payload.customer_name,
        lines: payload
            .lines
            .map(|lines| lines.into_iter().map(OrderLine::from).collect()),
    };
    let order = state.orders.update(&caller, id.into_inner(), patch).await?;
    Ok(web::Json(OrderBody::from(order)))
}

/// Move an order to another fulfilment status.
#[utoipa::path(
    patch,
    path = "/api/v1/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order identifier")),
    request_body = OrderStatusBody,
    responses(
        (status = 200, description = "Order status updated", body = OrderBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "patchOrderStatus",
    security(("BearerAuth" = []))
)]
#[patch("/orders/{id}/status")]
pub async fn patch_order_status(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<OrderStatusBody>,
) -> ApiResult<web::Json<OrderBody>> {
    let caller = require_admin(&req, &state).await?;
    let order = state
        .orders
        .patch_status(&caller, id.into_inner(), &payload.status)
        .await?;
    Ok(web::Json(OrderBody::from(order)))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "removeOrder",
    security(("BearerAuth" = []))
)]
#[delete("/orders/{id}")]
pub async fn remove_order(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    state.orders.remove(&caller, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
