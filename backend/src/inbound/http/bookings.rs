//! Appointment booking HTTP handlers.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::ListBookingsRequest;
use crate::domain::{Booking, BookingDraft, BookingPatch, PageEnvelope, PageRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_brand, parse_optional_brand, parse_optional_rfc3339_timestamp,
    parse_optional_status, parse_rfc3339_timestamp,
};

/// Booking representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    #[schema(format = "uuid")]
    pub id: Uuid,
    #[schema(example = "ANAIS")]
    pub brand: String,
    pub customer_name: String,
    pub customer_email: String,
    /// Offering being booked.
    #[schema(format = "uuid")]
    pub offering_id: Uuid,
    /// Appointment start time, RFC 3339.
    #[schema(format = "date-time")]
    pub scheduled_at: String,
    /// Lifecycle status.
    #[schema(example = "CONFIRMED")]
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Booking> for BookingBody {
    fn from(value: Booking) -> Self {
        Self {
            id: value.id,
            brand: value.brand.to_string(),
            customer_name: value.customer_name,
            customer_email: value.customer_email,
            offering_id: value.offering_id,
            scheduled_at: value.scheduled_at.to_rfc3339(),
            status: value.status.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One page of bookings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPageBody {
    pub items: Vec<BookingBody>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageEnvelope<Booking>> for BookingPageBody {
    fn from(value: PageEnvelope<Booking>) -> Self {
        Self {
            items: value.items.into_iter().map(BookingBody::from).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
        }
    }
}

/// Query parameters accepted by the booking listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub brand: Option<String>,
    /// Lifecycle status filter.
    pub status: Option<String>,
    /// Inclusive lower bound on the appointment time, RFC 3339.
    pub scheduled_from: Option<String>,
    /// Exclusive upper bound on the appointment time, RFC 3339.
    pub scheduled_until: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request payload for creating a booking.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    #[schema(example = "ANAIS")]
    pub brand: String,
    pub customer_name: String,
    pub customer_email: String,
    #[schema(format = "uuid")]
    pub offering_id: Uuid,
    /// Appointment start time, RFC 3339.
    #[schema(format = "date-time")]
    pub scheduled_at: String,
}

/// Request payload for partially updating a booking. Status changes go
/// through the dedicated status endpoint instead.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingBody {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    #[schema(format = "uuid")]
    pub offering_id: Option<Uuid>,
    #[schema(format = "date-time")]
    pub scheduled_at: Option<String>,
}

/// Request payload for a status change.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BookingStatusBody {
    /// Target lifecycle status.
    #[schema(example = "CONFIRMED")]
    pub status: String,
}

/// List bookings visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Page of bookings", body = BookingPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings",
    security(("BearerAuth" = []))
)]
#[get("/bookings")]
pub async fn list_bookings(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<BookingListQuery>,
) -> ApiResult<web::Json<BookingPageBody>> {
    let caller = require_admin(&req, &state).await?;
    let query = query.into_inner();

    let request = ListBookingsRequest {
        brand: parse_optional_brand(query.brand, FieldName::new("brand"))?,
        status: parse_optional_status(query.status, FieldName::new("status"))?,
        scheduled_from: parse_optional_rfc3339_timestamp(
            query.scheduled_from,
            FieldName::new("scheduledFrom"),
        )?,
        scheduled_until: parse_optional_rfc3339_timestamp(
            query.scheduled_until,
            FieldName::new("scheduledUntil"),
        )?,
        page: PageRequest::new(query.page, query.per_page),
    };
    let page = state.bookings.list(&caller, request).await?;
    Ok(web::Json(BookingPageBody::from(page)))
}

/// Fetch one booking by id.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking found", body = BookingBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "getBooking",
    security(("BearerAuth" = []))
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingBody>> {
    let caller = require_admin(&req, &state).await?;
    let booking = state.bookings.get(&caller, id.into_inner()).await?;
    Ok(web::Json(BookingBody::from(booking)))
}

/// Create a booking.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingBody,
    responses(
        (status = 201, description = "Booking created", body = BookingBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking",
    security(("BearerAuth" = []))
)]
#[post("/bookings")]
pub async fn create_booking(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookingBody>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let draft = BookingDraft {
        brand: parse_brand(payload.brand, FieldName::new("brand"))?,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        offering_id: payload.offering_id,
        scheduled_at: parse_rfc3339_timestamp(payload.scheduled_at, FieldName::new("scheduledAt"))?,
    };
    let booking = state.bookings.create(&caller, draft).await?;
    Ok(HttpResponse::Created().json(BookingBody::from(booking)))
}

/// Partially update a booking.
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    request_body = UpdateBookingBody,
    responses(
        (status = 200, description = "Booking updated", body = BookingBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "updateBooking",
    security(("BearerAuth" = []))
)]
#[patch("/bookings/{id}")]
pub async fn update_booking(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateBookingBody>,
) -> ApiResult<web::Json<BookingBody>> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let patch = BookingPatch {
        brand: parse_optional_brand(payload.brand, FieldName::new("brand"))?,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        offering_id: payload.offering_id,
        scheduled_at: parse_optional_rfc3339_timestamp(
            payload.scheduled_at,
            FieldName::new("scheduledAt"),
        )?,
    };
    let booking = state
        .bookings
        .update(&caller, id.into_inner(), patch)
        .await?;
    Ok(web::Json(BookingBody::from(booking)))
}

/// Move a booking to another lifecycle status.
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/status",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    request_body = BookingStatusBody,
    responses(
        (status = 200, description = "Booking status updated", body = BookingBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "patchBookingStatus",
    security(("BearerAuth" = []))
)]
#[patch("/bookings/{id}/status")]
pub async fn patch_booking_status(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<BookingStatusBody>,
) -> ApiResult<web::Json<BookingBody>> {
    let caller = require_admin(&req, &state).await?;
    let booking = state
        .bookings
        .patch_status(&caller, id.into_inner(), &payload.status)
        .await?;
    Ok(web::Json(BookingBody::from(booking)))
}

/// Delete a booking.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "removeBooking",
    security(("BearerAuth" = []))
)]
#[delete("/bookings/{id}")]
pub async fn remove_booking(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    state.bookings.remove(&caller, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
