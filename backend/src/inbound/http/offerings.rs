//! Bookable offering HTTP handlers (mounted under `/services` to match the
//! customer-facing vocabulary).

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::ListOfferingsRequest;
use crate::domain::{Offering, OfferingDraft, OfferingPatch, PageEnvelope, PageRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_brand, parse_optional_brand};

/// Offering representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferingBody {
    #[schema(format = "uuid")]
    pub id: Uuid,
    #[schema(example = "EVOLVE")]
    pub brand: String,
    pub name: String,
    /// Slot length in minutes.
    pub duration_minutes: i32,
    pub price_cents: i64,
    /// Whether the offering can currently be booked.
    pub active: bool,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Offering> for OfferingBody {
    fn from(value: Offering) -> Self {
        Self {
            id: value.id,
            brand: value.brand.to_string(),
            name: value.name,
            duration_minutes: value.duration_minutes,
            price_cents: value.price_cents,
            active: value.active,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// One page of offerings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferingPageBody {
    pub items: Vec<OfferingBody>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageEnvelope<Offering>> for OfferingPageBody {
    fn from(value: PageEnvelope<Offering>) -> Self {
        Self {
            items: value.items.into_iter().map(OfferingBody::from).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
        }
    }
}

/// Query parameters accepted by the offering listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OfferingListQuery {
    pub brand: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request payload for creating an offering.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferingBody {
    #[schema(example = "EVOLVE")]
    pub brand: String,
    pub name: String,
    /// Slot length in minutes, between 1 and 480.
    pub duration_minutes: i32,
    pub price_cents: i64,
}

/// Request payload for partially updating an offering.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferingBody {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<String>,
    pub name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
}

/// List offerings visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/services",
    params(OfferingListQuery),
    responses(
        (status = 200, description = "Page of offerings", body = OfferingPageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "listServices",
    security(("BearerAuth" = []))
)]
#[get("/services")]
pub async fn list_offerings(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<OfferingListQuery>,
) -> ApiResult<web::Json<OfferingPageBody>> {
    let caller = require_admin(&req, &state).await?;
    let query = query.into_inner();

    let request = ListOfferingsRequest {
        brand: parse_optional_brand(query.brand, FieldName::new("brand"))?,
        active: query.active,
        page: PageRequest::new(query.page, query.per_page),
    };
    let page = state.offerings.list(&caller, request).await?;
    Ok(web::Json(OfferingPageBody::from(page)))
}

/// Fetch one offering by id.
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    params(("id" = Uuid, Path, description = "Offering identifier")),
    responses(
        (status = 200, description = "Offering found", body = OfferingBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "getService",
    security(("BearerAuth" = []))
)]
#[get("/services/{id}")]
pub async fn get_offering(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<OfferingBody>> {
    let caller = require_admin(&req, &state).await?;
    let offering = state.offerings.get(&caller, id.into_inner()).await?;
    Ok(web::Json(OfferingBody::from(offering)))
}

/// Create an offering.
#[utoipa::path(
    post,
    path = "/api/v1/services",
    request_body = CreateOfferingBody,
    responses(
        (status = 201, description = "Offering created", body = OfferingBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "createService",
    security(("BearerAuth" = []))
)]
#[post("/services")]
pub async fn create_offering(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CreateOfferingBody>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let draft = OfferingDraft {
        brand: parse_brand(payload.brand, FieldName::new("brand"))?,
        name: payload.name,
        duration_minutes: payload.duration_minutes,
        price_cents: payload.price_cents,
    };
    let offering = state.offerings.create(&caller, draft).await?;
    Ok(HttpResponse::Created().json(OfferingBody::from(offering)))
}

/// Partially update an offering.
#[utoipa::path(
    patch,
    path = "/api/v1/services/{id}",
    params(("id" = Uuid, Path, description = "Offering identifier")),
    request_body = UpdateOfferingBody,
    responses(
        (status = 200, description = "Offering updated", body = OfferingBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "updateService",
    security(("BearerAuth" = []))
)]
#[patch("/services/{id}")]
pub async fn update_offering(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateOfferingBody>,
) -> ApiResult<web::Json<OfferingBody>> {
    let caller = require_admin(&req, &state).await?;
    let payload = payload.into_inner();

    let patch = OfferingPatch {
        brand: parse_optional_brand(payload.brand, FieldName::new("brand"))?,
        name: payload.name,
        duration_minutes: payload.duration_minutes,
        price_cents: payload.price_cents,
        active: payload.active,
    };
    let offering = state
        .offerings
        .update(&caller, id.into_inner(), patch)
        .await?;
    Ok(web::Json(OfferingBody::from(offering)))
}

/// Soft-delete an offering.
#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    params(("id" = Uuid, Path, description = "Offering identifier")),
    responses(
        (status = 204, description = "Offering deactivated"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "removeService",
    security(("BearerAuth" = []))
)]
#[delete("/services/{id}")]
pub async fn remove_offering(
    req: HttpRequest,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = require_admin(&req, &state).await?;
    state.offerings.remove(&caller, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
