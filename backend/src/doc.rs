//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every HTTP endpoint from
//! the inbound layer plus the domain error schema wrappers, and the bearer
//! token security scheme. The generated specification is served by Swagger
//! UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::bookings::{
    BookingBody, BookingPageBody, BookingStatusBody, CreateBookingBody, UpdateBookingBody,
};
use crate::inbound::http::offerings::{
    CreateOfferingBody, OfferingBody, OfferingPageBody, UpdateOfferingBody,
};
use crate::inbound::http::orders::{
    CreateOrderBody, OrderBody, OrderLineBody, OrderPageBody, OrderStatusBody, UpdateOrderBody,
};
use crate::inbound::http::products::{
    CreateProductBody, ProductBody, ProductPageBody, UpdateProductBody,
};
use crate::inbound::http::restaurant_orders::{
    CreateRestaurantOrderBody, RestaurantOrderBody, RestaurantOrderPageBody,
    RestaurantOrderStatusBody, UpdateRestaurantOrderBody,
};
use crate::inbound::http::schemas::{BrandSchema, ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Bearer token issued by the identity provider and \
                         introspected on every request.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Brand admin backend API",
        description = "Administration interface for products, services, \
                       bookings and orders across the Anais, Evolve and \
                       Populo brands."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::remove_product,
        crate::inbound::http::offerings::list_offerings,
        crate::inbound::http::offerings::get_offering,
        crate::inbound::http::offerings::create_offering,
        crate::inbound::http::offerings::update_offering,
        crate::inbound::http::offerings::remove_offering,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::update_booking,
        crate::inbound::http::bookings::patch_booking_status,
        crate::inbound::http::bookings::remove_booking,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::patch_order_status,
        crate::inbound::http::orders::remove_order,
        crate::inbound::http::restaurant_orders::list_restaurant_orders,
        crate::inbound::http::restaurant_orders::get_restaurant_order,
        crate::inbound::http::restaurant_orders::create_restaurant_order,
        crate::inbound::http::restaurant_orders::update_restaurant_order,
        crate::inbound::http::restaurant_orders::patch_restaurant_order_status,
        crate::inbound::http::restaurant_orders::remove_restaurant_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BrandSchema,
        ProductBody,
        ProductPageBody,
        CreateProductBody,
        UpdateProductBody,
        OfferingBody,
        OfferingPageBody,
        CreateOfferingBody,
        UpdateOfferingBody,
        BookingBody,
        BookingPageBody,
        CreateBookingBody,
        UpdateBookingBody,
        BookingStatusBody,
        OrderLineBody,
        OrderBody,
        OrderPageBody,
        CreateOrderBody,
        UpdateOrderBody,
        OrderStatusBody,
        RestaurantOrderBody,
        RestaurantOrderPageBody,
        CreateRestaurantOrderBody,
        UpdateRestaurantOrderBody,
        RestaurantOrderStatusBody,
    )),
    tags(
        (name = "products", description = "Retail product administration"),
        (name = "services", description = "Bookable offering administration"),
        (name = "bookings", description = "Appointment booking administration"),
        (name = "orders", description = "Retail order administration"),
        (name = "restaurant-orders", description = "Populo dine-in order administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;

    #[test]
    fn openapi_document_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(
            components.schemas.contains_key("crate.domain.Error"),
            "error schema should be registered under its domain alias"
        );
    }

    #[test]
    fn openapi_document_registers_every_resource_collection() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/products",
            "/api/v1/services",
            "/api/v1/bookings",
            "/api/v1/orders",
            "/api/v1/restaurant-orders",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing collection path {path}"
            );
        }
    }

    #[test]
    fn openapi_document_registers_the_status_endpoints() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/bookings/{id}/status",
            "/api/v1/orders/{id}/status",
            "/api/v1/restaurant-orders/{id}/status",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing status path {path}");
        }
    }
}
