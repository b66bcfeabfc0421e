//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{DEFAULT_IDENTITY_TIMEOUT, IdentityProviderConfig, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::bookings::{
    create_booking, get_booking, list_bookings, patch_booking_status, remove_booking,
    update_booking,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::offerings::{
    create_offering, get_offering, list_offerings, remove_offering, update_offering,
};
use crate::inbound::http::orders::{
    create_order, get_order, list_orders, patch_order_status, remove_order, update_order,
};
use crate::inbound::http::products::{
    create_product, get_product, list_products, remove_product, update_product,
};
use crate::inbound::http::restaurant_orders::{
    create_restaurant_order, get_restaurant_order, list_restaurant_orders,
    patch_restaurant_order_status, remove_restaurant_order, update_restaurant_order,
};
use crate::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(remove_product)
        .service(list_offerings)
        .service(get_offering)
        .service(create_offering)
        .service(update_offering)
        .service(remove_offering)
        .service(list_bookings)
        .service(get_booking)
        .service(create_booking)
        .service(update_booking)
        .service(patch_booking_status)
        .service(remove_booking)
        .service(list_orders)
        .service(get_order)
        .service(create_order)
        .service(update_order)
        .service(patch_order_status)
        .service(remove_order)
        .service(list_restaurant_orders)
        .service(get_restaurant_order)
        .service(create_restaurant_order)
        .service(update_restaurant_order)
        .service(patch_restaurant_order_status)
        .service(remove_restaurant_order);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with the bind address and optional adapters.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the identity verifier cannot be built or
/// when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
