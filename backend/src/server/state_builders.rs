//! Builders for HTTP state ports.
//!
//! Real adapters are used when the matching configuration is present;
//! otherwise fixtures keep the server bootable for tests and local
//! development.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    AdminGate, FixtureAdminGate, FixtureAdminProfileRepository, FixtureBookingRepository,
    FixtureIdentityVerifier, FixtureOfferingRepository, FixtureOrderRepository,
    FixtureProductRepository, FixtureRestaurantOrderRepository,
};
use crate::domain::{
    AccessService, BookingService, OfferingService, OrderService, ProductService,
    RestaurantOrderService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::HttpIdentityVerifier;
use crate::outbound::persistence::{
    DbPool, DieselAdminProfileRepository, DieselBookingRepository, DieselOfferingRepository,
    DieselOrderRepository, DieselProductRepository, DieselRestaurantOrderRepository,
};

use super::ServerConfig;

fn build_verifier(
    config: &ServerConfig,
) -> std::io::Result<Option<HttpIdentityVerifier>> {
    config
        .identity_provider
        .as_ref()
        .map(|idp| {
            HttpIdentityVerifier::new(idp.base_url.clone(), idp.timeout)
                .map_err(|err| std::io::Error::other(format!("identity verifier setup: {err}")))
        })
        .transpose()
}

/// Build the admin gate from the configured identity provider and profile
/// store. Missing pieces fall back to fixtures so that the remaining real
/// adapters can still be exercised.
fn build_admin_gate(config: &ServerConfig) -> std::io::Result<Arc<dyn AdminGate>> {
    let verifier = build_verifier(config)?;
    Ok(match (verifier, &config.db_pool) {
        (Some(verifier), Some(pool)) => Arc::new(AccessService::new(
            Arc::new(verifier),
            Arc::new(DieselAdminProfileRepository::new(pool.clone())),
        )),
        (Some(verifier), None) => Arc::new(AccessService::new(
            Arc::new(verifier),
            Arc::new(FixtureAdminProfileRepository),
        )),
        (None, Some(pool)) => Arc::new(AccessService::new(
            Arc::new(FixtureIdentityVerifier),
            Arc::new(DieselAdminProfileRepository::new(pool.clone())),
        )),
        (None, None) => Arc::new(FixtureAdminGate),
    })
}

fn build_resource_ports(pool: Option<&DbPool>) -> HttpStateResourcePorts {
    match pool {
        Some(pool) => HttpStateResourcePorts {
            products: Arc::new(ProductService::new(Arc::new(DieselProductRepository::new(
                pool.clone(),
            )))),
            offerings: Arc::new(OfferingService::new(Arc::new(
                DieselOfferingRepository::new(pool.clone()),
            ))),
            bookings: Arc::new(BookingService::new(Arc::new(DieselBookingRepository::new(
                pool.clone(),
            )))),
            orders: Arc::new(OrderService::new(Arc::new(DieselOrderRepository::new(
                pool.clone(),
            )))),
            restaurant_orders: Arc::new(RestaurantOrderService::new(Arc::new(
                DieselRestaurantOrderRepository::new(pool.clone()),
            ))),
        },
        None => HttpStateResourcePorts {
            products: Arc::new(ProductService::new(Arc::new(FixtureProductRepository))),
            offerings: Arc::new(OfferingService::new(Arc::new(FixtureOfferingRepository))),
            bookings: Arc::new(BookingService::new(Arc::new(FixtureBookingRepository))),
            orders: Arc::new(OrderService::new(Arc::new(FixtureOrderRepository))),
            restaurant_orders: Arc::new(RestaurantOrderService::new(Arc::new(
                FixtureRestaurantOrderRepository,
            ))),
        },
    }
}

struct HttpStateResourcePorts {
    products: Arc<dyn crate::domain::ports::ProductOperations>,
    offerings: Arc<dyn crate::domain::ports::OfferingOperations>,
    bookings: Arc<dyn crate::domain::ports::BookingOperations>,
    orders: Arc<dyn crate::domain::ports::OrderOperations>,
    restaurant_orders: Arc<dyn crate::domain::ports::RestaurantOrderOperations>,
}

/// Assemble the HTTP handler state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let admin_gate = build_admin_gate(config)?;
    let ports = build_resource_ports(config.db_pool.as_ref());
    Ok(web::Data::new(HttpState::new(
        admin_gate,
        ports.products,
        ports.offerings,
        ports.bookings,
        ports.orders,
        ports.restaurant_orders,
    )))
}
