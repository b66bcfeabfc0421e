//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_gate;
mod admin_profile_repository;
mod booking_operations;
mod booking_repository;
mod identity_verifier;
mod offering_operations;
mod offering_repository;
mod order_operations;
mod order_repository;
mod product_operations;
mod product_repository;
mod restaurant_order_operations;
mod restaurant_order_repository;

#[cfg(test)]
pub use admin_gate::MockAdminGate;
pub use admin_gate::{AdminGate, FixtureAdminGate};
#[cfg(test)]
pub use admin_profile_repository::MockAdminProfileRepository;
pub use admin_profile_repository::{
    AdminProfileRepository, AdminProfileRepositoryError, FixtureAdminProfileRepository,
};
#[cfg(test)]
pub use booking_operations::MockBookingOperations;
pub use booking_operations::{BookingOperations, ListBookingsRequest};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{
    BookingQuery, BookingRepository, BookingRepositoryError, FixtureBookingRepository,
};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{FixtureIdentityVerifier, IdentityVerifier, IdentityVerifierError};
#[cfg(test)]
pub use offering_operations::MockOfferingOperations;
pub use offering_operations::{ListOfferingsRequest, OfferingOperations};
#[cfg(test)]
pub use offering_repository::MockOfferingRepository;
pub use offering_repository::{
    FixtureOfferingRepository, OfferingQuery, OfferingRepository, OfferingRepositoryError,
};
#[cfg(test)]
pub use order_operations::MockOrderOperations;
pub use order_operations::{ListOrdersRequest, OrderOperations};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{
    FixtureOrderRepository, OrderQuery, OrderRepository, OrderRepositoryError,
};
#[cfg(test)]
pub use product_operations::MockProductOperations;
pub use product_operations::{ListProductsRequest, ProductOperations};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    FixtureProductRepository, ProductQuery, ProductRepository, ProductRepositoryError,
};
#[cfg(test)]
pub use restaurant_order_operations::MockRestaurantOrderOperations;
pub use restaurant_order_operations::{ListRestaurantOrdersRequest, RestaurantOrderOperations};
#[cfg(test)]
pub use restaurant_order_repository::MockRestaurantOrderRepository;
pub use restaurant_order_repository::{
    FixtureRestaurantOrderRepository, RestaurantOrderQuery, RestaurantOrderRepository,
    RestaurantOrderRepositoryError,
};
