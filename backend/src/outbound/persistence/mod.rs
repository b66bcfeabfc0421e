//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel models and
//! domain types; no business logic lives here. Connections come from a
//! `bb8` pool with async support through `diesel-async`, and all database
//! errors are mapped to the domain's repository error types.

mod diesel_admin_profile_repository;
mod diesel_booking_repository;
mod diesel_error_mapping;
mod diesel_offering_repository;
mod diesel_order_repository;
mod diesel_product_repository;
mod diesel_restaurant_order_repository;
mod models;
mod pool;
mod schema;

pub use diesel_admin_profile_repository::DieselAdminProfileRepository;
pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_offering_repository::DieselOfferingRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_restaurant_order_repository::DieselRestaurantOrderRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
