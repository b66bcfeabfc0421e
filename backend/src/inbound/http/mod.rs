//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod health;
pub mod offerings;
pub mod orders;
pub mod products;
pub mod restaurant_orders;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
