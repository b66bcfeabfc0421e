//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminGate, BookingOperations, OfferingOperations, OrderOperations, ProductOperations,
    RestaurantOrderOperations,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Gate turning bearer tokens into authenticated admin contexts.
    pub admin_gate: Arc<dyn AdminGate>,
    /// Product use-cases.
    pub products: Arc<dyn ProductOperations>,
    /// Offering use-cases.
    pub offerings: Arc<dyn OfferingOperations>,
    /// Booking use-cases.
    pub bookings: Arc<dyn BookingOperations>,
    /// Retail order use-cases.
    pub orders: Arc<dyn OrderOperations>,
    /// Restaurant order use-cases.
    pub restaurant_orders: Arc<dyn RestaurantOrderOperations>,
}

impl HttpState {
    /// Construct state from one implementation per port.
    pub fn new(
        admin_gate: Arc<dyn AdminGate>,
        products: Arc<dyn ProductOperations>,
        offerings: Arc<dyn OfferingOperations>,
        bookings: Arc<dyn BookingOperations>,
        orders: Arc<dyn OrderOperations>,
        restaurant_orders: Arc<dyn RestaurantOrderOperations>,
    ) -> Self {
        Self {
            admin_gate,
            products,
            offerings,
            bookings,
            orders,
            restaurant_orders,
        }
    }
}

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::domain::ports::{
        MockBookingOperations, MockOfferingOperations, MockOrderOperations,
        MockProductOperations, MockRestaurantOrderOperations,
    };

    impl HttpState {
        /// State whose resource ports panic on use; swap in mocks per test.
        pub fn for_tests(admin_gate: Arc<dyn AdminGate>) -> Self {
            Self {
                admin_gate,
                products: Arc::new(MockProductOperations::new()),
                offerings: Arc::new(MockOfferingOperations::new()),
                bookings: Arc::new(MockBookingOperations::new()),
                orders: Arc::new(MockOrderOperations::new()),
                restaurant_orders: Arc::new(MockRestaurantOrderOperations::new()),
            }
        }
    }
}
