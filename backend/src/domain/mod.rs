//! Domain layer: entities, policy, status machines, and the services that
//! orchestrate admin mutations behind the ports.

mod access_service;
mod admin;
mod booking;
mod booking_service;
mod brand;
mod error;
mod offering;
mod offering_service;
mod order;
mod order_service;
pub mod policy;
mod page;
pub mod ports;
mod product;
mod product_service;
mod restaurant_order;
mod restaurant_order_service;
mod role;
mod status;
#[cfg(test)]
pub(crate) mod test_support;
mod trace_id;

pub use access_service::AccessService;
pub use admin::{AdminContext, AdminProfile, VerifiedIdentity};
pub use booking::{Booking, BookingDraft, BookingPatch, BookingValidationError};
pub use booking_service::BookingService;
pub use brand::{Brand, BrandFilter, UnknownBrand};
pub use error::{Error, ErrorCode};
pub use offering::{
    MAX_DURATION_MINUTES, Offering, OfferingDraft, OfferingPatch, OfferingValidationError,
};
pub use offering_service::OfferingService;
pub use order::{Order, OrderDraft, OrderLine, OrderPatch, OrderValidationError};
pub use order_service::OrderService;
pub use page::{DEFAULT_PER_PAGE, MAX_PER_PAGE, PageEnvelope, PageRequest};
pub use policy::ResourceKind;
pub use product::{Product, ProductDraft, ProductPatch, ProductValidationError};
pub use product_service::ProductService;
pub use restaurant_order::{
    RestaurantOrder, RestaurantOrderDraft, RestaurantOrderPatch, RestaurantOrderValidationError,
};
pub use restaurant_order_service::RestaurantOrderService;
pub use role::{AdminRole, BrandScope, RoleCode};
pub use status::{
    BOOKING_MACHINE, BookingStatus, FulfilmentStatus, IllegalTransition, ORDER_MACHINE,
    RESTAURANT_ORDER_MACHINE, StatusMachine, TransitionRules, UnknownStatus,
};
pub use trace_id::{TRACE_ID_HEADER, TraceId};
