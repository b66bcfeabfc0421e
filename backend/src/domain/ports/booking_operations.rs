//! Driving port for booking administration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AdminContext, Booking, BookingDraft, BookingPatch, BookingStatus, Brand, Error, PageEnvelope,
    PageRequest,
};

/// Listing parameters as supplied by the caller. The brand here is a
/// request, not a grant: policy narrows it to the caller's scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBookingsRequest {
    /// Requested brand restriction.
    pub brand: Option<Brand>,
    /// Restrict to a single status when present.
    pub status: Option<BookingStatus>,
    /// Inclusive lower bound on the appointment time.
    pub scheduled_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the appointment time.
    pub scheduled_until: Option<DateTime<Utc>>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Driving port for booking mutations and reads, implemented by the booking
/// service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingOperations: Send + Sync {
    /// List bookings visible to the caller.
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListBookingsRequest,
    ) -> Result<PageEnvelope<Booking>, Error>;

    /// Fetch one booking by id.
    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Booking, Error>;

    /// Create a booking under the draft's brand.
    async fn create(&self, caller: &AdminContext, draft: BookingDraft) -> Result<Booking, Error>;

    /// Apply a partial update to a booking.
    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: BookingPatch,
    ) -> Result<Booking, Error>;

    /// Move a booking to a new status. The status arrives as the raw wire
    /// token so unknown values surface as `invalid_request`.
    async fn patch_status(
        &self,
        caller: &AdminContext,
        id: Uuid,
        status: &str,
    ) -> Result<Booking, Error>;

    /// Delete a booking outright.
    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error>;
}
