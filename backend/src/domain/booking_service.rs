//! Booking domain service.
//!
//! Implements the [`BookingOperations`] driving port. Status changes run
//! through the booking status machine and land as a single conditional
//! write keyed on the previously read status.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::policy::{self, ResourceKind};
use crate::domain::ports::{
    BookingOperations, BookingQuery, BookingRepository, BookingRepositoryError,
    ListBookingsRequest,
};
use crate::domain::{
    AdminContext, BOOKING_MACHINE, Booking, BookingDraft, BookingPatch, BookingStatus, Error,
    PageEnvelope,
};

fn map_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::storage(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::storage(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::ConcurrentUpdate => {
            Error::storage("booking was modified concurrently; retry the status change")
        }
    }
}

/// Booking service over a booking repository.
#[derive(Clone)]
pub struct BookingService<R> {
    repo: Arc<R>,
}

impl<R> BookingService<R> {
    /// Create a new booking service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> BookingService<R>
where
    R: BookingRepository,
{
    async fn fetch(&self, id: &Uuid) -> Result<Booking, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("booking {id} not found")))
    }
}

#[async_trait]
impl<R> BookingOperations for BookingService<R>
where
    R: BookingRepository,
{
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListBookingsRequest,
    ) -> Result<PageEnvelope<Booking>, Error> {
        policy::require_operate(caller, ResourceKind::Bookings)?;
        let brand = policy::resolve_brand_filter(caller, request.brand)?;

        let query = BookingQuery {
            brand,
            status: request.status,
            scheduled_from: request.scheduled_from,
            scheduled_until: request.scheduled_until,
            page: request.page,
        };
        let (items, total) = self.repo.list(&query).await.map_err(map_repository_error)?;
        Ok(PageEnvelope::new(items, total, request.page))
    }

    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Booking, Error> {
        policy::require_operate(caller, ResourceKind::Bookings)?;
        let booking = self.fetch(&id).await?;
        policy::require_brand_access(caller, booking.brand)?;
        Ok(booking)
    }

    async fn create(&self, caller: &AdminContext, draft: BookingDraft) -> Result<Booking, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        policy::require_operate(caller, ResourceKind::Bookings)?;
        policy::require_brand_access(caller, draft.brand)?;

        self.repo.insert(&draft).await.map_err(map_repository_error)
    }

    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: BookingPatch,
    ) -> Result<Booking, Error> {
        policy::require_operate(caller, ResourceKind::Bookings)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;
        if patch.changes_brand(current.brand) && !policy::is_super_admin(caller.role()) {
            return Err(Error::forbidden("brand is immutable for this role"));
        }
        if patch.is_empty() {
            return Err(Error::invalid_request("patch must change at least one field"));
        }
        patch
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.repo
            .update(&id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("booking {id} not found")))
    }

    async fn patch_status(
        &self,
        caller: &AdminContext,
        id: Uuid,
        status: &str,
    ) -> Result<Booking, Error> {
        policy::require_operate(caller, ResourceKind::Bookings)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        let requested: BookingStatus = status
            .parse()
            .map_err(|err: crate::domain::UnknownStatus| Error::invalid_request(err.to_string()))?;
        BOOKING_MACHINE
            .validate_transition(current.status, requested)
            .map_err(|err| {
                Error::illegal_transition(err.to_string()).with_details(json!({
                    "from": err.from.as_str(),
                    "to": err.to.as_str(),
                }))
            })?;
        if requested == current.status {
            // Idempotent re-confirmation: nothing to write.
            return Ok(current);
        }

        self.repo
            .update_status(&id, current.status, requested)
            .await
            .map_err(map_repository_error)
    }

    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error> {
        policy::require_operate(caller, ResourceKind::Bookings)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        let removed = self.repo.delete(&id).await.map_err(map_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!("booking {id} not found")))
        }
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
