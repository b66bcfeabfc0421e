//! Driving port for retail order administration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AdminContext, Brand, Error, FulfilmentStatus, Order, OrderDraft, OrderPatch, PageEnvelope,
    PageRequest,
};

/// Listing parameters as supplied by the caller. The brand here is a
/// request, not a grant: policy narrows it to the caller's scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrdersRequest {
    /// Requested brand restriction.
    pub brand: Option<Brand>,
    /// Restrict to a single status when present.
    pub status: Option<FulfilmentStatus>,
    /// Inclusive lower bound on the placement time.
    pub placed_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the placement time.
    pub placed_until: Option<DateTime<Utc>>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Driving port for retail order mutations and reads, implemented by the
/// order service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderOperations: Send + Sync {
    /// List orders visible to the caller.
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListOrdersRequest,
    ) -> Result<PageEnvelope<Order>, Error>;

    /// Fetch one order by id.
    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Order, Error>;

    /// Create an order under the draft's brand.
    async fn create(&self, caller: &AdminContext, draft: OrderDraft) -> Result<Order, Error>;

    /// Apply a partial update to an order.
    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: OrderPatch,
    ) -> Result<Order, Error>;

    /// Move an order to a new status. The status arrives as the raw wire
    /// token so unknown values surface as `invalid_request`.
    async fn patch_status(
        &self,
        caller: &AdminContext,
        id: Uuid,
        status: &str,
    ) -> Result<Order, Error>;

    /// Delete an order outright.
    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error>;
}
