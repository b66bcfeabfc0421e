//! Driving port for restaurant order administration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AdminContext, Brand, Error, FulfilmentStatus, PageEnvelope, PageRequest, RestaurantOrder,
    RestaurantOrderDraft, RestaurantOrderPatch,
};

/// Listing parameters as supplied by the caller. The brand here is a
/// request, not a grant: policy narrows it to the caller's scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRestaurantOrdersRequest {
    /// Requested brand restriction.
    pub brand: Option<Brand>,
    /// Restrict to a single status when present.
    pub status: Option<FulfilmentStatus>,
    /// Restrict to a single table when present.
    pub table_number: Option<i32>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Driving port for restaurant order mutations and reads, implemented by
/// the restaurant order service. The only resource Populo floor staff may
/// operate on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantOrderOperations: Send + Sync {
    /// List restaurant orders visible to the caller.
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListRestaurantOrdersRequest,
    ) -> Result<PageEnvelope<RestaurantOrder>, Error>;

    /// Fetch one restaurant order by id.
    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<RestaurantOrder, Error>;

    /// Create a restaurant order; the draft must carry the Populo brand.
    async fn create(
        &self,
        caller: &AdminContext,
        draft: RestaurantOrderDraft,
    ) -> Result<RestaurantOrder, Error>;

    /// Apply a partial update to a restaurant order.
    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: RestaurantOrderPatch,
    ) -> Result<RestaurantOrder, Error>;

    /// Move a restaurant order along the kitchen workflow. The status
    /// arrives as the raw wire token so unknown values surface as
    /// `invalid_request`; transitions outside the workflow table surface
    /// as `illegal_transition`.
    async fn patch_status(
        &self,
        caller: &AdminContext,
        id: Uuid,
        status: &str,
    ) -> Result<RestaurantOrder, Error>;

    /// Delete a restaurant order outright.
    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error>;
}
