//! Driving port for offering administration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AdminContext, Brand, Error, Offering, OfferingDraft, OfferingPatch, PageEnvelope, PageRequest,
};

/// Listing parameters as supplied by the caller. The brand here is a
/// request, not a grant: policy narrows it to the caller's scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfferingsRequest {
    /// Requested brand restriction.
    pub brand: Option<Brand>,
    /// Restrict to a single active state when present.
    pub active: Option<bool>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Driving port for offering mutations and reads, implemented by the
/// offering service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferingOperations: Send + Sync {
    /// List offerings visible to the caller.
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListOfferingsRequest,
    ) -> Result<PageEnvelope<Offering>, Error>;

    /// Fetch one offering by id.
    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Offering, Error>;

    /// Create an offering under the draft's brand.
    async fn create(&self, caller: &AdminContext, draft: OfferingDraft)
        -> Result<Offering, Error>;

    /// Apply a partial update to an offering.
    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: OfferingPatch,
    ) -> Result<Offering, Error>;

    /// Soft-delete an offering by clearing its active flag.
    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error>;
}
