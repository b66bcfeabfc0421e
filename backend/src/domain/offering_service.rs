//! Offering domain service.
//!
//! Implements the [`OfferingOperations`] driving port. Mirrors the product
//! service: offerings are soft-deleted via the `active` flag.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::policy::{self, ResourceKind};
use crate::domain::ports::{
    ListOfferingsRequest, OfferingOperations, OfferingQuery, OfferingRepository,
    OfferingRepositoryError,
};
use crate::domain::{
    AdminContext, Error, Offering, OfferingDraft, OfferingPatch, PageEnvelope,
};

fn map_repository_error(error: OfferingRepositoryError) -> Error {
    match error {
        OfferingRepositoryError::Connection { message } => {
            Error::storage(format!("offering repository unavailable: {message}"))
        }
        OfferingRepositoryError::Query { message } => {
            Error::storage(format!("offering repository error: {message}"))
        }
    }
}

/// Offering service over an offering repository.
#[derive(Clone)]
pub struct OfferingService<R> {
    repo: Arc<R>,
}

impl<R> OfferingService<R> {
    /// Create a new offering service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> OfferingService<R>
where
    R: OfferingRepository,
{
    async fn fetch(&self, id: &Uuid) -> Result<Offering, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("offering {id} not found")))
    }
}

#[async_trait]
impl<R> OfferingOperations for OfferingService<R>
where
    R: OfferingRepository,
{
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListOfferingsRequest,
    ) -> Result<PageEnvelope<Offering>, Error> {
        policy::require_operate(caller, ResourceKind::Offerings)?;
        let brand = policy::resolve_brand_filter(caller, request.brand)?;

        let query = OfferingQuery {
            brand,
            active: request.active,
            page: request.page,
        };
        let (items, total) = self.repo.list(&query).await.map_err(map_repository_error)?;
        Ok(PageEnvelope::new(items, total, request.page))
    }

    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Offering, Error> {
        policy::require_operate(caller, ResourceKind::Offerings)?;
        let offering = self.fetch(&id).await?;
        policy::require_brand_access(caller, offering.brand)?;
        Ok(offering)
    }

    async fn create(
        &self,
        caller: &AdminContext,
        draft: OfferingDraft,
    ) -> Result<Offering, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        policy::require_operate(caller, ResourceKind::Offerings)?;
        policy::require_brand_access(caller, draft.brand)?;

        self.repo.insert(&draft).await.map_err(map_repository_error)
    }

    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: OfferingPatch,
    ) -> Result<Offering, Error> {
        policy::require_operate(caller, ResourceKind::Offerings)?;
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
            .ok_or_else(|| Error::not_found(format!("offering {id} not found")))
    }

    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error> {
        policy::require_operate(caller, ResourceKind::Offerings)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        // Soft delete: existing bookings keep a resolvable offering.
        let patch = OfferingPatch {
            active: Some(false),
            ..OfferingPatch::default()
        };
        self.repo
            .update(&id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("offering {id} not found")))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "offering_service_tests.rs"]
mod tests;
