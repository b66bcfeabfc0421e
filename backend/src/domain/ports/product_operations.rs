//! Driving port for product administration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AdminContext, Brand, Error, PageEnvelope, PageRequest, Product, ProductDraft, ProductPatch,
};

/// Listing parameters as supplied by the caller. The brand here is a
/// request, not a grant: policy narrows it to the caller's scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProductsRequest {
    /// Requested brand restriction.
    pub brand: Option<Brand>,
    /// Restrict to a single availability state when present.
    pub available: Option<bool>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Driving port for product mutations and reads, implemented by the product
/// service. Every operation takes the authenticated caller and enforces
/// policy before touching persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductOperations: Send + Sync {
    /// List products visible to the caller.
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListProductsRequest,
    ) -> Result<PageEnvelope<Product>, Error>;

    /// Fetch one product by id.
    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Product, Error>;

    /// Create a product under the draft's brand.
    async fn create(&self, caller: &AdminContext, draft: ProductDraft) -> Result<Product, Error>;

    /// Apply a partial update to a product.
    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, Error>;

    /// Soft-delete a product by clearing its availability.
    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error>;
}
