//! Product domain service.
//!
//! Implements the [`ProductOperations`] driving port: payload validation
//! first, role and brand policy next, persistence last. A rejected caller
//! never reaches the repository.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::policy::{self, ResourceKind};
use crate::domain::ports::{
    ListProductsRequest, ProductOperations, ProductQuery, ProductRepository,
    ProductRepositoryError,
};
use crate::domain::{
    AdminContext, Error, PageEnvelope, Product, ProductDraft, ProductPatch,
};

fn map_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::storage(format!("product repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::storage(format!("product repository error: {message}"))
        }
    }
}

/// Product service over a product repository.
#[derive(Clone)]
pub struct ProductService<R> {
    repo: Arc<R>,
}

impl<R> ProductService<R> {
    /// Create a new product service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    async fn fetch(&self, id: &Uuid) -> Result<Product, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {id} not found")))
    }
}

#[async_trait]
impl<R> ProductOperations for ProductService<R>
where
    R: ProductRepository,
{
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListProductsRequest,
    ) -> Result<PageEnvelope<Product>, Error> {
        policy::require_operate(caller, ResourceKind::Products)?;
        let brand = policy::resolve_brand_filter(caller, request.brand)?;

        let query = ProductQuery {
            brand,
            available: request.available,
            page: request.page,
        };
        let (items, total) = self.repo.list(&query).await.map_err(map_repository_error)?;
        Ok(PageEnvelope::new(items, total, request.page))
    }

    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Product, Error> {
        policy::require_operate(caller, ResourceKind::Products)?;
        let product = self.fetch(&id).await?;
        policy::require_brand_access(caller, product.brand)?;
        Ok(product)
    }

    async fn create(&self, caller: &AdminContext, draft: ProductDraft) -> Result<Product, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        policy::require_operate(caller, ResourceKind::Products)?;
        policy::require_brand_access(caller, draft.brand)?;

        self.repo.insert(&draft).await.map_err(map_repository_error)
    }

    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, Error> {
        policy::require_operate(caller, ResourceKind::Products)?;
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
            .ok_or_else(|| Error::not_found(format!("product {id} not found")))
    }

    async fn remove(&self, caller: &AdminContext, id: Uuid) -> Result<(), Error> {
        policy::require_operate(caller, ResourceKind::Products)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        // Soft delete: the row stays for order history, hidden from sale.
        let patch = ProductPatch {
            available: Some(false),
            ..ProductPatch::default()
        };
        self.repo
            .update(&id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {id} not found")))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
