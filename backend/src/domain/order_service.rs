//! Retail order domain service.
//!
//! Implements the [`OrderOperations`] driving port. The retail fulfilment
//! machine validates membership only; the strict transition table belongs to
//! the restaurant workflow.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::policy::{self, ResourceKind};
use crate::domain::ports::{
    ListOrdersRequest, OrderOperations, OrderQuery, OrderRepository, OrderRepositoryError,
};
use crate::domain::{
    AdminContext, Error, FulfilmentStatus, ORDER_MACHINE, Order, OrderDraft, OrderPatch,
    PageEnvelope,
};

fn map_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::storage(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::storage(format!("order repository error: {message}"))
        }
        OrderRepositoryError::ConcurrentUpdate => {
            Error::storage("order was modified concurrently; retry the status change")
        }
    }
}

/// Order service over an order repository.
#[derive(Clone)]
pub struct OrderService<R> {
    repo: Arc<R>,
}

impl<R> OrderService<R> {
    /// Create a new order service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> OrderService<R>
where
    R: OrderRepository,
{
    async fn fetch(&self, id: &Uuid) -> Result<Order, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {id} not found")))
    }
}

#[async_trait]
impl<R> OrderOperations for OrderService<R>
where
    R: OrderRepository,
{
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListOrdersRequest,
    ) -> Result<PageEnvelope<Order>, Error> {
        policy::require_operate(caller, ResourceKind::Orders)?;
        let brand = policy::resolve_brand_filter(caller, request.brand)?;

        let query = OrderQuery {
            brand,
            status: request.status,
            placed_from: request.placed_from,
            placed_until: request.placed_until,
            page: request.page,
        };
        let (items, total) = self.repo.list(&query).await.map_err(map_repository_error)?;
        Ok(PageEnvelope::new(items, total, request.page))
    }

    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<Order, Error> {
        policy::require_operate(caller, ResourceKind::Orders)?;
        let order = self.fetch(&id).await?;
        policy::require_brand_access(caller, order.brand)?;
        Ok(order)
    }

    async fn create(&self, caller: &AdminContext, draft: OrderDraft) -> Result<Order, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        policy::require_operate(caller, ResourceKind::Orders)?;
        policy::require_brand_access(caller, draft.brand)?;

        self.repo.insert(&draft).await.map_err(map_repository_error)
    }

    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: OrderPatch,
    ) -> Result<Order, Error> {
        policy::require_operate(caller, ResourceKind::Orders)?;
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
            .ok_or_else(|| Error::not_found(format!("order {id} not found")))
    }

    async fn patch_status(
        &self,
        caller: &AdminContext,
        id: Uuid,
        status: &str,
    ) -> Result<Order, Error> {
        policy::require_operate(caller, ResourceKind::Orders)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        let requested: FulfilmentStatus = status
            .parse()
            .map_err(|err: crate::domain::UnknownStatus| Error::invalid_request(err.to_string()))?;
        ORDER_MACHINE
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
        policy::require_operate(caller, ResourceKind::Orders)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        let removed = self.repo.delete(&id).await.map_err(map_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!("order {id} not found")))
        }
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
