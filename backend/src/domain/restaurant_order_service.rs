//! Restaurant order domain service.
//!
//! Implements the [`RestaurantOrderOperations`] driving port. This is the
//! one resource Populo floor staff may operate on, and the one whose status
//! machine enforces a full kitchen transition table.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::policy::{self, ResourceKind};
use crate::domain::ports::{
    ListRestaurantOrdersRequest, RestaurantOrderOperations, RestaurantOrderQuery,
    RestaurantOrderRepository, RestaurantOrderRepositoryError,
};
use crate::domain::{
    AdminContext, Error, FulfilmentStatus, PageEnvelope, RESTAURANT_ORDER_MACHINE,
    RestaurantOrder, RestaurantOrderDraft, RestaurantOrderPatch,
};

fn map_repository_error(error: RestaurantOrderRepositoryError) -> Error {
    match error {
        RestaurantOrderRepositoryError::Connection { message } => {
            Error::storage(format!("restaurant order repository unavailable: {message}"))
        }
        RestaurantOrderRepositoryError::Query { message } => {
            Error::storage(format!("restaurant order repository error: {message}"))
        }
        RestaurantOrderRepositoryError::ConcurrentUpdate => {
            Error::storage("restaurant order was modified concurrently; retry the status change")
        }
    }
}

/// Restaurant order service over a restaurant order repository.
#[derive(Clone)]
pub struct RestaurantOrderService<R> {
    repo: Arc<R>,
}

impl<R> RestaurantOrderService<R> {
    /// Create a new restaurant order service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> RestaurantOrderService<R>
where
    R: RestaurantOrderRepository,
{
    async fn fetch(&self, id: &Uuid) -> Result<RestaurantOrder, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("restaurant order {id} not found")))
    }
}

#[async_trait]
impl<R> RestaurantOrderOperations for RestaurantOrderService<R>
where
    R: RestaurantOrderRepository,
{
    async fn list(
        &self,
        caller: &AdminContext,
        request: ListRestaurantOrdersRequest,
    ) -> Result<PageEnvelope<RestaurantOrder>, Error> {
        policy::require_operate(caller, ResourceKind::RestaurantOrders)?;
        let brand = policy::resolve_brand_filter(caller, request.brand)?;

        let query = RestaurantOrderQuery {
            brand,
            status: request.status,
            table_number: request.table_number,
            page: request.page,
        };
        let (items, total) = self.repo.list(&query).await.map_err(map_repository_error)?;
        Ok(PageEnvelope::new(items, total, request.page))
    }

    async fn get(&self, caller: &AdminContext, id: Uuid) -> Result<RestaurantOrder, Error> {
        policy::require_operate(caller, ResourceKind::RestaurantOrders)?;
        let order = self.fetch(&id).await?;
        policy::require_brand_access(caller, order.brand)?;
        Ok(order)
    }

    async fn create(
        &self,
        caller: &AdminContext,
        draft: RestaurantOrderDraft,
    ) -> Result<RestaurantOrder, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        policy::require_operate(caller, ResourceKind::RestaurantOrders)?;
        policy::require_brand_access(caller, draft.brand)?;

        self.repo.insert(&draft).await.map_err(map_repository_error)
    }

    async fn update(
        &self,
        caller: &AdminContext,
        id: Uuid,
        patch: RestaurantOrderPatch,
    ) -> Result<RestaurantOrder, Error> {
        policy::require_operate(caller, ResourceKind::RestaurantOrders)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;
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
            .ok_or_else(|| Error::not_found(format!("restaurant order {id} not found")))
    }

    async fn patch_status(
        &self,
        caller: &AdminContext,
        id: Uuid,
        status: &str,
    ) -> Result<RestaurantOrder, Error> {
        policy::require_operate(caller, ResourceKind::RestaurantOrders)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        let requested: FulfilmentStatus = status
            .parse()
            .map_err(|err: crate::domain::UnknownStatus| Error::invalid_request(err.to_string()))?;
        RESTAURANT_ORDER_MACHINE
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
        policy::require_operate(caller, ResourceKind::RestaurantOrders)?;
        let current = self.fetch(&id).await?;
        policy::require_brand_access(caller, current.brand)?;

        let removed = self.repo.delete(&id).await.map_err(map_repository_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!("restaurant order {id} not found")))
        }
    }
}

#[cfg(test)]
#[path = "restaurant_order_service_tests.rs"]
mod tests;
