//! Port for retail order persistence, including the conditional status write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{BrandFilter, FulfilmentStatus, Order, OrderDraft, OrderPatch, PageRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
        /// Conditional status write matched no row: another caller moved the
        /// order first.
        ConcurrentUpdate =>
            "order status changed concurrently",
    }
}

/// Listing filter for orders. The brand filter arrives already narrowed by
/// policy; the adapter applies it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    /// Brand scope to list within.
    pub brand: BrandFilter,
    /// Restrict to a single status when present.
    pub status: Option<FulfilmentStatus>,
    /// Inclusive lower bound on the placement time.
    pub placed_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the placement time.
    pub placed_until: Option<DateTime<Utc>>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Port for reading and writing retail orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List one page of orders plus the unpaged total count.
    async fn list(&self, query: &OrderQuery) -> Result<(Vec<Order>, i64), OrderRepositoryError>;

    /// Find an order by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, OrderRepositoryError>;

    /// Insert a new order and return the stored row.
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError>;

    /// Apply a patch to an order. Returns `None` when no row matches.
    async fn update(
        &self,
        id: &Uuid,
        patch: &OrderPatch,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Move an order from `from` to `to` in one conditional write. Fails
    /// with `ConcurrentUpdate` when the row is no longer at `from`.
    async fn update_status(
        &self,
        id: &Uuid,
        from: FulfilmentStatus,
        to: FulfilmentStatus,
    ) -> Result<Order, OrderRepositoryError>;

    /// Delete an order. Returns whether a row was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, OrderRepositoryError>;
}

/// Fixture implementation for tests that do not exercise order persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn list(&self, _query: &OrderQuery) -> Result<(Vec<Order>, i64), OrderRepositoryError> {
        Ok((Vec::new(), 0))
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let now = Utc::now();
        Ok(Order {
            id: Uuid::new_v4(),
            brand: draft.brand,
            customer_name: draft.customer_name.clone(),
            lines: draft.lines.clone(),
            status: FulfilmentStatus::Pending,
            placed_at: draft.placed_at,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        _id: &Uuid,
        _patch: &OrderPatch,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _id: &Uuid,
        _from: FulfilmentStatus,
        _to: FulfilmentStatus,
    ) -> Result<Order, OrderRepositoryError> {
        Err(OrderRepositoryError::concurrent_update())
    }

    async fn delete(&self, _id: &Uuid) -> Result<bool, OrderRepositoryError> {
        Ok(false)
    }
}
