//! Port for restaurant order persistence, including the conditional status
//! write that backs the kitchen workflow.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    BrandFilter, FulfilmentStatus, PageRequest, RestaurantOrder, RestaurantOrderDraft,
    RestaurantOrderPatch,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by restaurant order repository adapters.
    pub enum RestaurantOrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "restaurant order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "restaurant order repository query failed: {message}",
        /// Conditional status write matched no row: another caller moved the
        /// order first.
        ConcurrentUpdate =>
            "restaurant order status changed concurrently",
    }
}

/// Listing filter for restaurant orders. The brand filter arrives already
/// narrowed by policy; the adapter applies it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantOrderQuery {
    /// Brand scope to list within.
    pub brand: BrandFilter,
    /// Restrict to a single status when present.
    pub status: Option<FulfilmentStatus>,
    /// Restrict to a single table when present.
    pub table_number: Option<i32>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Port for reading and writing restaurant orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantOrderRepository: Send + Sync {
    /// List one page of restaurant orders plus the unpaged total count.
    async fn list(
        &self,
        query: &RestaurantOrderQuery,
    ) -> Result<(Vec<RestaurantOrder>, i64), RestaurantOrderRepositoryError>;

    /// Find a restaurant order by id.
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RestaurantOrder>, RestaurantOrderRepositoryError>;

    /// Insert a new restaurant order and return the stored row.
    async fn insert(
        &self,
        draft: &RestaurantOrderDraft,
    ) -> Result<RestaurantOrder, RestaurantOrderRepositoryError>;

    /// Apply a patch to a restaurant order. Returns `None` when no row
    /// matches.
    async fn update(
        &self,
        id: &Uuid,
        patch: &RestaurantOrderPatch,
    ) -> Result<Option<RestaurantOrder>, RestaurantOrderRepositoryError>;

    /// Move a restaurant order from `from` to `to` in one conditional
    /// write. Fails with `ConcurrentUpdate` when the row is no longer at
    /// `from`.
    async fn update_status(
        &self,
        id: &Uuid,
        from: FulfilmentStatus,
        to: FulfilmentStatus,
    ) -> Result<RestaurantOrder, RestaurantOrderRepositoryError>;

    /// Delete a restaurant order. Returns whether a row was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, RestaurantOrderRepositoryError>;
}

/// Fixture implementation for tests that do not exercise restaurant order
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantOrderRepository;

#[async_trait]
impl RestaurantOrderRepository for FixtureRestaurantOrderRepository {
    async fn list(
        &self,
        _query: &RestaurantOrderQuery,
    ) -> Result<(Vec<RestaurantOrder>, i64), RestaurantOrderRepositoryError> {
        Ok((Vec::new(), 0))
    }

    async fn find_by_id(
        &self,
        _id: &Uuid,
    ) -> Result<Option<RestaurantOrder>, RestaurantOrderRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        draft: &RestaurantOrderDraft,
    ) -> Result<RestaurantOrder, RestaurantOrderRepositoryError> {
        let now = Utc::now();
        Ok(RestaurantOrder {
            id: Uuid::new_v4(),
            brand: draft.brand,
            table_number: draft.table_number,
            lines: draft.lines.clone(),
            status: FulfilmentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        _id: &Uuid,
        _patch: &RestaurantOrderPatch,
    ) -> Result<Option<RestaurantOrder>, RestaurantOrderRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _id: &Uuid,
        _from: FulfilmentStatus,
        _to: FulfilmentStatus,
    ) -> Result<RestaurantOrder, RestaurantOrderRepositoryError> {
        Err(RestaurantOrderRepositoryError::concurrent_update())
    }

    async fn delete(&self, _id: &Uuid) -> Result<bool, RestaurantOrderRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::{Brand, OrderLine};

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_starts_pending() {
        let repo = FixtureRestaurantOrderRepository;
        let draft = RestaurantOrderDraft {
            brand: Brand::Populo,
            table_number: 12,
            lines: vec![OrderLine {
                name: "Tiramisu".to_owned(),
                quantity: 1,
                unit_price_cents: 650,
            }],
        };
        let order = repo.insert(&draft).await.expect("fixture insert succeeds");
        assert_eq!(order.status, FulfilmentStatus::Pending);
        assert_eq!(order.table_number, 12);
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = RestaurantOrderRepositoryError::query("timeout");
        assert!(err.to_string().contains("timeout"));
    }
}
