//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Line items are stored as a JSONB document on the order row; status
//! changes are conditional writes as in the booking repository.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{OrderQuery, OrderRepository, OrderRepositoryError};
use crate::domain::{BrandFilter, FulfilmentStatus, Order, OrderDraft, OrderPatch};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOrderRow, OrderChangeset, OrderRow, encode_lines};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Diesel-backed implementation of the retail order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> OrderRepositoryError {
    map_pool_error(error, OrderRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> OrderRepositoryError {
    map_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn row_to_order(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    Order::try_from(row).map_err(OrderRepositoryError::query)
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn list(&self, query: &OrderQuery) -> Result<(Vec<Order>, i64), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut count_query = orders::table.into_boxed();
        let mut page_query = orders::table.into_boxed();
        if let BrandFilter::Only(brand) = query.brand {
            count_query = count_query.filter(orders::brand.eq(brand.to_string()));
            page_query = page_query.filter(orders::brand.eq(brand.to_string()));
        }
        if let Some(status) = query.status {
            count_query = count_query.filter(orders::status.eq(status.to_string()));
            page_query = page_query.filter(orders::status.eq(status.to_string()));
        }
        if let Some(from) = query.placed_from {
            count_query = count_query.filter(orders::placed_at.ge(from));
            page_query = page_query.filter(orders::placed_at.ge(from));
        }
        if let Some(until) = query.placed_until {
            count_query = count_query.filter(orders::placed_at.lt(until));
            page_query = page_query.filter(orders::placed_at.lt(until));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<OrderRow> = page_query
            .order((orders::placed_at.desc(), orders::id.desc()))
            .offset(query.page.offset())
            .limit(i64::from(query.page.per_page()))
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(row_to_order)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_order).transpose()
    }

    async fn insert(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewOrderRow {
            id: Uuid::new_v4(),
            brand: draft.brand.to_string(),
            customer_name: &draft.customer_name,
            lines: encode_lines(&draft.lines).map_err(OrderRepositoryError::query)?,
            status: FulfilmentStatus::Pending.to_string(),
            placed_at: draft.placed_at,
        };

        let row: OrderRow = diesel::insert_into(orders::table)
            .values(&new_row)
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_order(row)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &OrderPatch,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let lines = patch
            .lines
            .as_deref()
            .map(encode_lines)
            .transpose()
            .map_err(OrderRepositoryError::query)?;
        let changes = OrderChangeset {
            brand: patch.brand.map(|brand| brand.to_string()),
            customer_name: patch.customer_name.as_deref(),
            lines,
            updated_at: Utc::now(),
        };

        let row = diesel::update(orders::table.filter(orders::id.eq(id)))
            .set(&changes)
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_order).transpose()
    }

    async fn update_status(
        &self,
        id: &Uuid,
        from: FulfilmentStatus,
        to: FulfilmentStatus,
    ) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(
            orders::table
                .filter(orders::id.eq(id))
                .filter(orders::status.eq(from.to_string())),
        )
        .set((
            orders::status.eq(to.to_string()),
            orders::updated_at.eq(Utc::now()),
        ))
        .returning(OrderRow::as_returning())
        .get_result::<OrderRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel)?;

        let row = row.ok_or_else(OrderRepositoryError::concurrent_update)?;
        row_to_order(row)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(orders::table.filter(orders::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let repo_err = map_pool(PoolError::checkout("timed out"));

        assert!(matches!(repo_err, OrderRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, OrderRepositoryError::Query { .. }));
    }
}
