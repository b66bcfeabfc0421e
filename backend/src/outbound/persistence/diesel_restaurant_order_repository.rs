//! PostgreSQL-backed `RestaurantOrderRepository` implementation using
//! Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    RestaurantOrderQuery, RestaurantOrderRepository, RestaurantOrderRepositoryError,
};
use crate::domain::{
    BrandFilter, FulfilmentStatus, RestaurantOrder, RestaurantOrderDraft, RestaurantOrderPatch,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewRestaurantOrderRow, RestaurantOrderChangeset, RestaurantOrderRow, encode_lines,
};
use super::pool::{DbPool, PoolError};
use super::schema::restaurant_orders;

/// Diesel-backed implementation of the restaurant order repository port.
#[derive(Clone)]
pub struct DieselRestaurantOrderRepository {
    pool: DbPool,
}

impl DieselRestaurantOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> RestaurantOrderRepositoryError {
    map_pool_error(error, RestaurantOrderRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> RestaurantOrderRepositoryError {
    map_diesel_error(
        error,
        RestaurantOrderRepositoryError::query,
        RestaurantOrderRepositoryError::connection,
    )
}

fn row_to_order(row: RestaurantOrderRow) -> Result<RestaurantOrder, RestaurantOrderRepositoryError> {
    RestaurantOrder::try_from(row).map_err(RestaurantOrderRepositoryError::query)
}

#[async_trait]
impl RestaurantOrderRepository for DieselRestaurantOrderRepository {
    async fn list(
        &self,
        query: &RestaurantOrderQuery,
    ) -> Result<(Vec<RestaurantOrder>, i64), RestaurantOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut count_query = restaurant_orders::table.into_boxed();
        let mut page_query = restaurant_orders::table.into_boxed();
        if let BrandFilter::Only(brand) = query.brand {
            count_query = count_query.filter(restaurant_orders::brand.eq(brand.to_string()));
            page_query = page_query.filter(restaurant_orders::brand.eq(brand.to_string()));
        }
        if let Some(status) = query.status {
            count_query = count_query.filter(restaurant_orders::status.eq(status.to_string()));
            page_query = page_query.filter(restaurant_orders::status.eq(status.to_string()));
        }
        if let Some(table) = query.table_number {
            count_query = count_query.filter(restaurant_orders::table_number.eq(table));
            page_query = page_query.filter(restaurant_orders::table_number.eq(table));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<RestaurantOrderRow> = page_query
            .order((
                restaurant_orders::created_at.asc(),
                restaurant_orders::id.asc(),
            ))
            .offset(query.page.offset())
            .limit(i64::from(query.page.per_page()))
            .select(RestaurantOrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(row_to_order)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RestaurantOrder>, RestaurantOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = restaurant_orders::table
            .filter(restaurant_orders::id.eq(id))
            .select(RestaurantOrderRow::as_select())
            .first::<RestaurantOrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_order).transpose()
    }

    async fn insert(
        &self,
        draft: &RestaurantOrderDraft,
    ) -> Result<RestaurantOrder, RestaurantOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewRestaurantOrderRow {
            id: Uuid::new_v4(),
            brand: draft.brand.to_string(),
            table_number: draft.table_number,
            lines: encode_lines(&draft.lines).map_err(RestaurantOrderRepositoryError::query)?,
            status: FulfilmentStatus::Pending.to_string(),
        };

        let row: RestaurantOrderRow = diesel::insert_into(restaurant_orders::table)
            .values(&new_row)
            .returning(RestaurantOrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_order(row)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &RestaurantOrderPatch,
    ) -> Result<Option<RestaurantOrder>, RestaurantOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let lines = patch
            .lines
            .as_deref()
            .map(encode_lines)
            .transpose()
            .map_err(RestaurantOrderRepositoryError::query)?;
        let changes = RestaurantOrderChangeset {
            table_number: patch.table_number,
            lines,
            updated_at: Utc::now(),
        };

        let row = diesel::update(restaurant_orders::table.filter(restaurant_orders::id.eq(id)))
            .set(&changes)
            .returning(RestaurantOrderRow::as_returning())
            .get_result::<RestaurantOrderRow>(&mut conn)
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
    ) -> Result<RestaurantOrder, RestaurantOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(
            restaurant_orders::table
                .filter(restaurant_orders::id.eq(id))
                .filter(restaurant_orders::status.eq(from.to_string())),
        )
        .set((
            restaurant_orders::status.eq(to.to_string()),
            restaurant_orders::updated_at.eq(Utc::now()),
        ))
        .returning(RestaurantOrderRow::as_returning())
        .get_result::<RestaurantOrderRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel)?;

        let row = row.ok_or_else(RestaurantOrderRepositoryError::concurrent_update)?;
        row_to_order(row)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, RestaurantOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(restaurant_orders::table.filter(restaurant_orders::id.eq(id)))
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

        assert!(matches!(
            repo_err,
            RestaurantOrderRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);

        assert!(matches!(
            repo_err,
            RestaurantOrderRepositoryError::Query { .. }
        ));
    }
}
