//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProductQuery, ProductRepository, ProductRepositoryError};
use crate::domain::{BrandFilter, Product, ProductDraft, ProductPatch};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProductRow, ProductChangeset, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the product repository port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProductRepositoryError {
    map_pool_error(error, ProductRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ProductRepositoryError {
    map_diesel_error(
        error,
        ProductRepositoryError::query,
        ProductRepositoryError::connection,
    )
}

fn row_to_product(row: ProductRow) -> Result<Product, ProductRepositoryError> {
    Product::try_from(row).map_err(ProductRepositoryError::query)
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(
        &self,
        query: &ProductQuery,
    ) -> Result<(Vec<Product>, i64), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // The filter set is applied twice: once for the unpaged count and
        // once for the page itself.
        let mut count_query = products::table.into_boxed();
        let mut page_query = products::table.into_boxed();
        if let BrandFilter::Only(brand) = query.brand {
            count_query = count_query.filter(products::brand.eq(brand.to_string()));
            page_query = page_query.filter(products::brand.eq(brand.to_string()));
        }
        if let Some(available) = query.available {
            count_query = count_query.filter(products::available.eq(available));
            page_query = page_query.filter(products::available.eq(available));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<ProductRow> = page_query
            .order((products::created_at.desc(), products::id.desc()))
            .offset(query.page.offset())
            .limit(i64::from(query.page.per_page()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = products::table
            .filter(products::id.eq(id))
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_product).transpose()
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewProductRow {
            id: Uuid::new_v4(),
            brand: draft.brand.to_string(),
            name: &draft.name,
            description: draft.description.as_deref(),
            price_cents: draft.price_cents,
            available: true,
        };

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&new_row)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_product(row)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = ProductChangeset {
            brand: patch.brand.map(|brand| brand.to_string()),
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            price_cents: patch.price_cents,
            available: patch.available,
            updated_at: Utc::now(),
        };

        let row = diesel::update(products::table.filter(products::id.eq(id)))
            .set(&changes)
            .returning(ProductRow::as_returning())
            .get_result::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_product).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let repo_err = map_pool(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            ProductRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, ProductRepositoryError::Query { .. }));
    }
}
