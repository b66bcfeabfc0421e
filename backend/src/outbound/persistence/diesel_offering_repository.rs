//! PostgreSQL-backed `OfferingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{OfferingQuery, OfferingRepository, OfferingRepositoryError};
use crate::domain::{BrandFilter, Offering, OfferingDraft, OfferingPatch};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOfferingRow, OfferingChangeset, OfferingRow};
use super::pool::{DbPool, PoolError};
use super::schema::offerings;

/// Diesel-backed implementation of the offering repository port.
#[derive(Clone)]
pub struct DieselOfferingRepository {
    pool: DbPool,
}

impl DieselOfferingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> OfferingRepositoryError {
    map_pool_error(error, OfferingRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> OfferingRepositoryError {
    map_diesel_error(
        error,
        OfferingRepositoryError::query,
        OfferingRepositoryError::connection,
    )
}

fn row_to_offering(row: OfferingRow) -> Result<Offering, OfferingRepositoryError> {
    Offering::try_from(row).map_err(OfferingRepositoryError::query)
}

#[async_trait]
impl OfferingRepository for DieselOfferingRepository {
    async fn list(
        &self,
        query: &OfferingQuery,
    ) -> Result<(Vec<Offering>, i64), OfferingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut count_query = offerings::table.into_boxed();
        let mut page_query = offerings::table.into_boxed();
        if let BrandFilter::Only(brand) = query.brand {
            count_query = count_query.filter(offerings::brand.eq(brand.to_string()));
            page_query = page_query.filter(offerings::brand.eq(brand.to_string()));
        }
        if let Some(active) = query.active {
            count_query = count_query.filter(offerings::active.eq(active));
            page_query = page_query.filter(offerings::active.eq(active));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<OfferingRow> = page_query
            .order((offerings::created_at.desc(), offerings::id.desc()))
            .offset(query.page.offset())
            .limit(i64::from(query.page.per_page()))
            .select(OfferingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(row_to_offering)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Offering>, OfferingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = offerings::table
            .filter(offerings::id.eq(id))
            .select(OfferingRow::as_select())
            .first::<OfferingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_offering).transpose()
    }

    async fn insert(&self, draft: &OfferingDraft) -> Result<Offering, OfferingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewOfferingRow {
            id: Uuid::new_v4(),
            brand: draft.brand.to_string(),
            name: &draft.name,
            duration_minutes: draft.duration_minutes,
            price_cents: draft.price_cents,
            active: true,
        };

        let row: OfferingRow = diesel::insert_into(offerings::table)
            .values(&new_row)
            .returning(OfferingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_offering(row)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &OfferingPatch,
    ) -> Result<Option<Offering>, OfferingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = OfferingChangeset {
            brand: patch.brand.map(|brand| brand.to_string()),
            name: patch.name.as_deref(),
            duration_minutes: patch.duration_minutes,
            price_cents: patch.price_cents,
            active: patch.active,
            updated_at: Utc::now(),
        };

        let row = diesel::update(offerings::table.filter(offerings::id.eq(id)))
            .set(&changes)
            .returning(OfferingRow::as_returning())
            .get_result::<OfferingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_offering).transpose()
    }
}
