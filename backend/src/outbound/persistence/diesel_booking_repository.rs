//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! Status changes are written conditionally: the update filters on the
//! expected current status, and zero affected rows is reported as a
//! concurrent update rather than retried here.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BookingQuery, BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingPatch, BookingStatus, BrandFilter};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookingChangeset, BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> BookingRepositoryError {
    map_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> BookingRepositoryError {
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    Booking::try_from(row).map_err(BookingRepositoryError::query)
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn list(
        &self,
        query: &BookingQuery,
    ) -> Result<(Vec<Booking>, i64), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut count_query = bookings::table.into_boxed();
        let mut page_query = bookings::table.into_boxed();
        if let BrandFilter::Only(brand) = query.brand {
            count_query = count_query.filter(bookings::brand.eq(brand.to_string()));
            page_query = page_query.filter(bookings::brand.eq(brand.to_string()));
        }
        if let Some(status) = query.status {
            count_query = count_query.filter(bookings::status.eq(status.to_string()));
            page_query = page_query.filter(bookings::status.eq(status.to_string()));
        }
        if let Some(from) = query.scheduled_from {
            count_query = count_query.filter(bookings::scheduled_at.ge(from));
            page_query = page_query.filter(bookings::scheduled_at.ge(from));
        }
        if let Some(until) = query.scheduled_until {
            count_query = count_query.filter(bookings::scheduled_at.lt(until));
            page_query = page_query.filter(bookings::scheduled_at.lt(until));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<BookingRow> = page_query
            .order((bookings::scheduled_at.asc(), bookings::id.asc()))
            .offset(query.page.offset())
            .limit(i64::from(query.page.per_page()))
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(row_to_booking)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = bookings::table
            .filter(bookings::id.eq(id))
            .select(BookingRow::as_select())
            .first::<BookingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_booking).transpose()
    }

    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewBookingRow {
            id: Uuid::new_v4(),
            brand: draft.brand.to_string(),
            customer_name: &draft.customer_name,
            customer_email: &draft.customer_email,
            offering_id: draft.offering_id,
            scheduled_at: draft.scheduled_at,
            status: BookingStatus::Pending.to_string(),
        };

        let row: BookingRow = diesel::insert_into(bookings::table)
            .values(&new_row)
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_booking(row)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &BookingPatch,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = BookingChangeset {
            brand: patch.brand.map(|brand| brand.to_string()),
            customer_name: patch.customer_name.as_deref(),
            customer_email: patch.customer_email.as_deref(),
            offering_id: patch.offering_id,
            scheduled_at: patch.scheduled_at,
            updated_at: Utc::now(),
        };

        let row = diesel::update(bookings::table.filter(bookings::id.eq(id)))
            .set(&changes)
            .returning(BookingRow::as_returning())
            .get_result::<BookingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_booking).transpose()
    }

    async fn update_status(
        &self,
        id: &Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id))
                .filter(bookings::status.eq(from.to_string())),
        )
        .set((
            bookings::status.eq(to.to_string()),
            bookings::updated_at.eq(Utc::now()),
        ))
        .returning(BookingRow::as_returning())
        .get_result::<BookingRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel)?;

        // No row at `from` any more: someone else moved it first.
        let row = row.ok_or_else(BookingRepositoryError::concurrent_update)?;
        row_to_booking(row)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(bookings::table.filter(bookings::id.eq(id)))
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
            BookingRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, BookingRepositoryError::Query { .. }));
    }
}
