//! PostgreSQL-backed `AdminProfileRepository` implementation using Diesel
//! ORM. Read-only: provisioning happens out of band.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::AdminProfile;
use crate::domain::ports::{AdminProfileRepository, AdminProfileRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::AdminProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::admin_profiles;

/// Diesel-backed implementation of the admin profile repository port.
#[derive(Clone)]
pub struct DieselAdminProfileRepository {
    pool: DbPool,
}

impl DieselAdminProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AdminProfileRepositoryError {
    map_pool_error(error, AdminProfileRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AdminProfileRepositoryError {
    map_diesel_error(
        error,
        AdminProfileRepositoryError::query,
        AdminProfileRepositoryError::connection,
    )
}

#[async_trait]
impl AdminProfileRepository for DieselAdminProfileRepository {
    async fn find_by_identity(
        &self,
        identity_id: &Uuid,
    ) -> Result<Option<AdminProfile>, AdminProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = admin_profiles::table
            .filter(admin_profiles::identity_id.eq(identity_id))
            .select(AdminProfileRow::as_select())
            .first::<AdminProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(AdminProfile::from))
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
            AdminProfileRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);

        assert!(matches!(
            repo_err,
            AdminProfileRepositoryError::Query { .. }
        ));
    }
}
