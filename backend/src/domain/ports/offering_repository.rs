//! Port for offering persistence.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BrandFilter, Offering, OfferingDraft, OfferingPatch, PageRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by offering repository adapters.
    pub enum OfferingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "offering repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "offering repository query failed: {message}",
    }
}

/// Listing filter for offerings. The brand filter arrives already narrowed
/// by policy; the adapter applies it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingQuery {
    /// Brand scope to list within.
    pub brand: BrandFilter,
    /// Restrict to a single active state when present.
    pub active: Option<bool>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Port for reading and writing offerings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferingRepository: Send + Sync {
    /// List one page of offerings plus the unpaged total count.
    async fn list(
        &self,
        query: &OfferingQuery,
    ) -> Result<(Vec<Offering>, i64), OfferingRepositoryError>;

    /// Find an offering by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Offering>, OfferingRepositoryError>;

    /// Insert a new offering and return the stored row.
    async fn insert(&self, draft: &OfferingDraft) -> Result<Offering, OfferingRepositoryError>;

    /// Apply a patch to an offering. Returns `None` when no row matches.
    async fn update(
        &self,
        id: &Uuid,
        patch: &OfferingPatch,
    ) -> Result<Option<Offering>, OfferingRepositoryError>;
}

/// Fixture implementation for tests that do not exercise offering persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOfferingRepository;

#[async_trait]
impl OfferingRepository for FixtureOfferingRepository {
    async fn list(
        &self,
        _query: &OfferingQuery,
    ) -> Result<(Vec<Offering>, i64), OfferingRepositoryError> {
        Ok((Vec::new(), 0))
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Offering>, OfferingRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, draft: &OfferingDraft) -> Result<Offering, OfferingRepositoryError> {
        let now = Utc::now();
        Ok(Offering {
            id: Uuid::new_v4(),
            brand: draft.brand,
            name: draft.name.clone(),
            duration_minutes: draft.duration_minutes,
            price_cents: draft.price_cents,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        _id: &Uuid,
        _patch: &OfferingPatch,
    ) -> Result<Option<Offering>, OfferingRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::Brand;

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_starts_active() {
        let repo = FixtureOfferingRepository;
        let draft = OfferingDraft {
            brand: Brand::Evolve,
            name: "Skin fade".to_owned(),
            duration_minutes: 45,
            price_cents: 3200,
        };
        let offering = repo.insert(&draft).await.expect("fixture insert succeeds");
        assert!(offering.active);
        assert_eq!(offering.duration_minutes, 45);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureOfferingRepository;
        let found = repo
            .find_by_id(&Uuid::new_v4())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }
}
