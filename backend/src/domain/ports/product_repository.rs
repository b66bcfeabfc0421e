//! Port for product persistence.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BrandFilter, PageRequest, Product, ProductDraft, ProductPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "product repository query failed: {message}",
    }
}

/// Listing filter for products. The brand filter arrives already narrowed
/// by policy; the adapter applies it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Brand scope to list within.
    pub brand: BrandFilter,
    /// Restrict to a single availability state when present.
    pub available: Option<bool>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Port for reading and writing products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List one page of products plus the unpaged total count.
    async fn list(&self, query: &ProductQuery)
        -> Result<(Vec<Product>, i64), ProductRepositoryError>;

    /// Find a product by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Product>, ProductRepositoryError>;

    /// Insert a new product and return the stored row.
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError>;

    /// Apply a patch to a product. Returns `None` when no row matches.
    async fn update(
        &self,
        id: &Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError>;
}

/// Fixture implementation for tests that do not exercise product persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductRepository;

#[async_trait]
impl ProductRepository for FixtureProductRepository {
    async fn list(
        &self,
        _query: &ProductQuery,
    ) -> Result<(Vec<Product>, i64), ProductRepositoryError> {
        Ok((Vec::new(), 0))
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let now = Utc::now();
        Ok(Product {
            id: Uuid::new_v4(),
            brand: draft.brand,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price_cents: draft.price_cents,
            available: true,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        _id: &Uuid,
        _patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
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
    async fn fixture_list_returns_empty() {
        let repo = FixtureProductRepository;
        let (items, total) = repo
            .list(&ProductQuery {
                brand: BrandFilter::All,
                available: None,
                page: PageRequest::default(),
            })
            .await
            .expect("fixture list succeeds");
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_echoes_the_draft() {
        let repo = FixtureProductRepository;
        let draft = ProductDraft {
            brand: Brand::Anais,
            name: "Silk scarf".to_owned(),
            description: None,
            price_cents: 5900,
        };
        let product = repo.insert(&draft).await.expect("fixture insert succeeds");
        assert_eq!(product.name, draft.name);
        assert!(product.available);
    }
}
