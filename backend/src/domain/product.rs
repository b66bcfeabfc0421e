//! Retail products and menu items.
//!
//! Products carry no lifecycle machine; removal is a soft delete via the
//! `available` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::brand::Brand;

/// A product as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier, assigned by the adapter on insert.
    pub id: Uuid,
    /// Owning brand; immutable except for super-administrators.
    pub brand: Brand,
    /// Display name.
    pub name: String,
    /// Optional marketing copy.
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Soft-delete flag; `false` hides the product.
    pub available: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures for product payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    /// Name missing or blank once trimmed.
    #[error("product name must not be empty")]
    EmptyName,
    /// Price below zero.
    #[error("product price must not be negative")]
    NegativePrice,
}

/// Payload for creating a product. The adapter assigns id and timestamps;
/// new products start available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Declared owning brand, checked against the caller's scope.
    pub brand: Brand,
    /// Display name.
    pub name: String,
    /// Optional marketing copy.
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
}

impl ProductDraft {
    /// Validate payload shape before any policy or persistence step.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.price_cents < 0 {
            return Err(ProductValidationError::NegativePrice);
        }
        Ok(())
    }
}

/// Partial update for a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<Brand>,
    /// New display name.
    pub name: Option<String>,
    /// New marketing copy.
    pub description: Option<String>,
    /// New price in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// Availability flag (also used by soft delete).
    pub available: Option<bool>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.available.is_none()
    }

    /// Validate patched fields.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ProductValidationError::EmptyName);
            }
        }
        if let Some(price) = self.price_cents {
            if price < 0 {
                return Err(ProductValidationError::NegativePrice);
            }
        }
        Ok(())
    }

    /// Whether the patch would change the brand away from `current`.
    #[must_use]
    pub fn changes_brand(&self, current: Brand) -> bool {
        self.brand.is_some_and(|brand| brand != current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            brand: Brand::Anais,
            name: "Velvet lip tint".to_owned(),
            description: None,
            price_cents: 1850,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut d = draft();
        d.name = "   ".to_owned();
        assert_eq!(d.validate(), Err(ProductValidationError::EmptyName));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut d = draft();
        d.price_cents = -1;
        assert_eq!(d.validate(), Err(ProductValidationError::NegativePrice));
    }

    #[test]
    fn patch_brand_change_detection() {
        let patch = ProductPatch {
            brand: Some(Brand::Evolve),
            ..ProductPatch::default()
        };
        assert!(patch.changes_brand(Brand::Anais));
        assert!(!patch.changes_brand(Brand::Evolve));
        assert!(!ProductPatch::default().changes_brand(Brand::Anais));
    }
}
