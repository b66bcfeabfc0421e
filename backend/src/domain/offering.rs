//! Bookable salon and grooming service offerings.
//!
//! Named "offering" rather than "service" to keep the word free for the
//! orchestration layer. Offerings carry no lifecycle machine; removal is a
//! soft delete via the `active` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::brand::Brand;

/// Longest bookable slot, in minutes.
pub const MAX_DURATION_MINUTES: i32 = 480;

/// An offering as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    /// Stable identifier, assigned by the adapter on insert.
    pub id: Uuid,
    /// Owning brand; immutable except for super-administrators.
    pub brand: Brand,
    /// Display name.
    pub name: String,
    /// Slot length in minutes.
    pub duration_minutes: i32,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Soft-delete flag; `false` hides the offering from booking.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures for offering payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferingValidationError {
    /// Name missing or blank once trimmed.
    #[error("offering name must not be empty")]
    EmptyName,
    /// Duration outside `1..=MAX_DURATION_MINUTES`.
    #[error("offering duration must be between 1 and {MAX_DURATION_MINUTES} minutes")]
    InvalidDuration,
    /// Price below zero.
    #[error("offering price must not be negative")]
    NegativePrice,
}

/// Payload for creating an offering. The adapter assigns id and timestamps;
/// new offerings start active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingDraft {
    /// Declared owning brand, checked against the caller's scope.
    pub brand: Brand,
    /// Display name.
    pub name: String,
    /// Slot length in minutes.
    pub duration_minutes: i32,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
}

impl OfferingDraft {
    /// Validate payload shape before any policy or persistence step.
    pub fn validate(&self) -> Result<(), OfferingValidationError> {
        if self.name.trim().is_empty() {
            return Err(OfferingValidationError::EmptyName);
        }
        if self.duration_minutes < 1 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(OfferingValidationError::InvalidDuration);
        }
        if self.price_cents < 0 {
            return Err(OfferingValidationError::NegativePrice);
        }
        Ok(())
    }
}

/// Partial update for an offering. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferingPatch {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<Brand>,
    /// New display name.
    pub name: Option<String>,
    /// New slot length in minutes.
    pub duration_minutes: Option<i32>,
    /// New price in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// Active flag (also used by soft delete).
    pub active: Option<bool>,
}

impl OfferingPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.name.is_none()
            && self.duration_minutes.is_none()
            && self.price_cents.is_none()
            && self.active.is_none()
    }

    /// Validate patched fields.
    pub fn validate(&self) -> Result<(), OfferingValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(OfferingValidationError::EmptyName);
            }
        }
        if let Some(duration) = self.duration_minutes {
            if !(1..=MAX_DURATION_MINUTES).contains(&duration) {
                return Err(OfferingValidationError::InvalidDuration);
            }
        }
        if let Some(price) = self.price_cents {
            if price < 0 {
                return Err(OfferingValidationError::NegativePrice);
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
