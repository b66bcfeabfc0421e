//! Dine-in restaurant orders. Restaurant service exists only at Populo, so
//! every restaurant order is validated against that brand up front.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::brand::Brand;
use super::order::OrderLine;
use super::status::FulfilmentStatus;

/// A restaurant order as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOrder {
    /// Stable identifier, assigned by the adapter on insert.
    pub id: Uuid,
    /// Owning brand; always `Populo`.
    pub brand: Brand,
    /// Table the order was taken at; one-based.
    pub table_number: i32,
    /// Line items; never empty.
    pub lines: Vec<OrderLine>,
    /// Fulfilment status, enforced by the restaurant transition table.
    pub status: FulfilmentStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RestaurantOrder {
    /// Order total, computed from the lines rather than stored.
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(OrderLine::subtotal_cents).sum()
    }
}

/// Validation failures for restaurant order payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestaurantOrderValidationError {
    /// Only Populo runs a restaurant.
    #[error("restaurant orders belong to the POPULO brand")]
    WrongBrand,
    /// Table numbers are one-based.
    #[error("table number must be at least one")]
    InvalidTableNumber,
    /// Order has no lines.
    #[error("restaurant order must contain at least one line")]
    NoLines,
    /// A line name is missing or blank once trimmed.
    #[error("order line name must not be empty")]
    EmptyLineName,
    /// A line quantity is zero.
    #[error("order line quantity must be at least one")]
    ZeroQuantity,
    /// A line unit price is below zero.
    #[error("order line unit price must not be negative")]
    NegativeUnitPrice,
}

fn validate_lines(lines: &[OrderLine]) -> Result<(), RestaurantOrderValidationError> {
    if lines.is_empty() {
        return Err(RestaurantOrderValidationError::NoLines);
    }
    for line in lines {
        if line.name.trim().is_empty() {
            return Err(RestaurantOrderValidationError::EmptyLineName);
        }
        if line.quantity == 0 {
            return Err(RestaurantOrderValidationError::ZeroQuantity);
        }
        if line.unit_price_cents < 0 {
            return Err(RestaurantOrderValidationError::NegativeUnitPrice);
        }
    }
    Ok(())
}

/// Payload for creating a restaurant order. New orders start `PENDING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantOrderDraft {
    /// Declared owning brand; must be `Populo`.
    pub brand: Brand,
    /// Table the order was taken at; one-based.
    pub table_number: i32,
    /// Line items; must be non-empty.
    pub lines: Vec<OrderLine>,
}

impl RestaurantOrderDraft {
    /// Validate payload shape before any policy or persistence step.
    pub fn validate(&self) -> Result<(), RestaurantOrderValidationError> {
        if self.brand != Brand::Populo {
            return Err(RestaurantOrderValidationError::WrongBrand);
        }
        if self.table_number < 1 {
            return Err(RestaurantOrderValidationError::InvalidTableNumber);
        }
        validate_lines(&self.lines)
    }
}

/// Partial update for a restaurant order. `None` fields are left untouched.
/// Status changes go through the status operation, not the patch; the brand
/// is not patchable at all since only Populo has a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantOrderPatch {
    /// New table number; one-based.
    pub table_number: Option<i32>,
    /// Replacement line set; replaces all lines when present.
    pub lines: Option<Vec<OrderLine>>,
}

impl RestaurantOrderPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.table_number.is_none() && self.lines.is_none()
    }

    /// Validate patched fields.
    pub fn validate(&self) -> Result<(), RestaurantOrderValidationError> {
        if let Some(table) = self.table_number {
            if table < 1 {
                return Err(RestaurantOrderValidationError::InvalidTableNumber);
            }
        }
        if let Some(lines) = &self.lines {
            validate_lines(lines)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn draft() -> RestaurantOrderDraft {
        RestaurantOrderDraft {
            brand: Brand::Populo,
            table_number: 4,
            lines: vec![OrderLine {
                name: "Carbonara".to_owned(),
                quantity: 2,
                unit_price_cents: 1450,
            }],
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[rstest]
    #[case(Brand::Anais)]
    #[case(Brand::Evolve)]
    fn non_populo_brands_are_rejected(#[case] brand: Brand) {
        let mut d = draft();
        d.brand = brand;
        assert_eq!(d.validate(), Err(RestaurantOrderValidationError::WrongBrand));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_table_numbers_are_rejected(#[case] table: i32) {
        let mut d = draft();
        d.table_number = table;
        assert_eq!(
            d.validate(),
            Err(RestaurantOrderValidationError::InvalidTableNumber)
        );
    }

    #[test]
    fn empty_lines_are_rejected() {
        let mut d = draft();
        d.lines.clear();
        assert_eq!(d.validate(), Err(RestaurantOrderValidationError::NoLines));
    }
}
