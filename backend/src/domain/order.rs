//! Retail orders and their line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::brand::Brand;
use super::status::FulfilmentStatus;

/// A single line on an order. Lines are embedded in the order document and
/// have no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Item description as captured at order time.
    pub name: String,
    /// Units ordered; at least one.
    pub quantity: u32,
    /// Per-unit price in the smallest currency unit.
    pub unit_price_cents: i64,
}

impl OrderLine {
    /// Line subtotal.
    #[must_use]
    pub fn subtotal_cents(&self) -> i64 {
        i64::from(self.quantity) * self.unit_price_cents
    }
}

/// Validation failures for order payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    /// Customer name missing or blank once trimmed.
    #[error("customer name must not be empty")]
    EmptyCustomerName,
    /// Order has no lines.
    #[error("order must contain at least one line")]
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

fn validate_lines(lines: &[OrderLine]) -> Result<(), OrderValidationError> {
    if lines.is_empty() {
        return Err(OrderValidationError::NoLines);
    }
    for line in lines {
        if line.name.trim().is_empty() {
            return Err(OrderValidationError::EmptyLineName);
        }
        if line.quantity == 0 {
            return Err(OrderValidationError::ZeroQuantity);
        }
        if line.unit_price_cents < 0 {
            return Err(OrderValidationError::NegativeUnitPrice);
        }
    }
    Ok(())
}

/// A retail order as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Stable identifier, assigned by the adapter on insert.
    pub id: Uuid,
    /// Owning brand; immutable except for super-administrators.
    pub brand: Brand,
    /// Customer display name.
    pub customer_name: String,
    /// Line items; never empty.
    pub lines: Vec<OrderLine>,
    /// Fulfilment status.
    pub status: FulfilmentStatus,
    /// When the customer placed the order.
    pub placed_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Order total, computed from the lines rather than stored.
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(OrderLine::subtotal_cents).sum()
    }
}

/// Payload for creating an order. New orders start `PENDING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Declared owning brand, checked against the caller's scope.
    pub brand: Brand,
    /// Customer display name.
    pub customer_name: String,
    /// Line items; must be non-empty.
    pub lines: Vec<OrderLine>,
    /// When the customer placed the order.
    pub placed_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Validate payload shape before any policy or persistence step.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(OrderValidationError::EmptyCustomerName);
        }
        validate_lines(&self.lines)
    }
}

/// Partial update for an order. `None` fields are left untouched.
/// Status changes go through the status operation, not the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<Brand>,
    /// New customer display name.
    pub customer_name: Option<String>,
    /// Replacement line set; replaces all lines when present.
    pub lines: Option<Vec<OrderLine>>,
}

impl OrderPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand.is_none() && self.customer_name.is_none() && self.lines.is_none()
    }

    /// Validate patched fields.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if let Some(name) = &self.customer_name {
            if name.trim().is_empty() {
                return Err(OrderValidationError::EmptyCustomerName);
            }
        }
        if let Some(lines) = &self.lines {
            validate_lines(lines)?;
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
    use rstest::rstest;

    use super::*;

    fn line(quantity: u32, unit_price_cents: i64) -> OrderLine {
        OrderLine {
            name: "Beard oil".to_owned(),
            quantity,
            unit_price_cents,
        }
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            brand: Brand::Populo,
            customer_name: "Jonah Reyes".to_owned(),
            lines: vec![line(2, 1200), line(1, 450)],
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn empty_lines_are_rejected() {
        let mut d = draft();
        d.lines.clear();
        assert_eq!(d.validate(), Err(OrderValidationError::NoLines));
    }

    #[rstest]
    #[case(line(0, 500), OrderValidationError::ZeroQuantity)]
    #[case(line(1, -500), OrderValidationError::NegativeUnitPrice)]
    fn bad_lines_are_rejected(#[case] bad: OrderLine, #[case] expected: OrderValidationError) {
        let mut d = draft();
        d.lines.push(bad);
        assert_eq!(d.validate(), Err(expected));
    }

    #[test]
    fn total_sums_line_subtotals() {
        let order = Order {
            id: Uuid::new_v4(),
            brand: Brand::Anais,
            customer_name: "Jonah Reyes".to_owned(),
            lines: vec![line(2, 1200), line(1, 450)],
            status: FulfilmentStatus::Pending,
            placed_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(order.total_cents(), 2850);
    }
}
