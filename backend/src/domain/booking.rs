//! Appointment bookings against offerings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::brand::Brand;
use super::status::BookingStatus;

/// A booking as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Stable identifier, assigned by the adapter on insert.
    pub id: Uuid,
    /// Owning brand; immutable except for super-administrators.
    pub brand: Brand,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact address.
    pub customer_email: String,
    /// Offering being booked.
    pub offering_id: Uuid,
    /// Appointment start time.
    pub scheduled_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures for booking payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// Customer name missing or blank once trimmed.
    #[error("customer name must not be empty")]
    EmptyCustomerName,
    /// Address lacks the minimal `@` shape.
    #[error("customer email is not a valid address")]
    InvalidEmail,
}

fn validate_email(email: &str) -> Result<(), BookingValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(BookingValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() {
        return Err(BookingValidationError::InvalidEmail);
    }
    Ok(())
}

/// Payload for creating a booking. New bookings start `PENDING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// Declared owning brand, checked against the caller's scope.
    pub brand: Brand,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact address.
    pub customer_email: String,
    /// Offering being booked.
    pub offering_id: Uuid,
    /// Appointment start time.
    pub scheduled_at: DateTime<Utc>,
}

impl BookingDraft {
    /// Validate payload shape before any policy or persistence step.
    pub fn validate(&self) -> Result<(), BookingValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(BookingValidationError::EmptyCustomerName);
        }
        validate_email(&self.customer_email)
    }
}

/// Partial update for a booking. `None` fields are left untouched.
/// Status changes go through the status operation, not the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    /// Brand reassignment; super-administrators only.
    pub brand: Option<Brand>,
    /// New customer display name.
    pub customer_name: Option<String>,
    /// New customer contact address.
    pub customer_email: Option<String>,
    /// Re-pointed offering.
    pub offering_id: Option<Uuid>,
    /// Rescheduled start time.
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl BookingPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.customer_name.is_none()
            && self.customer_email.is_none()
            && self.offering_id.is_none()
            && self.scheduled_at.is_none()
    }

    /// Validate patched fields.
    pub fn validate(&self) -> Result<(), BookingValidationError> {
        if let Some(name) = &self.customer_name {
            if name.trim().is_empty() {
                return Err(BookingValidationError::EmptyCustomerName);
            }
        }
        if let Some(email) = &self.customer_email {
            validate_email(email)?;
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

    fn draft() -> BookingDraft {
        BookingDraft {
            brand: Brand::Anais,
            customer_name: "Mara Voss".to_owned(),
            customer_email: "mara@example.com".to_owned(),
            offering_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("@missing-local")]
    #[case("missing-domain@")]
    fn malformed_email_is_rejected(#[case] email: &str) {
        let mut d = draft();
        d.customer_email = email.to_owned();
        assert_eq!(d.validate(), Err(BookingValidationError::InvalidEmail));
    }

    #[test]
    fn blank_customer_name_is_rejected() {
        let mut d = draft();
        d.customer_name = "   ".to_owned();
        assert_eq!(d.validate(), Err(BookingValidationError::EmptyCustomerName));
    }
}
