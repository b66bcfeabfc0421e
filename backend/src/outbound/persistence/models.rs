//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Enumerated columns travel as their wire
//! tokens; decoding failures surface as query errors in the repositories.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    AdminProfile, Booking, Offering, Order, OrderLine, Product, RestaurantOrder, RoleCode,
};

use super::schema::{admin_profiles, bookings, offerings, orders, products, restaurant_orders};

fn decode_brand(token: &str) -> Result<crate::domain::Brand, String> {
    token
        .parse()
        .map_err(|_| format!("unknown brand token in storage: {token}"))
}

fn decode_status<S: std::str::FromStr>(token: &str) -> Result<S, String> {
    token
        .parse()
        .map_err(|_| format!("unknown status token in storage: {token}"))
}

fn decode_lines(lines: serde_json::Value) -> Result<Vec<OrderLine>, String> {
    serde_json::from_value(lines).map_err(|err| format!("decode order lines: {err}"))
}

pub(crate) fn encode_lines(lines: &[OrderLine]) -> Result<serde_json::Value, String> {
    serde_json::to_value(lines).map_err(|err| format!("encode order lines: {err}"))
}

// ---------------------------------------------------------------------------
// Admin profile models
// ---------------------------------------------------------------------------

/// Row struct for reading from the admin_profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminProfileRow {
    #[expect(dead_code, reason = "lookup key, not part of the domain profile")]
    pub identity_id: Uuid,
    pub id: Uuid,
    pub display_name: String,
    pub role: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

impl From<AdminProfileRow> for AdminProfile {
    fn from(row: AdminProfileRow) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            // Role codes are carried verbatim; unrecognized codes fail
            // closed at the policy layer, not here.
            role: RoleCode::new(row.role),
        }
    }
}

// ---------------------------------------------------------------------------
// Product models
// ---------------------------------------------------------------------------

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = String;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            brand: decode_brand(&row.brand)?,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating new product records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: Uuid,
    pub brand: String,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub available: bool,
}

/// Changeset struct applying a product patch; `None` fields stay untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub brand: Option<String>,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub available: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Offering models
// ---------------------------------------------------------------------------

/// Row struct for reading from the offerings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offerings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfferingRow {
    pub id: Uuid,
    pub brand: String,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OfferingRow> for Offering {
    type Error = String;

    fn try_from(row: OfferingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            brand: decode_brand(&row.brand)?,
            name: row.name,
            duration_minutes: row.duration_minutes,
            price_cents: row.price_cents,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating new offering records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offerings)]
pub(crate) struct NewOfferingRow<'a> {
    pub id: Uuid,
    pub brand: String,
    pub name: &'a str,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub active: bool,
}

/// Changeset struct applying an offering patch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = offerings)]
pub(crate) struct OfferingChangeset<'a> {
    pub brand: Option<String>,
    pub name: Option<&'a str>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Booking models
// ---------------------------------------------------------------------------

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub brand: String,
    pub customer_name: String,
    pub customer_email: String,
    pub offering_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = String;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            brand: decode_brand(&row.brand)?,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            offering_id: row.offering_id,
            scheduled_at: row.scheduled_at,
            status: decode_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating new booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub brand: String,
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub offering_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
}

/// Changeset struct applying a booking patch. Status never travels here;
/// status changes go through the conditional update instead.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingChangeset<'a> {
    pub brand: Option<String>,
    pub customer_name: Option<&'a str>,
    pub customer_email: Option<&'a str>,
    pub offering_id: Option<Uuid>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Retail order models
// ---------------------------------------------------------------------------

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub brand: String,
    pub customer_name: String,
    pub lines: serde_json::Value,
    pub status: String,
    pub placed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = String;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            brand: decode_brand(&row.brand)?,
            customer_name: row.customer_name,
            lines: decode_lines(row.lines)?,
            status: decode_status(&row.status)?,
            placed_at: row.placed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating new order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub id: Uuid,
    pub brand: String,
    pub customer_name: &'a str,
    pub lines: serde_json::Value,
    pub status: String,
    pub placed_at: DateTime<Utc>,
}

/// Changeset struct applying an order patch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
pub(crate) struct OrderChangeset<'a> {
    pub brand: Option<String>,
    pub customer_name: Option<&'a str>,
    pub lines: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Restaurant order models
// ---------------------------------------------------------------------------

/// Row struct for reading from the restaurant_orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurant_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantOrderRow {
    pub id: Uuid,
    pub brand: String,
    pub table_number: i32,
    pub lines: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RestaurantOrderRow> for RestaurantOrder {
    type Error = String;

    fn try_from(row: RestaurantOrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            brand: decode_brand(&row.brand)?,
            table_number: row.table_number,
            lines: decode_lines(row.lines)?,
            status: decode_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating new restaurant order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = restaurant_orders)]
pub(crate) struct NewRestaurantOrderRow {
    pub id: Uuid,
    pub brand: String,
    pub table_number: i32,
    pub lines: serde_json::Value,
    pub status: String,
}

/// Changeset struct applying a restaurant order patch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = restaurant_orders)]
pub(crate) struct RestaurantOrderChangeset {
    pub table_number: Option<i32>,
    pub lines: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Row decoding edge cases.

    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{Brand, FulfilmentStatus};

    #[rstest]
    fn a_valid_order_row_decodes_into_the_domain() {
        let now = Utc::now();
        let row = OrderRow {
            id: Uuid::new_v4(),
            brand: "EVOLVE".into(),
            customer_name: "Val".into(),
            lines: json!([{"name": "Serum", "quantity": 1, "unitPriceCents": 3400}]),
            status: "PENDING".into(),
            placed_at: now,
            created_at: now,
            updated_at: now,
        };
        let order = Order::try_from(row).expect("row decodes");
        assert_eq!(order.brand, Brand::Evolve);
        assert_eq!(order.status, FulfilmentStatus::Pending);
        assert_eq!(order.lines.len(), 1);
    }

    #[rstest]
    #[case::bad_brand("ACME", "PENDING")]
    #[case::bad_status("EVOLVE", "SHIPPED")]
    fn corrupt_tokens_are_reported(#[case] brand: &str, #[case] status: &str) {
        let now = Utc::now();
        let row = OrderRow {
            id: Uuid::new_v4(),
            brand: brand.into(),
            customer_name: "Val".into(),
            lines: json!([]),
            status: status.into(),
            placed_at: now,
            created_at: now,
            updated_at: now,
        };
        let err = Order::try_from(row).expect_err("corrupt token rejected");
        assert!(err.contains("token in storage"));
    }

    #[rstest]
    fn malformed_lines_are_reported() {
        let now = Utc::now();
        let row = RestaurantOrderRow {
            id: Uuid::new_v4(),
            brand: "POPULO".into(),
            table_number: 4,
            lines: json!({"not": "an array"}),
            status: "PENDING".into(),
            created_at: now,
            updated_at: now,
        };
        let err = RestaurantOrder::try_from(row).expect_err("malformed lines rejected");
        assert!(err.contains("decode order lines"));
    }
}
