//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. Brand
//! codes, role codes and lifecycle statuses are stored as their
//! SCREAMING_SNAKE wire tokens in `Varchar` columns; order lines are stored
//! as `Jsonb` documents.

diesel::table! {
    /// Provisioned administrator records, keyed by the identity-provider id.
    admin_profiles (identity_id) {
        /// Identity-provider id the profile is looked up by.
        identity_id -> Uuid,
        /// Administrative id, distinct from the identity id.
        id -> Uuid,
        /// Display name for audit logs and UI.
        display_name -> Varchar,
        /// Role code, carried verbatim.
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Retail products per brand.
    products (id) {
        id -> Uuid,
        brand -> Varchar,
        name -> Varchar,
        description -> Nullable<Text>,
        price_cents -> Int8,
        available -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable offerings per brand.
    offerings (id) {
        id -> Uuid,
        brand -> Varchar,
        name -> Varchar,
        duration_minutes -> Int4,
        price_cents -> Int8,
        active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Appointment bookings against offerings.
    bookings (id) {
        id -> Uuid,
        brand -> Varchar,
        customer_name -> Varchar,
        customer_email -> Varchar,
        offering_id -> Uuid,
        scheduled_at -> Timestamptz,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Retail orders with their line items inlined.
    orders (id) {
        id -> Uuid,
        brand -> Varchar,
        customer_name -> Varchar,
        /// Line items as a JSON array.
        lines -> Jsonb,
        status -> Varchar,
        placed_at -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Dine-in orders for the Populo restaurant.
    restaurant_orders (id) {
        id -> Uuid,
        brand -> Varchar,
        table_number -> Int4,
        /// Line items as a JSON array.
        lines -> Jsonb,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
