//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **identity**: reqwest-backed token introspection against the identity
//!   provider
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod identity;
pub mod persistence;
