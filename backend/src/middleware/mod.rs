//! Actix middleware shared by every mounted route.

pub mod trace;

pub use trace::Trace;
