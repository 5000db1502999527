//! Domain layer shared by the database and API crates.
//!
//! Holds the error taxonomy, shared type aliases, role and
//! opportunity-status enumerations, and the filter-coercion kit. This
//! crate has no sqlx or axum dependency so domain rules stay testable
//! without a running server or database.

pub mod error;
pub mod filter;
pub mod proposal;
pub mod roles;
pub mod types;
