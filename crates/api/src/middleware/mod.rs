//! Request extractors.
//!
//! - [`auth`] -- JWT-based [`auth::AuthUser`] authentication extractor.
//!
//! Authorization is deliberately not middleware: privileged handlers
//! call [`crate::guard::require_role`] explicitly, which re-loads the
//! principal's role from the store.

pub mod auth;
