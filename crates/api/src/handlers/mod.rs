//! Request handlers, grouped by resource.

pub mod auth;
pub mod proposals;
pub mod subtasks;
pub mod tasks;
pub mod users;
