//! HTTP layer: axum handlers, routes, auth, and error translation.

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod routes;
pub mod state;
