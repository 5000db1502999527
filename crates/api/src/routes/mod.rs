//! Route wiring. Every versioned route hangs off `/api/v1`; the
//! health probe stays at the root.

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod proposals;
pub mod subtasks;
pub mod tasks;
pub mod users;

/// Build the versioned API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest(
        "/api/v1",
        Router::new()
            .merge(auth::router())
            .merge(users::router())
            .merge(proposals::router())
            .merge(tasks::router())
            .merge(subtasks::router()),
    )
}
