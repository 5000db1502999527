use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route("/users/{id}", patch(users::update).delete(users::delete))
        .route("/users/{id}/disable", delete(users::disable))
        .route("/users/{id}/enable", patch(users::enable))
}
