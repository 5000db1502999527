use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", post(tasks::create))
        .route("/tasks/{id}", get(tasks::get))
        .route("/tasks/{id}/subtasks", get(tasks::list_subtasks))
}
