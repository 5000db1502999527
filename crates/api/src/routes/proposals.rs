use axum::routing::get;
use axum::Router;

use crate::handlers::{proposals, tasks};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proposals", get(proposals::list).post(proposals::create))
        .route(
            "/proposals/{id}",
            get(proposals::get)
                .put(proposals::update)
                .delete(proposals::delete),
        )
        .route("/proposals/{id}/tasks", get(tasks::list_by_proposal))
}
