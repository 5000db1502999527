use axum::routing::post;
use axum::Router;

use crate::handlers::subtasks;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/subtasks", post(subtasks::create))
}
