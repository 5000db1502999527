//! Subtask handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_db::models::subtask::{CreateSubtask, Subtask};
use bidflow_db::repositories::{SubtaskRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// `POST /subtasks`
///
/// Standalone creation. The referenced task must exist; hours default
/// to zero and must be non-negative.
pub async fn create(
    State(state): State<AppState>,
    _principal: AuthUser,
    Json(payload): Json<CreateSubtask>,
) -> AppResult<(StatusCode, Json<Subtask>)> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required field: title".to_string(),
        )));
    }
    if payload.hours.unwrap_or(0) < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Subtask hours must be non-negative".to_string(),
        )));
    }
    if !TaskRepo::exists(&state.pool, payload.task_id).await? {
        return Err(AppError::Core(CoreError::Reference(format!(
            "Referenced task {} does not exist",
            payload.task_id
        ))));
    }

    let subtask = SubtaskRepo::create(&state.pool, &payload).await?;
    tracing::info!(subtask_id = subtask.id, task_id = subtask.task_id, "Subtask created");
    Ok((StatusCode::CREATED, Json(subtask)))
}
