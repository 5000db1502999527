//! Task handlers, including the expansion flags on reads.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::types::parse_id;
use bidflow_db::models::proposal::ProposalDetail;
use bidflow_db::models::subtask::Subtask;
use bidflow_db::models::task::{CreateTask, Task, TaskDetail};
use bidflow_db::repositories::{ProposalRepo, SubtaskRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TaskExpandParams;
use crate::state::AppState;

/// `GET /proposals/{proposal_id}/tasks`
///
/// Tasks come back in display order. `?include_subtasks=true` embeds
/// each task's subtasks.
pub async fn list_by_proposal(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
    Query(expand): Query<TaskExpandParams>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    let proposal_id = parse_id("proposal id", &raw_id)?;
    if !ProposalRepo::exists(&state.pool, proposal_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id: proposal_id,
        }));
    }

    let tasks = TaskRepo::list_by_proposal(&state.pool, proposal_id).await?;
    let mut details = Vec::with_capacity(tasks.len());
    for task in tasks {
        let subtasks = if expand.include_subtasks {
            Some(SubtaskRepo::list_by_task(&state.pool, task.id).await?)
        } else {
            None
        };
        details.push(TaskDetail {
            task,
            subtasks,
            proposal: None,
        });
    }
    Ok(Json(details))
}

/// `GET /tasks/{id}`
///
/// The two expansion flags are independent. Expanding the proposal
/// embeds its creator but never the proposal's other tasks.
pub async fn get(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
    Query(expand): Query<TaskExpandParams>,
) -> AppResult<Json<TaskDetail>> {
    let id = parse_id("task id", &raw_id)?;
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let subtasks = if expand.include_subtasks {
        Some(SubtaskRepo::list_by_task(&state.pool, task.id).await?)
    } else {
        None
    };

    let proposal = if expand.include_proposal {
        match ProposalRepo::find_by_id(&state.pool, task.proposal_id).await? {
            Some(proposal) => {
                let creator = UserRepo::find_by_id(&state.pool, proposal.created_by).await?;
                Some(ProposalDetail { proposal, creator })
            }
            None => None,
        }
    } else {
        None
    };

    Ok(Json(TaskDetail {
        task,
        subtasks,
        proposal,
    }))
}

/// `POST /tasks`
///
/// Standalone creation. The referenced proposal must exist; when no
/// position is supplied the task is appended at the end.
pub async fn create(
    State(state): State<AppState>,
    _principal: AuthUser,
    Json(payload): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required field: title".to_string(),
        )));
    }
    if !ProposalRepo::exists(&state.pool, payload.proposal_id).await? {
        return Err(AppError::Core(CoreError::Reference(format!(
            "Referenced proposal {} does not exist",
            payload.proposal_id
        ))));
    }

    let task = TaskRepo::create(&state.pool, &payload).await?;
    tracing::info!(task_id = task.id, proposal_id = task.proposal_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks/{task_id}/subtasks`
pub async fn list_subtasks(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Vec<Subtask>>> {
    let task_id = parse_id("task id", &raw_id)?;
    if !TaskRepo::exists(&state.pool, task_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }));
    }
    let subtasks = SubtaskRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(subtasks))
}
