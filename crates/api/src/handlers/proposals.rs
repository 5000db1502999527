//! Proposal handlers, including the nested create transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::types::parse_id;
use bidflow_db::models::proposal::{
    CreateProposal, Proposal, ProposalDetail, UpdateProposal,
};
use bidflow_db::models::task::TaskDetail;
use bidflow_db::repositories::{ProposalRepo, UserRepo};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ProposalListParams;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateProposalResponse {
    pub proposal: Proposal,
    pub tasks: Vec<TaskDetail>,
}

/// `GET /proposals`
pub async fn list(
    State(state): State<AppState>,
    _principal: AuthUser,
    Query(params): Query<ProposalListParams>,
) -> AppResult<Json<Vec<Proposal>>> {
    let filter = params.parse()?;
    let proposals = ProposalRepo::list(&state.pool, &filter).await?;
    Ok(Json(proposals))
}

/// `GET /proposals/{id}`
///
/// Returns the proposal with its creator embedded.
pub async fn get(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ProposalDetail>> {
    let id = parse_id("proposal id", &raw_id)?;
    let proposal = ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))?;
    let creator = UserRepo::find_by_id(&state.pool, proposal.created_by).await?;
    Ok(Json(ProposalDetail { proposal, creator }))
}

/// `POST /proposals`
///
/// The whole payload, nested tasks and subtasks included, is validated
/// before the transaction opens, so a bad nested row writes nothing.
/// Authorship comes from the authenticated principal, never the body.
pub async fn create(
    State(state): State<AppState>,
    principal: AuthUser,
    Json(payload): Json<CreateProposal>,
) -> AppResult<(StatusCode, Json<CreateProposalResponse>)> {
    let input = payload.validate()?;
    let (proposal, tasks) =
        ProposalRepo::create_with_tasks(&state.pool, principal.user_id, &input).await?;

    tracing::info!(
        proposal_id = proposal.id,
        task_count = tasks.len(),
        "Proposal created"
    );
    Ok((
        StatusCode::CREATED,
        Json(CreateProposalResponse { proposal, tasks }),
    ))
}

/// `PUT /proposals/{id}`
///
/// Partial update. The proposal is resolved before the payload is
/// validated, so a nonexistent target is a 404 regardless of the body.
/// A reassigned `created_by` must reference an existing user.
pub async fn update(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
    Json(payload): Json<UpdateProposal>,
) -> AppResult<Json<Proposal>> {
    let id = parse_id("proposal id", &raw_id)?;

    if !ProposalRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }));
    }

    let changes = payload.validate()?;

    if let Some(user_id) = changes.created_by {
        if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Reference(format!(
                "Referenced user {user_id} does not exist"
            ))));
        }
    }

    let proposal = ProposalRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))?;

    tracing::info!(proposal_id = id, "Proposal updated");
    Ok(Json(proposal))
}

/// `DELETE /proposals/{id}`
///
/// Removes the proposal and, via cascade, its tasks and subtasks.
pub async fn delete(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_id("proposal id", &raw_id)?;
    if !ProposalRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }));
    }
    tracing::info!(proposal_id = id, "Proposal deleted");
    Ok(Json(json!({ "message": "Proposal deleted" })))
}
