//! User administration handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::roles::ROLE_ADMIN;
use bidflow_core::types::parse_id;
use bidflow_db::models::user::{UpdateUser, User};
use bidflow_db::repositories::UserRepo;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::guard::require_role;
use crate::middleware::auth::AuthUser;
use crate::query::UserListParams;
use crate::state::AppState;

/// `GET /users`
///
/// All supplied filters compose conjunctively; absent or blank
/// parameters impose no constraint.
pub async fn list(
    State(state): State<AppState>,
    _principal: AuthUser,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<Vec<User>>> {
    let filter = params.parse()?;
    let users = UserRepo::list(&state.pool, &filter).await?;
    Ok(Json(users))
}

/// `PATCH /users/{id}`
///
/// Partial update over the whitelisted field set. The target is
/// resolved before the payload is validated, so a nonexistent user is
/// a 404 regardless of the body; an empty or all-unknown body is then
/// rejected before any row is touched.
pub async fn update(
    State(state): State<AppState>,
    _principal: AuthUser,
    Path(raw_id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let id = parse_id("user id", &raw_id)?;

    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    let changes = payload.validate()?;

    let user = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, "User updated");
    Ok(Json(user))
}

/// `DELETE /users/{id}`
///
/// Admin only. An author with existing proposals cannot be deleted;
/// the FK on `proposals.created_by` backstops this check.
pub async fn delete(
    State(state): State<AppState>,
    principal: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Value>> {
    require_role(&state.pool, principal.user_id, ROLE_ADMIN).await?;
    let id = parse_id("user id", &raw_id)?;

    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    let authored = UserRepo::count_authored_proposals(&state.pool, id).await?;
    if authored > 0 {
        return Err(AppError::Core(CoreError::Reference(format!(
            "Cannot delete user {id}: {authored} proposals reference them"
        ))));
    }

    UserRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = id, "User deleted");
    Ok(Json(json!({ "message": "User deleted" })))
}

/// `DELETE /users/{id}/disable`
///
/// Admin only. Disabling an already-inactive account is a 409; the
/// row's `updated_at` does not move on the failed attempt.
pub async fn disable(
    State(state): State<AppState>,
    principal: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<User>> {
    set_active(&state, principal, &raw_id, false).await
}

/// `PATCH /users/{id}/enable`
pub async fn enable(
    State(state): State<AppState>,
    principal: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<User>> {
    set_active(&state, principal, &raw_id, true).await
}

async fn set_active(
    state: &AppState,
    principal: AuthUser,
    raw_id: &str,
    active: bool,
) -> AppResult<Json<User>> {
    require_role(&state.pool, principal.user_id, ROLE_ADMIN).await?;
    let id = parse_id("user id", raw_id)?;

    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if target.is_active == active {
        let err = if active {
            CoreError::AlreadyActive { id }
        } else {
            CoreError::AlreadyInactive { id }
        };
        return Err(AppError::Core(err));
    }

    UserRepo::set_active(&state.pool, id, active).await?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(user_id = id, active, "User active flag changed");
    Ok(Json(user))
}
