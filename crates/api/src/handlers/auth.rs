//! Registration, login, and current-principal handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::roles;
use bidflow_db::models::user::{NewUser, User};
use bidflow_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: User,
}

/// Pull one required field out of a payload, failing if it is absent or
/// blank.
fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!(
            "Missing required field: {field}"
        ))),
    }
}

/// `POST /auth/register`
///
/// Creates an account. The email is pre-checked for duplicates to give
/// a clean 409; a concurrent registration racing past the check still
/// hits the `uq_users_email` constraint.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let username = required("username", payload.username)?;
    let email = required("email", payload.email)?;
    let password = required("password", payload.password)?;
    let first_name = required("first_name", payload.first_name)?;
    let last_name = required("last_name", payload.last_name)?;

    let role = match payload.role {
        Some(raw) => roles::normalize_role(&raw)?,
        None => roles::ROLE_USER.to_string(),
    };

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".to_string(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &NewUser {
            username,
            email,
            password_hash,
            first_name,
            last_name,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login`
///
/// Unknown email and wrong password produce the same 401 so the
/// response does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = required("email", payload.email)?;
    let password = required("password", payload.password)?;

    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid credentials".to_string()));

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is disabled".to_string(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        user,
    }))
}

/// `GET /auth/me`
pub async fn me(State(state): State<AppState>, principal: AuthUser) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, principal.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;
    Ok(Json(user))
}
