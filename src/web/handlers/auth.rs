//! Login and registration handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use super::{hash_for_storage, AppState};
use crate::auth::check_credentials;
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};

/// Message for every login failure, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /login - Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());

    let user = check_credentials(&repo, &req.email, &req.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let token = state.tokens.issue(user.id)?;
    info!(user_id = user.id, "User logged in");

    Ok(Json(ApiResponse::new(LoginResponse {
        user: user.into(),
        token,
        expires_in: state.tokens.lifetime_secs(),
    })))
}

/// POST /register - Self-service registration (never an administrator).
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let password_hash = hash_for_storage(&req.password)?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .create(&NewUser::new(&req.name, &req.email, password_hash))
        .await?;

    info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}
