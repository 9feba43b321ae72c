//! User handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::{hash_for_storage, AppState};
use crate::auth::require_self_or_admin;
use crate::db::{UserRepository, UserUpdate};
use crate::web::dto::{
    validation::non_blank, ApiResponse, PaginatedResponse, Pagination, PaginationQuery,
    UpdateUserRequest, UserResponse, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AuthUser;

/// GET /users/me - Get the current user.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "User no longer exists", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(ctx.subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// GET /users - List users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = Vec<UserResponse>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    pagination: Pagination,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let total = repo.count().await?;
    let users = repo.list(pagination.offset(), pagination.limit).await?;

    Ok(Json(PaginatedResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
        pagination.page,
        pagination.limit,
        total,
    )))
}

/// GET /users/:id - Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// PUT /users/:id - Update a profile.
///
/// A user may update only their own profile; administrators may update any.
/// The admin flag is not changeable here.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Not your account", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(mut ctx): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let access = require_self_or_admin(&repo, &mut ctx, id).await?;

    let mut update = UserUpdate::new();
    if let Some(name) = non_blank(req.name) {
        update = update.name(name);
    }
    if let Some(email) = non_blank(req.email) {
        update = update.email(email);
    }
    if let Some(password) = req.password.filter(|p| !p.is_empty()) {
        update = update.password(hash_for_storage(&password)?);
    }

    let user = repo
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(subject_id = ctx.subject_id, target_id = id, ?access, "User updated");
    Ok(Json(ApiResponse::new(user.into())))
}
