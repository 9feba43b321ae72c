//! Administrator-only handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::{hash_for_storage, AppState};
use crate::db::{NewUser, NonAdminDelete, UserRepository};
use crate::web::dto::{ApiResponse, RegisterRequest, UserResponse, ValidatedJson};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AdminUser;

/// POST /admin/users - Create an administrator.
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Administrator created", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let password_hash = hash_for_storage(&req.password)?;

    let user = UserRepository::new(state.db.pool())
        .create(&NewUser::new(&req.name, &req.email, password_hash).admin())
        .await?;

    info!(by = admin.user.id, user_id = user.id, "Administrator created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// DELETE /admin/users/:id - Delete a non-admin user.
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Caller is not an administrator, or target is one", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "User still has sales", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    match UserRepository::new(state.db.pool()).delete_non_admin(id).await? {
        NonAdminDelete::Deleted => {
            info!(by = admin.user.id, user_id = id, "User deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        NonAdminDelete::IsAdmin => {
            warn!(by = admin.user.id, user_id = id, "Refused to delete an administrator");
            Err(ApiError::forbidden("Administrators cannot be deleted"))
        }
        NonAdminDelete::NotFound => Err(ApiError::not_found("User not found")),
    }
}
