//! Demo data installation handler.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use super::AppState;
use crate::web::dto::{ApiResponse, InstallResponse};
use crate::web::error::{ApiError, ErrorBody};

/// GET /install - Reset the database and load the demo data set.
///
/// Only mounted when `install.enabled` is set.
#[utoipa::path(
    get,
    path = "/install",
    tag = "install",
    responses(
        (status = 200, description = "Demo data loaded", body = InstallResponse),
        (status = 500, description = "Seeding failed", body = ErrorBody)
    )
)]
pub async fn install(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<InstallResponse>>, ApiError> {
    warn!("Install requested: wiping all data");
    let summary = crate::install::seed(&state.db).await?;
    Ok(Json(ApiResponse::new(summary.into())))
}
