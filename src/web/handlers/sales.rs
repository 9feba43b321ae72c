//! Sale handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::sales::{NewSale, SaleRepository, SaleUpdate};
use crate::web::dto::{
    ApiResponse, CreateSaleRequest, PaginatedResponse, Pagination, PaginationQuery,
    SaleDetailResponse, SaleResponse, SalesRangeQuery, UpdateSaleRequest, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AuthUser;

/// POST /sales - Record a sale.
#[utoipa::path(
    post,
    path = "/sales",
    tag = "sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = SaleResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 409, description = "Car already sold", body = ErrorBody),
        (status = 422, description = "Unknown car or buyer", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateSaleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SaleResponse>>), ApiError> {
    let sold_at = req.sold_at.unwrap_or_else(chrono::Utc::now);
    let sale = SaleRepository::new(state.db.pool())
        .create(&NewSale::new(req.car_id, req.buyer_id, sold_at))
        .await?;

    info!(subject_id = ctx.subject_id, sale_id = sale.id, car_id = sale.car_id, "Sale recorded");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(sale.into()))))
}

/// GET /sales - List sales.
#[utoipa::path(
    get,
    path = "/sales",
    tag = "sales",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated list of sales", body = Vec<SaleResponse>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    pagination: Pagination,
) -> Result<Json<PaginatedResponse<SaleResponse>>, ApiError> {
    let repo = SaleRepository::new(state.db.pool());
    let total = repo.count().await?;
    let sales = repo.list(pagination.offset(), pagination.limit).await?;

    Ok(Json(PaginatedResponse::new(
        sales.into_iter().map(SaleResponse::from).collect(),
        pagination.page,
        pagination.limit,
        total,
    )))
}

/// GET /sales/range - Sales report for a date interval.
#[utoipa::path(
    get,
    path = "/sales/range",
    tag = "sales",
    params(SalesRangeQuery),
    responses(
        (status = 200, description = "Sales in the interval with car, model, brand and buyer", body = Vec<SaleDetailResponse>),
        (status = 400, description = "Missing or invalid dates", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn sales_in_range(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    query: Result<Query<SalesRangeQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<ApiResponse<Vec<SaleDetailResponse>>>, ApiError> {
    let Query(range) =
        query.map_err(|e| ApiError::bad_request(format!("Invalid date range: {}", e.body_text())))?;
    if range.from > range.to {
        return Err(ApiError::bad_request("'from' must not be after 'to'"));
    }

    let sales = SaleRepository::new(state.db.pool())
        .list_between(range.from, range.to)
        .await?;

    Ok(Json(ApiResponse::new(
        sales.into_iter().map(SaleDetailResponse::from).collect(),
    )))
}

/// GET /sales/:id - Get a sale.
#[utoipa::path(
    get,
    path = "/sales/{id}",
    tag = "sales",
    params(("id" = i64, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Sale", body = SaleResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Sale not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_sale(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SaleResponse>>, ApiError> {
    let sale = SaleRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale not found"))?;

    Ok(Json(ApiResponse::new(sale.into())))
}

/// PUT /sales/:id - Update a sale.
#[utoipa::path(
    put,
    path = "/sales/{id}",
    tag = "sales",
    params(("id" = i64, Path, description = "Sale ID")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Updated sale", body = SaleResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Sale not found", body = ErrorBody),
        (status = 409, description = "Car already sold", body = ErrorBody),
        (status = 422, description = "Unknown car or buyer", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_sale(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateSaleRequest>,
) -> Result<Json<ApiResponse<SaleResponse>>, ApiError> {
    let update = SaleUpdate {
        car_id: req.car_id,
        buyer_id: req.buyer_id,
        sold_at: req.sold_at,
    };
    let sale = SaleRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale not found"))?;

    Ok(Json(ApiResponse::new(sale.into())))
}

/// DELETE /sales/:id - Delete a sale.
#[utoipa::path(
    delete,
    path = "/sales/{id}",
    tag = "sales",
    params(("id" = i64, Path, description = "Sale ID")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Sale not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_sale(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !SaleRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Sale not found"));
    }
    info!(subject_id = ctx.subject_id, sale_id = id, "Sale deleted");
    Ok(StatusCode::NO_CONTENT)
}
