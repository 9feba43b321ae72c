//! Brand, model and car handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::catalog::{
    BrandRepository, BrandUpdate, CarRepository, CarUpdate, NewBrand, NewCar, NewVehicleModel,
    VehicleModelRepository, VehicleModelUpdate,
};
use crate::web::dto::{
    validation::non_blank, ApiResponse, BrandResponse, CarResponse, CreateBrandRequest,
    CreateCarRequest, CreateModelRequest, ModelResponse, PaginatedResponse, Pagination,
    PaginationQuery, UpdateBrandRequest, UpdateCarRequest, UpdateModelRequest, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AuthUser;

// ============================================================================
// Brands
// ============================================================================

/// POST /brands - Create a brand.
#[utoipa::path(
    post,
    path = "/brands",
    tag = "brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_brand(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateBrandRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BrandResponse>>), ApiError> {
    let brand = BrandRepository::new(state.db.pool())
        .create(&NewBrand::new(req.name))
        .await?;

    info!(subject_id = ctx.subject_id, brand_id = brand.id, "Brand created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(brand.into()))))
}

/// GET /brands - List brands.
#[utoipa::path(
    get,
    path = "/brands",
    tag = "brands",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated list of brands", body = Vec<BrandResponse>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_brands(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    pagination: Pagination,
) -> Result<Json<PaginatedResponse<BrandResponse>>, ApiError> {
    let repo = BrandRepository::new(state.db.pool());
    let total = repo.count().await?;
    let brands = repo.list(pagination.offset(), pagination.limit).await?;

    Ok(Json(PaginatedResponse::new(
        brands.into_iter().map(BrandResponse::from).collect(),
        pagination.page,
        pagination.limit,
        total,
    )))
}

/// GET /brands/:id - Get a brand.
#[utoipa::path(
    get,
    path = "/brands/{id}",
    tag = "brands",
    params(("id" = i64, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = BrandResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Brand not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_brand(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BrandResponse>>, ApiError> {
    let brand = BrandRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Brand not found"))?;

    Ok(Json(ApiResponse::new(brand.into())))
}

/// PUT /brands/:id - Update a brand.
#[utoipa::path(
    put,
    path = "/brands/{id}",
    tag = "brands",
    params(("id" = i64, Path, description = "Brand ID")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Updated brand", body = BrandResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Brand not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_brand(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateBrandRequest>,
) -> Result<Json<ApiResponse<BrandResponse>>, ApiError> {
    let update = BrandUpdate {
        name: non_blank(req.name),
    };
    let brand = BrandRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Brand not found"))?;

    Ok(Json(ApiResponse::new(brand.into())))
}

/// DELETE /brands/:id - Delete a brand.
#[utoipa::path(
    delete,
    path = "/brands/{id}",
    tag = "brands",
    params(("id" = i64, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Brand not found", body = ErrorBody),
        (status = 409, description = "Brand still has models", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_brand(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !BrandRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Brand not found"));
    }
    info!(subject_id = ctx.subject_id, brand_id = id, "Brand deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Models
// ============================================================================

/// POST /models - Create a vehicle model.
#[utoipa::path(
    post,
    path = "/models",
    tag = "models",
    request_body = CreateModelRequest,
    responses(
        (status = 201, description = "Model created", body = ModelResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Validation error or unknown brand", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_model(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateModelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ModelResponse>>), ApiError> {
    let model = VehicleModelRepository::new(state.db.pool())
        .create(&NewVehicleModel::new(req.name, req.brand_id))
        .await?;

    info!(subject_id = ctx.subject_id, model_id = model.id, "Model created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(model.into()))))
}

/// GET /models - List vehicle models.
#[utoipa::path(
    get,
    path = "/models",
    tag = "models",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated list of models", body = Vec<ModelResponse>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_models(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    pagination: Pagination,
) -> Result<Json<PaginatedResponse<ModelResponse>>, ApiError> {
    let repo = VehicleModelRepository::new(state.db.pool());
    let total = repo.count().await?;
    let models = repo.list(pagination.offset(), pagination.limit).await?;

    Ok(Json(PaginatedResponse::new(
        models.into_iter().map(ModelResponse::from).collect(),
        pagination.page,
        pagination.limit,
        total,
    )))
}

/// GET /models/:id - Get a vehicle model.
#[utoipa::path(
    get,
    path = "/models/{id}",
    tag = "models",
    params(("id" = i64, Path, description = "Model ID")),
    responses(
        (status = 200, description = "Model", body = ModelResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Model not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_model(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ModelResponse>>, ApiError> {
    let model = VehicleModelRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Model not found"))?;

    Ok(Json(ApiResponse::new(model.into())))
}

/// PUT /models/:id - Update a vehicle model.
#[utoipa::path(
    put,
    path = "/models/{id}",
    tag = "models",
    params(("id" = i64, Path, description = "Model ID")),
    request_body = UpdateModelRequest,
    responses(
        (status = 200, description = "Updated model", body = ModelResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Model not found", body = ErrorBody),
        (status = 422, description = "Unknown brand", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_model(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateModelRequest>,
) -> Result<Json<ApiResponse<ModelResponse>>, ApiError> {
    let update = VehicleModelUpdate {
        name: non_blank(req.name),
        brand_id: req.brand_id,
    };
    let model = VehicleModelRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Model not found"))?;

    Ok(Json(ApiResponse::new(model.into())))
}

/// DELETE /models/:id - Delete a vehicle model.
#[utoipa::path(
    delete,
    path = "/models/{id}",
    tag = "models",
    params(("id" = i64, Path, description = "Model ID")),
    responses(
        (status = 204, description = "Model deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Model not found", body = ErrorBody),
        (status = 409, description = "Model still has cars", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_model(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !VehicleModelRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Model not found"));
    }
    info!(subject_id = ctx.subject_id, model_id = id, "Model deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Cars
// ============================================================================

/// POST /cars - Add a car.
#[utoipa::path(
    post,
    path = "/cars",
    tag = "cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Validation error or unknown model", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_car(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CarResponse>>), ApiError> {
    let car = CarRepository::new(state.db.pool())
        .create(&NewCar::new(req.model_id, req.year, req.color, req.price))
        .await?;

    info!(subject_id = ctx.subject_id, car_id = car.id, "Car created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(car.into()))))
}

/// GET /cars - List cars.
#[utoipa::path(
    get,
    path = "/cars",
    tag = "cars",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated list of cars", body = Vec<CarResponse>),
        (status = 400, description = "Invalid pagination", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_cars(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    pagination: Pagination,
) -> Result<Json<PaginatedResponse<CarResponse>>, ApiError> {
    let repo = CarRepository::new(state.db.pool());
    let total = repo.count().await?;
    let cars = repo.list(pagination.offset(), pagination.limit).await?;

    Ok(Json(PaginatedResponse::new(
        cars.into_iter().map(CarResponse::from).collect(),
        pagination.page,
        pagination.limit,
        total,
    )))
}

/// GET /cars/:id - Get a car.
#[utoipa::path(
    get,
    path = "/cars/{id}",
    tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car", body = CarResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Car not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_car(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CarResponse>>, ApiError> {
    let car = CarRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Car not found"))?;

    Ok(Json(ApiResponse::new(car.into())))
}

/// PUT /cars/:id - Update a car.
#[utoipa::path(
    put,
    path = "/cars/{id}",
    tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Updated car", body = CarResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Car not found", body = ErrorBody),
        (status = 422, description = "Validation error or unknown model", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_car(
    State(state): State<Arc<AppState>>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateCarRequest>,
) -> Result<Json<ApiResponse<CarResponse>>, ApiError> {
    let update = CarUpdate {
        model_id: req.model_id,
        year: req.year,
        color: non_blank(req.color),
        price: req.price,
    };
    let car = CarRepository::new(state.db.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Car not found"))?;

    Ok(Json(ApiResponse::new(car.into())))
}

/// DELETE /cars/:id - Delete a car.
#[utoipa::path(
    delete,
    path = "/cars/{id}",
    tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Car not found", body = ErrorBody),
        (status = 409, description = "Car has been sold", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_car(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !CarRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Car not found"));
    }
    info!(subject_id = ctx.subject_id, car_id = id, "Car deleted");
    Ok(StatusCode::NO_CONTENT)
}
