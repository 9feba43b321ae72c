//! OpenAPI document.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{
    BrandResponse, BuyerInfo, CarResponse, CreateBrandRequest, CreateCarRequest,
    CreateModelRequest, CreateSaleRequest, InstallResponse, LoginRequest, LoginResponse,
    MessageResponse, ModelInfo, ModelResponse, PaginationMeta, RegisterRequest, SaleCarInfo,
    SaleDetailResponse, SaleResponse, UpdateBrandRequest, UpdateCarRequest, UpdateModelRequest,
    UpdateSaleRequest, UpdateUserRequest, UserResponse,
};
use super::error::{ErrorBody, ErrorCode, ErrorDetail};
use super::handlers;

/// OpenAPI description of the dealership API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dealership API",
        description = "Vehicle dealership management: users, brands, models, cars and sales."
    ),
    paths(
        handlers::auth::login,
        handlers::auth::register,
        handlers::user::get_me,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::update_user,
        handlers::admin::create_admin,
        handlers::admin::delete_user,
        handlers::catalog::create_brand,
        handlers::catalog::list_brands,
        handlers::catalog::get_brand,
        handlers::catalog::update_brand,
        handlers::catalog::delete_brand,
        handlers::catalog::create_model,
        handlers::catalog::list_models,
        handlers::catalog::get_model,
        handlers::catalog::update_model,
        handlers::catalog::delete_model,
        handlers::catalog::create_car,
        handlers::catalog::list_cars,
        handlers::catalog::get_car,
        handlers::catalog::update_car,
        handlers::catalog::delete_car,
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::sales_in_range,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::install::install,
    ),
    components(schemas(
        ErrorBody,
        ErrorDetail,
        ErrorCode,
        PaginationMeta,
        MessageResponse,
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        UpdateUserRequest,
        UserResponse,
        CreateBrandRequest,
        UpdateBrandRequest,
        BrandResponse,
        CreateModelRequest,
        UpdateModelRequest,
        ModelResponse,
        CreateCarRequest,
        UpdateCarRequest,
        CarResponse,
        CreateSaleRequest,
        UpdateSaleRequest,
        SaleResponse,
        SaleDetailResponse,
        SaleCarInfo,
        ModelInfo,
        BuyerInfo,
        InstallResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and registration"),
        (name = "users", description = "User profiles"),
        (name = "admin", description = "Administrator-only operations"),
        (name = "brands", description = "Vehicle brands"),
        (name = "models", description = "Vehicle models"),
        (name = "cars", description = "Cars in stock"),
        (name = "sales", description = "Sales records"),
        (name = "install", description = "Demo data")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` security scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
