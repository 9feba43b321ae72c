//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::*;
use super::middleware::{authenticate, create_cors_layer};
use super::openapi::ApiDoc;

/// Create the main API router.
///
/// `/login`, `/register` and the documentation routes are public. Every
/// other route runs behind the authentication middleware. `/install` is
/// only mounted when `install_enabled` is set.
pub fn create_router(
    app_state: Arc<AppState>,
    cors_origins: &[String],
    install_enabled: bool,
) -> Router {
    let mut public_routes = Router::new()
        .route("/login", post(login))
        .route("/register", post(register));
    if install_enabled {
        public_routes = public_routes.route("/install", get(install));
    }

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(get_me))
        .route("/users/:id", get(get_user).put(update_user))
        .route("/admin/users", post(create_admin))
        .route("/admin/users/:id", delete(delete_user))
        .route("/brands", get(list_brands).post(create_brand))
        .route(
            "/brands/:id",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .route("/models", get(list_models).post(create_model))
        .route(
            "/models/:id",
            get(get_model).put(update_model).delete(delete_model),
        )
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", get(get_car).put(update_car).delete(delete_car))
        .route("/sales", get(list_sales).post(create_sale))
        .route("/sales/range", get(sales_in_range))
        .route(
            "/sales/:id",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            authenticate,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
        .merge(create_health_router())
        .merge(create_swagger_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Swagger UI at `/docs`, JSON document at `/api-docs/openapi.json`.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
