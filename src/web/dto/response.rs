//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{Brand, Car, VehicleModel};
use crate::db::User;
use crate::install::SeedSummary;
use crate::sales::{Sale, SaleDetail};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            data,
            meta: PaginationMeta { page, limit, total },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: i64,
    /// Items per page.
    pub limit: i64,
    /// Total number of items.
    pub total: i64,
}

/// Plain message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Users
// ============================================================================

/// User information in responses. The password hash is never included.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Authenticated user.
    pub user: UserResponse,
    /// Bearer token (JWT).
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

// ============================================================================
// Catalog
// ============================================================================

/// Brand in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct BrandResponse {
    pub id: i64,
    pub name: String,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name,
        }
    }
}

/// Vehicle model in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelResponse {
    pub id: i64,
    pub name: String,
    pub brand_id: i64,
}

impl From<VehicleModel> for ModelResponse {
    fn from(model: VehicleModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            brand_id: model.brand_id,
        }
    }
}

/// Car in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarResponse {
    pub id: i64,
    pub model_id: i64,
    pub year: i32,
    pub color: String,
    pub price: f64,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            model_id: car.model_id,
            year: car.year,
            color: car.color,
            price: car.price,
        }
    }
}

// ============================================================================
// Sales
// ============================================================================

/// Sale in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaleResponse {
    pub id: i64,
    pub car_id: i64,
    pub buyer_id: i64,
    pub sold_at: DateTime<Utc>,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            id: sale.id,
            car_id: sale.car_id,
            buyer_id: sale.buyer_id,
            sold_at: sale.sold_at,
        }
    }
}

/// Car details nested in a sales report row.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaleCarInfo {
    pub id: i64,
    pub year: i32,
    pub color: String,
    pub price: f64,
    pub model: ModelInfo,
}

/// Model details nested in a sales report row.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelInfo {
    pub id: i64,
    pub name: String,
    pub brand: BrandResponse,
}

/// Buyer details nested in a sales report row.
#[derive(Debug, Serialize, ToSchema)]
pub struct BuyerInfo {
    pub id: i64,
    pub name: String,
}

/// Sales report row: a sale with car, model, brand and buyer.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaleDetailResponse {
    pub id: i64,
    pub sold_at: DateTime<Utc>,
    pub car: SaleCarInfo,
    pub buyer: BuyerInfo,
}

impl From<SaleDetail> for SaleDetailResponse {
    fn from(d: SaleDetail) -> Self {
        Self {
            id: d.id,
            sold_at: d.sold_at,
            car: SaleCarInfo {
                id: d.car_id,
                year: d.year,
                color: d.color,
                price: d.price,
                model: ModelInfo {
                    id: d.model_id,
                    name: d.model_name,
                    brand: BrandResponse {
                        id: d.brand_id,
                        name: d.brand_name,
                    },
                },
            },
            buyer: BuyerInfo {
                id: d.buyer_id,
                name: d.buyer_name,
            },
        }
    }
}

// ============================================================================
// Install
// ============================================================================

/// Result of seeding the demo data.
#[derive(Debug, Serialize, ToSchema)]
pub struct InstallResponse {
    pub message: String,
    pub users: usize,
    pub brands: usize,
    pub models: usize,
    pub cars: usize,
    pub sales: usize,
}

impl From<SeedSummary> for InstallResponse {
    fn from(s: SeedSummary) -> Self {
        Self {
            message: "Installation completed".to_string(),
            users: s.users,
            brands: s.brands,
            models: s.models,
            cars: s.cars,
            sales: s.sales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_omits_password() {
        let user = User {
            id: 1,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "$argon2id$secret".into(),
            is_admin: false,
            created_at: "2024-01-01 00:00:00".into(),
            updated_at: "2024-01-01 00:00:00".into(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"is_admin\":false"));
    }

    #[test]
    fn test_paginated_response_shape() {
        let resp = PaginatedResponse::new(vec![1, 2], 2, 5, 7);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["meta"]["page"], 2);
        assert_eq!(json["meta"]["limit"], 5);
        assert_eq!(json["meta"]["total"], 7);
    }
}
