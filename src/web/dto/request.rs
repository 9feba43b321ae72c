//! Request DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail, ValidationError};

use super::validation::{no_control_chars, not_empty_trimmed};

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Password length must be 8..=128 characters; blank means "unchanged".
fn blank_or_password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if value.is_empty() || (8..=128).contains(&len) {
        return Ok(());
    }
    Err(ValidationError::new("length")
        .with_message("Password must be between 8 and 128 characters".into()))
}

/// Blank means "unchanged"; anything else must be an email address.
fn blank_or_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().to_string().validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message("Invalid email address".into()))
}

// ============================================================================
// Auth / Users
// ============================================================================

/// Login request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    #[schema(example = "admin@example.com")]
    pub email: String,
    /// Password.
    pub password: String,
}

/// Registration request, also used by administrators to create another
/// administrator.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub name: String,
    /// Email address (login key).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
}

/// Profile update request. Blank or missing fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name.
    #[serde(default)]
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "no_control_chars")
    )]
    pub name: Option<String>,
    /// New email address.
    #[serde(default)]
    #[validate(custom(function = "blank_or_email"))]
    pub email: Option<String>,
    /// New password.
    #[serde(default)]
    #[validate(custom(function = "blank_or_password"))]
    pub password: Option<String>,
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1.
    pub page: Option<i64>,
    /// Items per page (1-100, default 5).
    pub limit: Option<i64>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Brand creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBrandRequest {
    /// Brand name.
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
}

/// Brand update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBrandRequest {
    /// New brand name.
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Vehicle model creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateModelRequest {
    /// Model name.
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
    /// Owning brand ID.
    pub brand_id: i64,
}

/// Vehicle model update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateModelRequest {
    /// New model name.
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    /// New owning brand ID.
    #[serde(default)]
    pub brand_id: Option<i64>,
}

/// Car creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarRequest {
    /// Vehicle model ID.
    pub model_id: i64,
    /// Model year.
    #[validate(range(min = 1886, max = 2100, message = "Year must be between 1886 and 2100"))]
    pub year: i32,
    /// Paint color.
    #[validate(
        length(min = 1, max = 50, message = "Color must be between 1 and 50 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub color: String,
    /// Asking price.
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Car update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCarRequest {
    /// New vehicle model ID.
    #[serde(default)]
    pub model_id: Option<i64>,
    /// New model year.
    #[serde(default)]
    #[validate(range(min = 1886, max = 2100, message = "Year must be between 1886 and 2100"))]
    pub year: Option<i32>,
    /// New paint color.
    #[serde(default)]
    #[validate(length(max = 50, message = "Color must be at most 50 characters"))]
    pub color: Option<String>,
    /// New asking price.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
}

// ============================================================================
// Sales
// ============================================================================

/// Sale creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSaleRequest {
    /// Car sold.
    pub car_id: i64,
    /// Buying user.
    pub buyer_id: i64,
    /// Sale timestamp (RFC 3339); defaults to now.
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
}

/// Sale update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSaleRequest {
    #[serde(default)]
    pub car_id: Option<i64>,
    #[serde(default)]
    pub buyer_id: Option<i64>,
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
}

/// Date interval for the sales report.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesRangeQuery {
    /// Start of the interval (RFC 3339, inclusive).
    pub from: DateTime<Utc>,
    /// End of the interval (RFC 3339, inclusive).
    pub to: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "password123".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_fields() {
        let req = RegisterRequest {
            name: "   ".into(),
            email: "not-an-email".into(),
            password: "short".into(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_password_bounds() {
        let make = |password: String| RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password,
        };

        assert!(make("a".repeat(8)).validate().is_ok());
        assert!(make("a".repeat(128)).validate().is_ok());
        assert!(make("a".repeat(7)).validate().is_err());
        assert!(make("a".repeat(129)).validate().is_err());
    }

    #[test]
    fn test_update_user_blank_fields_pass() {
        let req = UpdateUserRequest {
            name: Some(String::new()),
            email: Some(String::new()),
            password: Some(String::new()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_user_bad_values() {
        let req = UpdateUserRequest {
            name: None,
            email: Some("nope".into()),
            password: Some("short".into()),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_create_car_validation() {
        let req = CreateCarRequest {
            model_id: 1,
            year: 1700,
            color: "Azul".into(),
            price: -1.0,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("year"));
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_sale_request_parses_rfc3339() {
        let req: CreateSaleRequest = serde_json::from_str(
            r#"{"car_id": 1, "buyer_id": 2, "sold_at": "2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.sold_at.unwrap().to_rfc3339(), "2024-03-01T12:00:00+00:00");

        let req: CreateSaleRequest =
            serde_json::from_str(r#"{"car_id": 1, "buyer_id": 2}"#).unwrap();
        assert!(req.sold_at.is_none());
    }
}
