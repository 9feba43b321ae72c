//! Catalog record types.

/// A vehicle brand.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Brand {
    /// Unique brand ID.
    pub id: i64,
    /// Brand name.
    pub name: String,
}

/// Data for creating a brand.
#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
}

impl NewBrand {
    /// Create a new brand record.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Partial brand update.
#[derive(Debug, Clone, Default)]
pub struct BrandUpdate {
    pub name: Option<String>,
}

/// A vehicle model belonging to a brand.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VehicleModel {
    /// Unique model ID.
    pub id: i64,
    /// Model name.
    pub name: String,
    /// Owning brand.
    pub brand_id: i64,
}

/// Data for creating a vehicle model.
#[derive(Debug, Clone)]
pub struct NewVehicleModel {
    pub name: String,
    pub brand_id: i64,
}

impl NewVehicleModel {
    /// Create a new model record.
    pub fn new(name: impl Into<String>, brand_id: i64) -> Self {
        Self {
            name: name.into(),
            brand_id,
        }
    }
}

/// Partial vehicle model update.
#[derive(Debug, Clone, Default)]
pub struct VehicleModelUpdate {
    pub name: Option<String>,
    pub brand_id: Option<i64>,
}

/// A car in stock.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Car {
    /// Unique car ID.
    pub id: i64,
    /// Vehicle model.
    pub model_id: i64,
    /// Model year.
    pub year: i32,
    /// Paint color.
    pub color: String,
    /// Asking price.
    pub price: f64,
}

/// Data for creating a car.
#[derive(Debug, Clone)]
pub struct NewCar {
    pub model_id: i64,
    pub year: i32,
    pub color: String,
    pub price: f64,
}

impl NewCar {
    /// Create a new car record.
    pub fn new(model_id: i64, year: i32, color: impl Into<String>, price: f64) -> Self {
        Self {
            model_id,
            year,
            color: color.into(),
            price,
        }
    }
}

/// Partial car update.
#[derive(Debug, Clone, Default)]
pub struct CarUpdate {
    pub model_id: Option<i64>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
}
