//! Sale record types.

use chrono::{DateTime, Utc};

/// A recorded sale of one car to one buyer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Sale {
    /// Unique sale ID.
    pub id: i64,
    /// Car sold.
    pub car_id: i64,
    /// Buying user.
    pub buyer_id: i64,
    /// When the sale happened.
    pub sold_at: DateTime<Utc>,
}

/// Data for recording a sale.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub car_id: i64,
    pub buyer_id: i64,
    pub sold_at: DateTime<Utc>,
}

impl NewSale {
    /// Create a new sale record.
    pub fn new(car_id: i64, buyer_id: i64, sold_at: DateTime<Utc>) -> Self {
        Self {
            car_id,
            buyer_id,
            sold_at,
        }
    }
}

/// Partial sale update.
#[derive(Debug, Clone, Default)]
pub struct SaleUpdate {
    pub car_id: Option<i64>,
    pub buyer_id: Option<i64>,
    pub sold_at: Option<DateTime<Utc>>,
}

/// A sale joined with its car, model, brand and buyer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleDetail {
    pub id: i64,
    pub sold_at: DateTime<Utc>,
    pub car_id: i64,
    pub year: i32,
    pub color: String,
    pub price: f64,
    pub model_id: i64,
    pub model_name: String,
    pub brand_id: i64,
    pub brand_name: String,
    pub buyer_id: i64,
    pub buyer_name: String,
}
