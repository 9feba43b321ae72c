//! Catalog repositories.
//!
//! Updates are partial: unset fields keep their stored value.

use super::types::{
    Brand, BrandUpdate, Car, CarUpdate, NewBrand, NewCar, NewVehicleModel, VehicleModel,
    VehicleModelUpdate,
};
use crate::db::{map_constraint_error, map_delete_error, DbPool};
use crate::{DealershipError, Result};

/// Repository for brands.
pub struct BrandRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BrandRepository<'a> {
    /// Create a new BrandRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a brand.
    pub async fn create(&self, brand: &NewBrand) -> Result<Brand> {
        let result = sqlx::query("INSERT INTO brands (name) VALUES (?)")
            .bind(brand.name.trim())
            .execute(self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "brand"))?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DealershipError::NotFound("brand".to_string()))
    }

    /// Get a brand by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(brand)
    }

    /// List brands ordered by ID.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(
            "SELECT id, name FROM brands ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;
        Ok(brands)
    }

    /// Count all brands.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Update a brand. Returns `None` if it does not exist.
    pub async fn update(&self, id: i64, update: &BrandUpdate) -> Result<Option<Brand>> {
        let result = sqlx::query(
            "UPDATE brands SET name = COALESCE(?, name), updated_at = datetime('now') WHERE id = ?",
        )
        .bind(update.name.as_deref().map(str::trim))
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "brand"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a brand. Fails with `Conflict` while models still reference it.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM brands WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, "brand"))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Repository for vehicle models.
pub struct VehicleModelRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> VehicleModelRepository<'a> {
    /// Create a new VehicleModelRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a model. A missing brand is a `Validation` error.
    pub async fn create(&self, model: &NewVehicleModel) -> Result<VehicleModel> {
        let result = sqlx::query("INSERT INTO models (name, brand_id) VALUES (?, ?)")
            .bind(model.name.trim())
            .bind(model.brand_id)
            .execute(self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "model"))?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DealershipError::NotFound("model".to_string()))
    }

    /// Get a model by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<VehicleModel>> {
        let model = sqlx::query_as::<_, VehicleModel>(
            "SELECT id, name, brand_id FROM models WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(model)
    }

    /// List models ordered by ID.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleModel>> {
        let models = sqlx::query_as::<_, VehicleModel>(
            "SELECT id, name, brand_id FROM models ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;
        Ok(models)
    }

    /// Count all models.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM models")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Update a model. Returns `None` if it does not exist.
    pub async fn update(&self, id: i64, update: &VehicleModelUpdate) -> Result<Option<VehicleModel>> {
        let result = sqlx::query(
            "UPDATE models SET name = COALESCE(?, name), brand_id = COALESCE(?, brand_id), \
             updated_at = datetime('now') WHERE id = ?",
        )
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.brand_id)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "model"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a model. Fails with `Conflict` while cars still reference it.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM models WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, "model"))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Repository for cars.
pub struct CarRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CarRepository<'a> {
    /// Create a new CarRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a car. A missing model is a `Validation` error.
    pub async fn create(&self, car: &NewCar) -> Result<Car> {
        let result = sqlx::query(
            "INSERT INTO cars (model_id, year, color, price) VALUES (?, ?, ?, ?)",
        )
        .bind(car.model_id)
        .bind(car.year)
        .bind(car.color.trim())
        .bind(car.price)
        .execute(self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "car"))?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DealershipError::NotFound("car".to_string()))
    }

    /// Get a car by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            "SELECT id, model_id, year, color, price FROM cars WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(car)
    }

    /// List cars ordered by ID.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, model_id, year, color, price FROM cars ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;
        Ok(cars)
    }

    /// Count all cars.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Update a car. Returns `None` if it does not exist.
    pub async fn update(&self, id: i64, update: &CarUpdate) -> Result<Option<Car>> {
        let result = sqlx::query(
            "UPDATE cars SET model_id = COALESCE(?, model_id), year = COALESCE(?, year), \
             color = COALESCE(?, color), price = COALESCE(?, price), \
             updated_at = datetime('now') WHERE id = ?",
        )
        .bind(update.model_id)
        .bind(update.year)
        .bind(update.color.as_deref().map(str::trim))
        .bind(update.price)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "car"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a car. Fails with `Conflict` once it has been sold.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, "car"))?;
        Ok(result.rows_affected() > 0)
    }
}
