//! Sale repository.

use chrono::{DateTime, Utc};

use super::types::{NewSale, Sale, SaleDetail, SaleUpdate};
use crate::db::{map_constraint_error, map_delete_error, DbPool};
use crate::{DealershipError, Result};

const SALE_COLUMNS: &str = "id, car_id, buyer_id, sold_at";

/// Repository for sales.
pub struct SaleRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SaleRepository<'a> {
    /// Create a new SaleRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Record a sale.
    ///
    /// Selling a car twice is a `Conflict`; a missing car or buyer is a
    /// `Validation` error.
    pub async fn create(&self, sale: &NewSale) -> Result<Sale> {
        let result = sqlx::query("INSERT INTO sales (car_id, buyer_id, sold_at) VALUES (?, ?, ?)")
            .bind(sale.car_id)
            .bind(sale.buyer_id)
            .bind(sale.sold_at)
            .execute(self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "sale for this car"))?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DealershipError::NotFound("sale".to_string()))
    }

    /// Get a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Sale>> {
        let sql = format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?");
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(sale)
    }

    /// List sales ordered by ID.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Sale>> {
        let sql = format!("SELECT {SALE_COLUMNS} FROM sales ORDER BY id LIMIT ? OFFSET ?");
        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(sales)
    }

    /// Count all sales.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Update a sale. Returns `None` if it does not exist.
    pub async fn update(&self, id: i64, update: &SaleUpdate) -> Result<Option<Sale>> {
        let result = sqlx::query(
            "UPDATE sales SET car_id = COALESCE(?, car_id), buyer_id = COALESCE(?, buyer_id), \
             sold_at = COALESCE(?, sold_at), updated_at = datetime('now') WHERE id = ?",
        )
        .bind(update.car_id)
        .bind(update.buyer_id)
        .bind(update.sold_at)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "sale for this car"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a sale.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, "sale"))?;
        Ok(result.rows_affected() > 0)
    }

    /// List sales within `[from, to]` (inclusive) with car, model, brand and
    /// buyer joined in, oldest first.
    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SaleDetail>> {
        let details = sqlx::query_as::<_, SaleDetail>(
            "SELECT s.id, s.sold_at, \
                    c.id AS car_id, c.year, c.color, c.price, \
                    m.id AS model_id, m.name AS model_name, \
                    b.id AS brand_id, b.name AS brand_name, \
                    u.id AS buyer_id, u.name AS buyer_name \
             FROM sales s \
             JOIN cars c ON c.id = s.car_id \
             JOIN models m ON m.id = c.model_id \
             JOIN brands b ON b.id = m.brand_id \
             JOIN users u ON u.id = s.buyer_id \
             WHERE julianday(s.sold_at) BETWEEN julianday(?) AND julianday(?) \
             ORDER BY julianday(s.sold_at), s.id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        BrandRepository, CarRepository, NewBrand, NewCar, NewVehicleModel, VehicleModelRepository,
    };
    use crate::db::{NewUser, UserRepository};
    use crate::Database;
    use chrono::TimeZone;

    struct Fixture {
        db: Database,
        buyer_id: i64,
        car_ids: Vec<i64>,
    }

    async fn setup() -> Fixture {
        let db = Database::open_in_memory().await.unwrap();
        let buyer = UserRepository::new(db.pool())
            .create(&NewUser::new("Buyer", "buyer@example.com", "hash"))
            .await
            .unwrap();
        let brand = BrandRepository::new(db.pool())
            .create(&NewBrand::new("Toyota"))
            .await
            .unwrap();
        let model = VehicleModelRepository::new(db.pool())
            .create(&NewVehicleModel::new("Corolla", brand.id))
            .await
            .unwrap();
        let cars = CarRepository::new(db.pool());
        let mut car_ids = Vec::new();
        for year in [2020, 2021, 2022] {
            car_ids.push(
                cars.create(&NewCar::new(model.id, year, "Preto", 80000.0))
                    .await
                    .unwrap()
                    .id,
            );
        }
        Fixture {
            db,
            buyer_id: buyer.id,
            car_ids,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let f = setup().await;
        let repo = SaleRepository::new(f.db.pool());

        let sale = repo
            .create(&NewSale::new(f.car_ids[0], f.buyer_id, day(1)))
            .await
            .unwrap();
        let fetched = repo.get_by_id(sale.id).await.unwrap().unwrap();

        assert_eq!(fetched.car_id, f.car_ids[0]);
        assert_eq!(fetched.buyer_id, f.buyer_id);
        assert_eq!(fetched.sold_at, day(1));
    }

    #[tokio::test]
    async fn test_car_sold_twice_is_conflict() {
        let f = setup().await;
        let repo = SaleRepository::new(f.db.pool());

        repo.create(&NewSale::new(f.car_ids[0], f.buyer_id, day(1)))
            .await
            .unwrap();
        let result = repo
            .create(&NewSale::new(f.car_ids[0], f.buyer_id, day(2)))
            .await;
        assert!(matches!(result, Err(DealershipError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_missing_buyer_is_validation() {
        let f = setup().await;
        let repo = SaleRepository::new(f.db.pool());

        let result = repo.create(&NewSale::new(f.car_ids[0], 999, day(1))).await;
        assert!(matches!(result, Err(DealershipError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sold_car_cannot_be_deleted() {
        let f = setup().await;
        SaleRepository::new(f.db.pool())
            .create(&NewSale::new(f.car_ids[0], f.buyer_id, day(1)))
            .await
            .unwrap();

        let result = CarRepository::new(f.db.pool()).delete(f.car_ids[0]).await;
        assert!(matches!(result, Err(DealershipError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let f = setup().await;
        let repo = SaleRepository::new(f.db.pool());

        let sale = repo
            .create(&NewSale::new(f.car_ids[0], f.buyer_id, day(1)))
            .await
            .unwrap();
        let updated = repo
            .update(
                sale.id,
                &SaleUpdate {
                    sold_at: Some(day(5)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.sold_at, day(5));
        assert_eq!(updated.car_id, f.car_ids[0]);

        assert!(repo.update(999, &SaleUpdate::default()).await.unwrap().is_none());
        assert!(repo.delete(sale.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_between_inclusive() {
        let f = setup().await;
        let repo = SaleRepository::new(f.db.pool());

        for (car_id, d) in f.car_ids.iter().zip([1, 10, 20]) {
            repo.create(&NewSale::new(*car_id, f.buyer_id, day(d)))
                .await
                .unwrap();
        }

        let details = repo.list_between(day(1), day(10)).await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].sold_at, day(1));
        assert_eq!(details[1].sold_at, day(10));
        assert_eq!(details[0].brand_name, "Toyota");
        assert_eq!(details[0].model_name, "Corolla");
        assert_eq!(details[0].buyer_name, "Buyer");

        assert!(repo.list_between(day(21), day(30)).await.unwrap().is_empty());
        assert_eq!(repo.list(0, 5).await.unwrap().len(), 3);
    }
}
